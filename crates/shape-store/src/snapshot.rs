use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{SnapshotError, StoreError};
use crate::storage::Storage;

/// Storage key holding the gallery array.
pub const GALLERY_KEY: &str = "shapesGallery";

/// Storage key holding the saved structures array.
pub const STRUCTURES_KEY: &str = "collaborativeStructures";

/// Read a whole-collection snapshot.
///
/// A missing key is an empty collection. Anything that is not a JSON array
/// of `T` is an error.
pub fn read_collection<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Vec<T>, SnapshotError> {
    let Some(json) = storage.get_item(key)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&json).map_err(|e| SnapshotError::Parse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Read a snapshot, falling back to an empty collection on any failure.
pub fn load_collection<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Vec<T> {
    match read_collection(storage, key) {
        Ok(items) => {
            debug!(key, count = items.len(), "snapshot loaded");
            items
        }
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable snapshot");
            Vec::new()
        }
    }
}

/// Overwrite a snapshot with the full collection.
pub fn write_collection<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    storage.set_item(key, &json)?;
    debug!(key, count = items.len(), bytes = json.len(), "snapshot written");
    Ok(())
}
