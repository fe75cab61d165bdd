use shape_types::ShapeDescriptor;
use tracing::{info, instrument};

use crate::errors::StoreError;
use crate::snapshot::{load_collection, write_collection, GALLERY_KEY};
use crate::storage::Storage;
use crate::subscribers::{SubscriptionId, Subscribers};

/// The deduplicated collection of saved descriptors.
///
/// At most one entry exists per `original_name`, compared exactly as typed.
/// Every successful mutation is persisted as a whole snapshot and then
/// broadcast to subscribers with the full updated list.
#[derive(Debug, Default)]
pub struct Gallery {
    shapes: Vec<ShapeDescriptor>,
    subscribers: Subscribers<[ShapeDescriptor]>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from storage. Unreadable snapshots load as empty.
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            shapes: load_collection(storage, GALLERY_KEY),
            subscribers: Subscribers::new(),
        }
    }

    pub fn list_shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    pub fn find(&self, original_name: &str) -> Option<&ShapeDescriptor> {
        self.shapes.iter().find(|s| s.original_name == original_name)
    }

    pub fn contains(&self, original_name: &str) -> bool {
        self.find(original_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Append a descriptor unless its name is already present.
    ///
    /// Returns `Ok(false)` for a duplicate; nothing is written and nobody is
    /// notified. On a storage failure the gallery is left unchanged.
    #[instrument(skip_all, fields(name = %descriptor.original_name))]
    pub fn save_shape(
        &mut self,
        descriptor: ShapeDescriptor,
        storage: &mut dyn Storage,
    ) -> Result<bool, StoreError> {
        if self.contains(&descriptor.original_name) {
            info!("duplicate name, not saved");
            return Ok(false);
        }

        let mut updated = self.shapes.clone();
        updated.push(descriptor);
        write_collection(storage, GALLERY_KEY, &updated)?;

        self.shapes = updated;
        info!(count = self.shapes.len(), "shape saved");
        self.subscribers.notify(&self.shapes);
        Ok(true)
    }

    /// Remove every entry.
    #[instrument(skip_all)]
    pub fn clear_gallery(&mut self, storage: &mut dyn Storage) -> Result<(), StoreError> {
        storage.remove_item(GALLERY_KEY)?;
        let removed = std::mem::take(&mut self.shapes).len();
        info!(removed, "gallery cleared");
        self.subscribers.notify(&self.shapes);
        Ok(())
    }

    /// Register for the full shape list after every change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&[ShapeDescriptor]) + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
