use shape_types::{PlacedShape, Structure};
use tracing::{info, instrument};

use crate::clock::{timestamp_id, Clock, SystemClock};
use crate::errors::StoreError;
use crate::snapshot::{load_collection, write_collection, STRUCTURES_KEY};
use crate::storage::Storage;

/// Saved structures, newest first.
pub struct StructureStore {
    structures: Vec<Structure>,
    clock: Box<dyn Clock>,
}

impl StructureStore {
    pub fn new() -> Self {
        Self {
            structures: Vec::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Hydrate from storage. Unreadable snapshots load as empty.
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            structures: load_collection(storage, STRUCTURES_KEY),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for ids and `created_at`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn list_structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn get(&self, id: i64) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Save `shapes` as a new structure at the front of the list.
    ///
    /// Rejects an empty shape list. The new id is greater than every
    /// existing id.
    #[instrument(skip(self, shapes, storage), fields(count = shapes.len()))]
    pub fn save_structure(
        &mut self,
        name: &str,
        shapes: Vec<PlacedShape>,
        storage: &mut dyn Storage,
    ) -> Result<Structure, StoreError> {
        if shapes.is_empty() {
            return Err(StoreError::EmptyStructure);
        }

        let now = self.clock.now();
        let newest = self.structures.iter().map(|s| s.id).max();
        let structure = Structure {
            id: timestamp_id(now, newest)?,
            name: name.to_string(),
            shapes,
            created_at: now,
        };

        let mut updated = Vec::with_capacity(self.structures.len() + 1);
        updated.push(structure.clone());
        updated.extend(self.structures.iter().cloned());
        write_collection(storage, STRUCTURES_KEY, &updated)?;

        self.structures = updated;
        info!(id = structure.id, "structure saved");
        Ok(structure)
    }

    /// Delete a structure and return it.
    #[instrument(skip(self, storage))]
    pub fn delete_structure(
        &mut self,
        id: i64,
        storage: &mut dyn Storage,
    ) -> Result<Structure, StoreError> {
        let pos = self
            .structures
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::StructureNotFound { id })?;

        let mut updated = self.structures.clone();
        let removed = updated.remove(pos);
        write_collection(storage, STRUCTURES_KEY, &updated)?;

        self.structures = updated;
        info!(remaining = self.structures.len(), "structure deleted");
        Ok(removed)
    }
}

impl Default for StructureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StructureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureStore")
            .field("structures", &self.structures)
            .finish_non_exhaustive()
    }
}
