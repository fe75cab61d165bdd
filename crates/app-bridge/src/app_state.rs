use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use fingerprint::MAX_NAME_CHARS;
use shading::ColorError;
use shape_store::{Clock, Gallery, Storage, StoreError, StructureStore, WorkingSet};
use shape_types::{PlacedShape, ShapeDescriptor, Structure};

/// The app state wrapper for the WASM bridge.
///
/// Owns the storage backend and the three stores, and keeps the last
/// generated shape until it is saved.
pub struct AppState {
    pub gallery: Gallery,
    pub structures: StructureStore,
    pub working_set: WorkingSet,
    /// The shape currently previewed, waiting for `SaveShape`.
    pub pending: Option<ShapeDescriptor>,
    storage: Box<dyn Storage>,
    rng: StdRng,
}

impl AppState {
    /// Hydrate every store from `storage`.
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    /// Like [`AppState::new`] with reproducible shape placement.
    pub fn with_seed(storage: impl Storage + 'static, seed: u64) -> Self {
        Self::with_rng(storage, StdRng::seed_from_u64(seed))
    }

    fn with_rng(storage: impl Storage + 'static, rng: StdRng) -> Self {
        let gallery = Gallery::load(&storage);
        let structures = StructureStore::load(&storage);
        info!(
            shapes = gallery.len(),
            structures = structures.len(),
            "app state loaded"
        );
        Self {
            gallery,
            structures,
            working_set: WorkingSet::new(),
            pending: None,
            storage: Box::new(storage),
            rng,
        }
    }

    /// Use `clock` for every id and timestamp.
    pub fn with_clock(mut self, clock: impl Clock + Clone + 'static) -> Self {
        self.structures = self.structures.with_clock(clock.clone());
        self.working_set = std::mem::take(&mut self.working_set).with_clock(clock);
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Compute and hold the fingerprint for `name`.
    pub fn generate(&mut self, name: &str) -> Result<ShapeDescriptor, BridgeError> {
        let length = name.encode_utf16().count();
        if length > MAX_NAME_CHARS {
            return Err(BridgeError::NameTooLong {
                length,
                max: MAX_NAME_CHARS,
            });
        }
        let descriptor = fingerprint::generate(name).ok_or(BridgeError::EmptyName)?;
        self.pending = Some(descriptor.clone());
        Ok(descriptor)
    }

    /// Save the held shape. Returns false if the name was already saved.
    pub fn save_pending(&mut self) -> Result<bool, BridgeError> {
        let descriptor = self.pending.clone().ok_or(BridgeError::NothingGenerated)?;
        let stored = self
            .gallery
            .save_shape(descriptor, self.storage.as_mut())?;
        self.pending = None;
        Ok(stored)
    }

    pub fn clear_gallery(&mut self) -> Result<(), BridgeError> {
        self.gallery.clear_gallery(self.storage.as_mut())?;
        Ok(())
    }

    /// Place the gallery shape named `original_name` in the working set.
    pub fn add_to_structure(&mut self, original_name: &str) -> Result<PlacedShape, BridgeError> {
        let descriptor = self
            .gallery
            .find(original_name)
            .cloned()
            .ok_or_else(|| BridgeError::UnknownShape {
                name: original_name.to_string(),
            })?;
        Ok(self.working_set.add_shape(descriptor, &mut self.rng)?)
    }

    /// Save the working set under its current name.
    pub fn save_structure(&mut self) -> Result<Structure, BridgeError> {
        let structure = self.structures.save_structure(
            self.working_set.name(),
            self.working_set.shapes().to_vec(),
            self.storage.as_mut(),
        )?;
        Ok(structure)
    }

    /// Replace the working set with a saved structure.
    pub fn load_structure(&mut self, id: i64) -> Result<(), BridgeError> {
        let structure = self
            .structures
            .get(id)
            .ok_or(StoreError::StructureNotFound { id })?;
        self.working_set.load_structure(structure);
        Ok(())
    }

    pub fn delete_structure(&mut self, id: i64) -> Result<Structure, BridgeError> {
        Ok(self
            .structures
            .delete_structure(id, self.storage.as_mut())?)
    }
}

/// Errors from the WASM bridge layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("please enter a name")]
    EmptyName,

    #[error("name is {length} characters long, the limit is {max}")]
    NameTooLong { length: usize, max: usize },

    #[error("no shape has been generated yet")]
    NothingGenerated,

    #[error("no saved shape named {name:?}")]
    UnknownShape { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
