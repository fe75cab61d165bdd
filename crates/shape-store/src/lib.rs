pub mod clock;
pub mod errors;
pub mod gallery;
pub mod snapshot;
pub mod storage;
pub mod structures;
pub mod subscribers;
pub mod working_set;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{SnapshotError, StorageError, StoreError};
pub use gallery::Gallery;
pub use snapshot::{GALLERY_KEY, STRUCTURES_KEY};
pub use storage::{MemoryStorage, Storage};
pub use structures::StructureStore;
pub use subscribers::SubscriptionId;
pub use working_set::{PlacementBounds, WorkingSet};
