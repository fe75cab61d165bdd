/// Errors raised by a key-value storage backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key:?} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors reading a persisted snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot {key:?}: {reason}")]
    Parse { key: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from gallery and structure operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("cannot save a structure with no shapes")]
    EmptyStructure,

    #[error("shape not found: {id}")]
    ShapeNotFound { id: i64 },

    #[error("structure not found: {id}")]
    StructureNotFound { id: i64 },

    #[error("no id left after {last}")]
    IdsExhausted { last: i64 },

    #[error("failed to serialize {key:?}: {reason}")]
    Serialization { key: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
