use thiserror::Error;

/// Errors produced by store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("item with id {id} not found")]
    NotFound { id: String },

    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("version conflict on item {id}: supplied {supplied}, current {current}")]
    VersionConflict {
        id: String,
        supplied: u64,
        current: u64,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
