/// Core error types for Tempo Player
use thiserror::Error;

use crate::types::TrackId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tempo Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Two catalog entries share an id
    #[error("Duplicate track id in catalog: {0}")]
    DuplicateTrack(TrackId),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
