//! Error types for transport control

use tempo_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// None of these escape the controller's command methods. They are
/// logged, kept as the controller's last error and reported through
/// `PlaybackEvent::Error`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The output could not load the given audio reference
    #[error("Failed to load {audio_ref}: {reason}")]
    LoadFailure {
        /// Audio locator that failed
        audio_ref: String,
        /// Reason reported by the output
        reason: String,
    },

    /// The output failed after the track was loaded
    #[error("Playback failed: {0}")]
    PlaybackFailure(String),

    /// Selected track id is not part of the catalog
    #[error("Track {0} is not in the catalog")]
    InvalidSelection(TrackId),

    /// The output refused a command
    #[error("Output error: {0}")]
    Output(String),
}

impl PlaybackError {
    /// Create an output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Whether the error leaves the current session unusable
    pub fn is_session_fatal(&self) -> bool {
        !matches!(self, Self::InvalidSelection(_))
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
