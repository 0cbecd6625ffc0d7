//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! an event for every actual state mutation; the presentation layer drains
//! the queue after each command or output event.

use serde::{Deserialize, Serialize};
use tempo_core::TrackId;

use crate::types::{RepeatMode, TransportStatus};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport status or play intent changed
    StateChanged {
        /// New session status
        status: TransportStatus,
        /// Whether the listener wants audio playing
        is_playing: bool,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position moved (output time update or optimistic seek)
    PositionUpdate {
        /// Current playback position in seconds
        position_secs: f64,
        /// Total track duration in seconds
        duration_secs: f64,
    },

    /// Track duration became known
    DurationChanged {
        /// Duration in seconds
        duration_secs: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle state
        enabled: bool,
    },

    /// Repeat mode cycled
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Heart button toggled
    LikeChanged {
        /// New like state
        liked: bool,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether the event only reports time progress
    ///
    /// Presentation layers that redraw on every tick can use this to skip
    /// full refreshes.
    pub fn is_progress(&self) -> bool {
        matches!(
            self,
            PlaybackEvent::PositionUpdate { .. } | PlaybackEvent::DurationChanged { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_events() {
        assert!(PlaybackEvent::PositionUpdate {
            position_secs: 1.0,
            duration_secs: 2.0
        }
        .is_progress());
        assert!(!PlaybackEvent::LikeChanged { liked: true }.is_progress());
    }

    #[test]
    fn event_serialization() {
        let event = PlaybackEvent::TrackChanged {
            track_id: TrackId::new(3),
            previous_track_id: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("TrackChanged"));

        let back: PlaybackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
