//! Core types for transport control

use serde::{Deserialize, Serialize};
use tempo_core::TrackId;

use crate::progress::{format_time, progress_percent};
use crate::volume::Volume;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    Off,

    /// Wrap around to the first track
    All,

    /// Replay the current track
    One,
}

impl RepeatMode {
    /// Next mode in the repeat button cycle: Off → All → One → Off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Transport status of the current track session
///
/// `Idle → Loading → Ready → Playing ⇄ Paused`. A session that hits an
/// output error parks in `Failed` until the track is selected again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// Nothing selected yet
    #[default]
    Idle,

    /// Output is loading the track; metadata not yet known
    Loading,

    /// Metadata loaded, playback not started
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track or stopped at the end of the catalog
    Paused,

    /// Output reported an error for this session
    Failed,
}

impl TransportStatus {
    /// Whether the output has metadata for the session and accepts play/pause
    pub fn is_loaded(self) -> bool {
        matches!(
            self,
            TransportStatus::Ready | TransportStatus::Playing | TransportStatus::Paused
        )
    }
}

/// Configuration for the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// Initial shuffle state (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Fixed seed for shuffle picks (default: OS entropy)
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            shuffle_seed: None,
        }
    }
}

/// Playback state owned by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Selected track, `None` until the first selection
    pub current_track_id: Option<TrackId>,

    /// Status of the current track session
    pub status: TransportStatus,

    /// Whether the listener wants audio playing
    ///
    /// Can be true while `status` is `Loading`; playback starts once
    /// metadata arrives.
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_secs: f64,

    /// Track duration in seconds (0 until metadata arrives)
    pub duration_secs: f64,

    /// Volume and mute state
    pub volume: Volume,

    /// Random next-track selection
    pub shuffle_enabled: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Heart button state for this app session
    pub is_liked: bool,
}

impl PlaybackState {
    /// Initial state for a given configuration
    pub fn new(config: &PlaybackConfig) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        Self {
            current_track_id: None,
            status: TransportStatus::Idle,
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume,
            shuffle_enabled: config.shuffle,
            repeat_mode: config.repeat,
            is_liked: false,
        }
    }

    /// Level pushed to the output
    pub fn effective_volume(&self) -> f32 {
        self.volume.effective()
    }

    /// Progress bar fill in percent
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.position_secs, self.duration_secs)
    }

    /// Elapsed time label
    pub fn position_label(&self) -> String {
        format_time(self.position_secs)
    }

    /// Total time label
    pub fn duration_label(&self) -> String {
        format_time(self.duration_secs)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

/// Read-only copy of the playback state with display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Raw state
    #[serde(flatten)]
    pub state: PlaybackState,

    /// Progress bar fill in percent
    pub progress_percent: f64,

    /// Elapsed time, `M:SS`
    pub position_label: String,

    /// Total time, `M:SS`
    pub duration_label: String,

    /// Level pushed to the output
    pub effective_volume: f32,

    /// Message of the last playback error, if the session failed
    pub last_error: Option<String>,
}

impl PlaybackSnapshot {
    /// Derive display values from a state
    pub fn new(state: &PlaybackState, last_error: Option<String>) -> Self {
        Self {
            state: state.clone(),
            progress_percent: state.progress_percent(),
            position_label: state.position_label(),
            duration_label: state.duration_label(),
            effective_volume: state.effective_volume(),
            last_error,
        }
    }
}
