//! Tempo Player - Transport Control
//!
//! Platform-agnostic transport control for Tempo Player.
//!
//! This crate provides:
//! - Transport controller (select, play/pause, skip, seek)
//! - Deferred playback start until the output reports metadata
//! - Session tagging so events from a replaced track are discarded
//! - Next/previous selection with shuffle and repeat (Off, All, One)
//! - Volume and mute (mute keeps the stored level)
//! - Progress projection (percentages, `M:SS` labels, pointer fractions)
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `tempo-playback` does no audio work itself. The decode/output device is
//! provided through the [`AudioOutput`] trait: commands go out as
//! fire-and-forget calls, results come back as tagged [`OutputEvent`]s
//! which the host feeds to [`TransportController::handle_output_event`].
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use std::sync::Arc;
//! use tempo_core::{Catalog, Track};
//! use tempo_playback::{
//!     OutputEvent, OutputEventKind, PlaybackConfig, RecordingOutput, TransportController,
//!     TransportStatus,
//! };
//!
//! let catalog = Catalog::new(vec![
//!     Track::new(1, "Blue Hour", "audio/blue-hour.mp3"),
//!     Track::new(2, "Night Drive", "audio/night-drive.mp3"),
//! ])
//! .unwrap();
//!
//! let mut player = TransportController::new(
//!     Arc::new(catalog),
//!     RecordingOutput::new(),
//!     PlaybackConfig::default(),
//! );
//!
//! // Selecting loads the track; playback waits for metadata
//! let first = player.catalog().tracks()[0].clone();
//! player.select_track(&first);
//! assert_eq!(player.status(), TransportStatus::Loading);
//!
//! // The output reports the duration and playback starts
//! let session = player.session().unwrap();
//! player.handle_output_event(OutputEvent::new(session, OutputEventKind::MetadataLoaded(240.0)));
//! assert_eq!(player.status(), TransportStatus::Playing);
//!
//! player.seek_to_fraction(0.5);
//! assert_eq!(player.snapshot().position_label, "2:00");
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use std::sync::Arc;
//! use tempo_core::Catalog;
//! use tempo_playback::{PlaybackConfig, RecordingOutput, RepeatMode, TransportController};
//!
//! let mut player = TransportController::new(
//!     Arc::new(Catalog::default()),
//!     RecordingOutput::new(),
//!     PlaybackConfig::default(),
//! );
//!
//! player.toggle_shuffle();
//! player.cycle_repeat_mode();
//! assert!(player.state().shuffle_enabled);
//! assert_eq!(player.state().repeat_mode, RepeatMode::All);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod error;
pub mod events;
pub mod output;
pub mod progress;
pub mod selection;
pub mod types;
mod volume;

// Public exports
pub use controller::TransportController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{
    AudioOutput, OutputCommand, OutputEvent, OutputEventKind, RecordingOutput, SessionTag,
};
pub use progress::{format_time, fraction_from_pointer, progress_percent, PointerTarget};
pub use selection::SelectionPolicy;
pub use types::{PlaybackConfig, PlaybackSnapshot, PlaybackState, RepeatMode, TransportStatus};
pub use volume::Volume;
