//! Platform-agnostic audio output trait
//!
//! The controller drives a single output device through fire-and-forget
//! commands. Results come back later as [`OutputEvent`]s, each tagged with
//! the [`SessionTag`] that was handed to [`AudioOutput::load`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tempo_core::TrackId;

use crate::error::{PlaybackError, Result};

/// Identifies one load of one track on the output
///
/// The generation increases on every load, so two loads of the same track
/// still get distinct tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionTag {
    /// Track being played by the session
    pub track_id: TrackId,

    /// Load counter
    pub generation: u64,
}

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.track_id, self.generation)
    }
}

/// Audio output device
///
/// Implementors decode and play a single audio asset at a time. Commands
/// must not block on decoding; an `Err` means the command was refused
/// outright (e.g. the device is gone), not that loading failed later.
pub trait AudioOutput: Send {
    /// Replace whatever is loaded with `audio_ref`
    ///
    /// Every event caused by this load must carry `session`.
    fn load(&mut self, session: SessionTag, audio_ref: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position in seconds
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set the device level (0.0-1.0)
    fn set_output_volume(&mut self, fraction: f32) -> Result<()>;
}

/// Command as issued to an output
///
/// Used by channel-backed outputs and by [`RecordingOutput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputCommand {
    /// Load an audio asset for a new session
    Load {
        /// Session the load belongs to
        session: SessionTag,
        /// Audio locator
        audio_ref: String,
    },

    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Seek to position (in seconds)
    Seek(f64),

    /// Set device level (0.0-1.0)
    SetVolume(f32),
}

/// Event reported by an output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    /// Session that produced the event
    pub session: SessionTag,

    /// What happened
    pub kind: OutputEventKind,
}

impl OutputEvent {
    /// Create a new event
    pub fn new(session: SessionTag, kind: OutputEventKind) -> Self {
        Self { session, kind }
    }
}

/// Kinds of output events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputEventKind {
    /// Current playback position (in seconds)
    TimeUpdate(f64),

    /// Duration is known (in seconds)
    MetadataLoaded(f64),

    /// Reached the end of the asset
    Ended,

    /// Load or decode failure
    Error(String),
}

/// Output that plays nothing and records every command
///
/// Useful for headless runs and tests. Can be told to refuse the next
/// command to exercise failure handling.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    commands: Vec<OutputCommand>,
    refuse_next: Option<String>,
}

impl RecordingOutput {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far
    pub fn commands(&self) -> &[OutputCommand] {
        &self.commands
    }

    /// Take and clear the recorded commands
    pub fn take_commands(&mut self) -> Vec<OutputCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `Load` commands received
    pub fn load_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, OutputCommand::Load { .. }))
            .count()
    }

    /// Session of the most recent `Load`
    pub fn last_session(&self) -> Option<SessionTag> {
        self.commands.iter().rev().find_map(|c| match c {
            OutputCommand::Load { session, .. } => Some(*session),
            _ => None,
        })
    }

    /// Refuse the next command with the given reason
    pub fn refuse_next(&mut self, reason: impl Into<String>) {
        self.refuse_next = Some(reason.into());
    }

    fn record(&mut self, command: OutputCommand) -> Result<()> {
        if let Some(reason) = self.refuse_next.take() {
            return Err(PlaybackError::output(reason));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl AudioOutput for RecordingOutput {
    fn load(&mut self, session: SessionTag, audio_ref: &str) -> Result<()> {
        self.record(OutputCommand::Load {
            session,
            audio_ref: audio_ref.to_string(),
        })
    }

    fn play(&mut self) -> Result<()> {
        self.record(OutputCommand::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.record(OutputCommand::Pause)
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        self.record(OutputCommand::Seek(seconds))
    }

    fn set_output_volume(&mut self, fraction: f32) -> Result<()> {
        self.record(OutputCommand::SetVolume(fraction))
    }
}
