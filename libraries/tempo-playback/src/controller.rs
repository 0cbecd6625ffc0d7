//! Transport controller - core orchestration
//!
//! Owns the playback state and mediates between listener commands and the
//! audio output. Commands never return errors: failures are logged, kept as
//! the last error and reported through the event queue.

use std::sync::Arc;

use tempo_core::{Catalog, Track, TrackId};
use tracing::{debug, info, warn};

use crate::{
    error::PlaybackError,
    events::PlaybackEvent,
    output::{AudioOutput, OutputEvent, OutputEventKind, SessionTag},
    progress::{clamp_fraction, fraction_from_pointer, PointerTarget},
    selection::SelectionPolicy,
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState, TransportStatus},
};

/// Transport controller
///
/// Single mutator of [`PlaybackState`]. Each track load opens a new output
/// session; output events carrying any other session tag are discarded.
pub struct TransportController<O: AudioOutput> {
    catalog: Arc<Catalog>,
    output: O,
    selection: SelectionPolicy,
    state: PlaybackState,

    /// Session currently attached to the output
    session: Option<SessionTag>,

    /// Last issued session generation
    generation: u64,

    last_error: Option<PlaybackError>,

    /// Events waiting to be drained by the presentation layer
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> TransportController<O> {
    /// Create a controller with nothing selected
    ///
    /// Shuffle picks use `config.shuffle_seed` when set, OS entropy
    /// otherwise.
    pub fn new(catalog: Arc<Catalog>, output: O, config: PlaybackConfig) -> Self {
        let selection = match config.shuffle_seed {
            Some(seed) => SelectionPolicy::seeded(seed),
            None => SelectionPolicy::from_entropy(),
        };

        Self {
            catalog,
            output,
            selection,
            state: PlaybackState::new(&config),
            session: None,
            generation: 0,
            last_error: None,
            pending_events: Vec::new(),
        }
    }

    /// Replace the selection policy
    #[must_use]
    pub fn with_selection_policy(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    // ===== Selection =====

    /// Select a track from the catalog
    ///
    /// Selecting the current track toggles play/pause without reloading.
    /// Any other track replaces the session and starts playing once the
    /// output reports metadata.
    pub fn select_track(&mut self, track: &Track) {
        self.select_track_by_id(track.id);
    }

    /// Select a track by id
    pub fn select_track_by_id(&mut self, track_id: TrackId) {
        if !self.catalog.contains(track_id) {
            self.fail(PlaybackError::InvalidSelection(track_id));
            return;
        }

        if self.state.current_track_id == Some(track_id)
            && self.state.status != TransportStatus::Failed
        {
            self.set_play_intent(!self.state.is_playing);
            return;
        }

        self.start_session(track_id);
    }

    /// Skip to the track chosen by the selection policy
    ///
    /// Stops at the end of the catalog unless repeat is on.
    pub fn next(&mut self) {
        let Some(current) = self.state.current_track_id else {
            return;
        };

        let next = self
            .selection
            .next(
                &self.catalog,
                Some(current),
                self.state.shuffle_enabled,
                self.state.repeat_mode,
            )
            .map(|track| track.id);

        match next {
            Some(id) if id == current => self.restart_session(),
            Some(id) => self.start_session(id),
            None => self.stop_at_end(),
        }
    }

    /// Skip to the previous track in catalog order
    pub fn previous(&mut self) {
        let Some(current) = self.state.current_track_id else {
            return;
        };

        let previous = self
            .selection
            .previous(&self.catalog, Some(current))
            .map(|track| track.id);

        match previous {
            Some(id) if id == current => self.restart_session(),
            Some(id) => self.start_session(id),
            None => {}
        }
    }

    // ===== Transport =====

    /// Toggle between playing and paused
    ///
    /// No-op when nothing is selected. Resuming a failed session reloads it.
    pub fn play_pause(&mut self) {
        if self.state.current_track_id.is_none() {
            return;
        }

        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        let Some(current) = self.state.current_track_id else {
            return;
        };

        if self.state.status == TransportStatus::Failed {
            info!(track_id = %current, "Retrying failed track");
            self.start_session(current);
            return;
        }

        self.set_play_intent(true);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state.current_track_id.is_some() {
            self.set_play_intent(false);
        }
    }

    /// Seek to a fraction of the track
    ///
    /// Ignored until the duration is known. The position is updated
    /// immediately without waiting for the output.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let fraction = clamp_fraction(fraction);
        let duration = self.state.duration_secs;

        if duration <= 0.0 || self.state.status == TransportStatus::Failed {
            return;
        }

        let target = fraction * duration;
        if let Err(e) = self.output.seek(target) {
            self.fail_session(e);
            return;
        }

        debug!(position = target, "Seek");
        self.state.position_secs = target;
        self.emit_position_update();
    }

    // ===== Volume =====

    /// Set the volume and unmute
    pub fn set_volume_fraction(&mut self, fraction: f32) {
        let before = self.state.volume;
        self.state.volume.set_level(fraction);
        self.state.volume.unmute();

        if self.state.volume != before {
            self.push_volume();
            self.emit_volume_changed();
        }
    }

    /// Toggle mute (the stored level is kept)
    pub fn toggle_mute(&mut self) {
        self.state.volume.toggle_mute();
        self.push_volume();
        self.emit_volume_changed();
    }

    /// Translate a pointer interaction on the seek or volume bar
    pub fn apply_pointer(
        &mut self,
        target: PointerTarget,
        pointer_x: f64,
        rect_left: f64,
        rect_width: f64,
    ) {
        let fraction = fraction_from_pointer(pointer_x, rect_left, rect_width);
        match target {
            PointerTarget::Seek => self.seek_to_fraction(fraction),
            PointerTarget::Volume => self.set_volume_fraction(fraction as f32),
        }
    }

    // ===== Modes =====

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle_enabled = !self.state.shuffle_enabled;
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.state.shuffle_enabled,
        });
    }

    /// Cycle repeat mode: Off → All → One → Off
    pub fn cycle_repeat_mode(&mut self) {
        self.state.repeat_mode = self.state.repeat_mode.cycle();
        self.pending_events.push(PlaybackEvent::RepeatChanged {
            mode: self.state.repeat_mode,
        });
    }

    /// Toggle the heart button
    pub fn toggle_like(&mut self) {
        self.state.is_liked = !self.state.is_liked;
        self.pending_events.push(PlaybackEvent::LikeChanged {
            liked: self.state.is_liked,
        });
    }

    // ===== Output events =====

    /// Dispatch an output event to its handler
    pub fn handle_output_event(&mut self, event: OutputEvent) {
        let OutputEvent { session, kind } = event;
        match kind {
            OutputEventKind::TimeUpdate(seconds) => self.on_time_update(session, seconds),
            OutputEventKind::MetadataLoaded(duration) => self.on_metadata_loaded(session, duration),
            OutputEventKind::Ended => self.on_ended(session),
            OutputEventKind::Error(reason) => self.on_error(session, reason),
        }
    }

    /// Output reported the current position
    pub fn on_time_update(&mut self, session: SessionTag, seconds: f64) {
        if !self.is_current(session, "time update") {
            return;
        }

        if !seconds.is_finite() || self.state.status == TransportStatus::Failed {
            return;
        }

        let mut position = seconds.max(0.0);
        if self.state.duration_secs > 0.0 {
            position = position.min(self.state.duration_secs);
        }

        if position != self.state.position_secs {
            self.state.position_secs = position;
            self.emit_position_update();
        }
    }

    /// Output knows the track duration
    ///
    /// Starts playback if the listener asked for it while loading.
    pub fn on_metadata_loaded(&mut self, session: SessionTag, duration: f64) {
        if !self.is_current(session, "metadata") {
            return;
        }

        if self.state.status == TransportStatus::Failed {
            return;
        }

        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };

        if duration != self.state.duration_secs {
            self.state.duration_secs = duration;
            if duration > 0.0 {
                self.state.position_secs = self.state.position_secs.min(duration);
            }
            self.pending_events.push(PlaybackEvent::DurationChanged {
                duration_secs: duration,
            });
        }

        if self.state.status != TransportStatus::Loading {
            return;
        }

        debug!(session = %session, duration, "Metadata loaded");
        let before = self.state_key();
        self.state.status = TransportStatus::Ready;

        if self.state.is_playing {
            if let Err(e) = self.output.play() {
                self.fail_session(e);
                return;
            }
            self.state.status = TransportStatus::Playing;
        }

        self.emit_state_if_changed(before);
    }

    /// Output reached the end of the track
    pub fn on_ended(&mut self, session: SessionTag) {
        if !self.is_current(session, "ended") {
            return;
        }

        if self.state.status == TransportStatus::Failed {
            return;
        }

        debug!(session = %session, "Track ended");
        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: session.track_id,
        });
        self.next();
    }

    /// Output failed to load or play the track
    pub fn on_error(&mut self, session: SessionTag, reason: String) {
        if !self.is_current(session, "error") {
            return;
        }

        let error = self.session_error(reason);
        self.fail(error);
    }

    // ===== Accessors =====

    /// Read-only copy of the state with display values
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::new(
            &self.state,
            self.last_error.as_ref().map(ToString::to_string),
        )
    }

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Status of the current session
    pub fn status(&self) -> TransportStatus {
        self.state.status
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_track_id
            .and_then(|id| self.catalog.find(id))
    }

    /// Session attached to the output
    pub fn session(&self) -> Option<SessionTag> {
        self.session
    }

    /// Catalog being played
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Audio output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable audio output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Most recent playback error, cleared on the next load
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Attach a new output session for `track_id` and request playback
    fn start_session(&mut self, track_id: TrackId) {
        let catalog = Arc::clone(&self.catalog);
        let Some(track) = catalog.find(track_id) else {
            self.fail(PlaybackError::InvalidSelection(track_id));
            return;
        };

        self.generation += 1;
        let session = SessionTag {
            track_id,
            generation: self.generation,
        };

        let before = self.state_key();
        let previous = self.state.current_track_id.replace(track_id);
        self.session = Some(session);
        self.last_error = None;
        self.state.status = TransportStatus::Loading;
        self.state.is_playing = true;
        self.state.position_secs = 0.0;
        self.state.duration_secs = 0.0;

        if previous != Some(track_id) {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id,
                previous_track_id: previous,
            });
        }

        info!(
            track_id = %track_id,
            generation = session.generation,
            audio_ref = %track.audio_ref,
            "Loading track"
        );

        if let Err(e) = self.output.load(session, &track.audio_ref) {
            self.fail_session(e);
            return;
        }

        self.push_volume();
        self.emit_state_if_changed(before);
        self.emit_position_update();
    }

    /// Rewind the current session and play it again
    fn restart_session(&mut self) {
        let Some(current) = self.state.current_track_id else {
            return;
        };

        match self.state.status {
            TransportStatus::Failed | TransportStatus::Idle => self.start_session(current),
            TransportStatus::Loading => self.set_play_intent(true),
            TransportStatus::Ready | TransportStatus::Playing | TransportStatus::Paused => {
                let before = self.state_key();
                if let Err(e) = self.output.seek(0.0).and_then(|()| self.output.play()) {
                    self.fail_session(e);
                    return;
                }

                debug!(track_id = %current, "Restarting track");
                self.state.position_secs = 0.0;
                self.state.is_playing = true;
                self.state.status = TransportStatus::Playing;
                self.emit_state_if_changed(before);
                self.emit_position_update();
            }
        }
    }

    /// Nothing left to play: pause and rewind
    fn stop_at_end(&mut self) {
        let before = self.state_key();
        self.state.is_playing = false;

        if self.state.status.is_loaded() {
            if let Err(e) = self.output.pause().and_then(|()| self.output.seek(0.0)) {
                self.fail_session(e);
                return;
            }
            self.state.status = TransportStatus::Paused;
        }

        info!("End of catalog reached");
        self.state.position_secs = 0.0;
        self.emit_state_if_changed(before);
        self.emit_position_update();
    }

    /// Record the listener's play intent and forward it if the output is ready
    ///
    /// While loading only the intent changes; metadata arrival acts on it.
    fn set_play_intent(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }

        let before = self.state_key();
        self.state.is_playing = playing;

        if self.state.status.is_loaded() {
            let result = if playing {
                self.output.play()
            } else {
                self.output.pause()
            };

            if let Err(e) = result {
                self.fail_session(e);
                return;
            }

            self.state.status = if playing {
                TransportStatus::Playing
            } else {
                TransportStatus::Paused
            };
        }

        self.emit_state_if_changed(before);
    }

    /// Push the effective volume to the output
    ///
    /// A refused volume command leaves the session usable.
    fn push_volume(&mut self) {
        let level = self.state.effective_volume();
        if let Err(e) = self.output.set_output_volume(level) {
            warn!(error = %e, level, "Output refused volume change");
        }
    }

    /// Fail the current session after the output refused a command
    fn fail_session(&mut self, error: PlaybackError) {
        let reason = match error {
            PlaybackError::Output(reason) => reason,
            other => other.to_string(),
        };
        let error = self.session_error(reason);
        self.fail(error);
    }

    /// Classify an output failure by how far the session got
    fn session_error(&self, reason: String) -> PlaybackError {
        if self.state.status == TransportStatus::Loading {
            let audio_ref = self
                .current_track()
                .map(|track| track.audio_ref.clone())
                .unwrap_or_default();
            PlaybackError::LoadFailure { audio_ref, reason }
        } else {
            PlaybackError::PlaybackFailure(reason)
        }
    }

    /// Stop playback and report an error
    ///
    /// The current track stays selected. Session-fatal errors park the
    /// session in `Failed`; a bad selection only pauses.
    fn fail(&mut self, error: PlaybackError) {
        warn!(error = %error, "Playback error");

        let before = self.state_key();
        self.state.is_playing = false;

        if error.is_session_fatal() {
            self.state.status = TransportStatus::Failed;
        } else if self.state.status == TransportStatus::Playing {
            if let Err(e) = self.output.pause() {
                warn!(error = %e, "Output refused pause");
            }
            self.state.status = TransportStatus::Paused;
        }

        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
        self.last_error = Some(error);
        self.emit_state_if_changed(before);
    }

    /// Whether an output event belongs to the attached session
    fn is_current(&self, session: SessionTag, what: &str) -> bool {
        let current = self.session == Some(session);
        if !current {
            debug!(session = %session, event = what, "Discarding stale output event");
        }
        current
    }

    fn state_key(&self) -> (TransportStatus, bool) {
        (self.state.status, self.state.is_playing)
    }

    fn emit_state_if_changed(&mut self, before: (TransportStatus, bool)) {
        if before != self.state_key() {
            self.pending_events.push(PlaybackEvent::StateChanged {
                status: self.state.status,
                is_playing: self.state.is_playing,
            });
        }
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.state.position_secs,
            duration_secs: self.state.duration_secs,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.state.volume.level(),
            is_muted: self.state.volume.is_muted(),
        });
    }
}

impl<O: AudioOutput + std::fmt::Debug> std::fmt::Debug for TransportController<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportController")
            .field("output", &self.output)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
