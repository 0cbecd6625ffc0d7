//! Simulated output device
//!
//! Plays nothing. A worker thread advances a virtual playhead on a timer
//! and reports tagged events back, which is enough to drive the transport
//! controller the way a real decoder would.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashMap;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tempo_core::Catalog;
use tempo_playback::{
    AudioOutput, OutputCommand, OutputEvent, OutputEventKind, PlaybackError, SessionTag,
};
use tracing::{debug, info, warn};

use crate::config::OutputSettings;

/// Handle to the device thread
///
/// Implements [`AudioOutput`] by forwarding commands over a channel.
/// Dropping the handle stops the thread.
pub struct SimulatedDevice {
    command_tx: Option<Sender<OutputCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl SimulatedDevice {
    /// Start the device thread
    ///
    /// Track durations come from the catalog's duration labels. Loading an
    /// audio reference without a usable label fails like a decode error.
    ///
    /// Returns the device and the receiver for its events.
    pub fn spawn(
        catalog: &Catalog,
        settings: &OutputSettings,
    ) -> std::io::Result<(Self, Receiver<OutputEvent>)> {
        let durations = catalog
            .tracks()
            .iter()
            .filter_map(|track| {
                track
                    .duration_hint()
                    .map(|secs| (track.audio_ref.clone(), secs as f64))
            })
            .collect();

        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        let worker = Worker {
            durations,
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            load_delay: Duration::from_millis(settings.load_delay_ms),
            speed: settings.speed,
            event_tx,
            current: None,
        };

        let handle = thread::Builder::new()
            .name("tempo-output".to_string())
            .spawn(move || worker.run(command_rx))?;

        Ok((
            Self {
                command_tx: Some(command_tx),
                worker: Some(handle),
            },
            event_rx,
        ))
    }

    fn send(&self, command: OutputCommand) -> tempo_playback::Result<()> {
        self.command_tx
            .as_ref()
            .ok_or_else(|| PlaybackError::output("output device stopped"))?
            .send(command)
            .map_err(|_| PlaybackError::output("output device stopped"))
    }
}

impl AudioOutput for SimulatedDevice {
    fn load(&mut self, session: SessionTag, audio_ref: &str) -> tempo_playback::Result<()> {
        self.send(OutputCommand::Load {
            session,
            audio_ref: audio_ref.to_string(),
        })
    }

    fn play(&mut self) -> tempo_playback::Result<()> {
        self.send(OutputCommand::Play)
    }

    fn pause(&mut self) -> tempo_playback::Result<()> {
        self.send(OutputCommand::Pause)
    }

    fn seek(&mut self, seconds: f64) -> tempo_playback::Result<()> {
        self.send(OutputCommand::Seek(seconds))
    }

    fn set_output_volume(&mut self, fraction: f32) -> tempo_playback::Result<()> {
        self.send(OutputCommand::SetVolume(fraction))
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.command_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Output thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for SimulatedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedDevice")
            .field("running", &self.command_tx.is_some())
            .finish()
    }
}

/// Asset loaded on the device
struct Loaded {
    session: SessionTag,
    duration: f64,
    position: f64,
    playing: bool,
    /// When metadata becomes available; `None` once reported
    ready_at: Option<Instant>,
}

struct Worker {
    durations: HashMap<String, f64>,
    tick: Duration,
    load_delay: Duration,
    speed: f64,
    event_tx: Sender<OutputEvent>,
    current: Option<Loaded>,
}

impl Worker {
    fn run(mut self, command_rx: Receiver<OutputCommand>) {
        let ticker = crossbeam_channel::tick(self.tick);
        debug!(tick_ms = self.tick.as_millis() as u64, "Output thread started");

        loop {
            crossbeam_channel::select! {
                recv(command_rx) -> msg => {
                    let Ok(command) = msg else { break };
                    self.handle_command(command);
                }
                recv(ticker) -> _ => {
                    if !self.advance(self.tick) {
                        break;
                    }
                }
            }
        }

        debug!("Output thread exited");
    }

    fn handle_command(&mut self, command: OutputCommand) {
        match command {
            OutputCommand::Load { session, audio_ref } => {
                let Some(&duration) = self.durations.get(&audio_ref) else {
                    warn!(audio_ref = %audio_ref, "Cannot decode audio reference");
                    self.current = None;
                    self.emit(
                        session,
                        OutputEventKind::Error(format!("cannot decode {}", audio_ref)),
                    );
                    return;
                };

                info!(session = %session, audio_ref = %audio_ref, duration, "Loaded");
                self.current = Some(Loaded {
                    session,
                    duration,
                    position: 0.0,
                    playing: false,
                    ready_at: Some(Instant::now() + self.load_delay),
                });
            }
            OutputCommand::Play => {
                if let Some(current) = self.current.as_mut() {
                    current.playing = true;
                }
            }
            OutputCommand::Pause => {
                if let Some(current) = self.current.as_mut() {
                    current.playing = false;
                }
            }
            OutputCommand::Seek(seconds) => {
                if let Some(current) = self.current.as_mut() {
                    current.position = seconds.clamp(0.0, current.duration);
                }
            }
            OutputCommand::SetVolume(level) => {
                debug!(level, "Output level");
            }
        }
    }

    /// Move the playhead forward by one tick
    ///
    /// Returns false when the event receiver is gone.
    fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(current) = self.current.as_mut() else {
            return true;
        };
        let session = current.session;

        if let Some(ready_at) = current.ready_at {
            if Instant::now() < ready_at {
                return true;
            }
            current.ready_at = None;
            let duration = current.duration;
            return self.emit(session, OutputEventKind::MetadataLoaded(duration));
        }

        if !current.playing {
            return true;
        }

        current.position = (current.position + elapsed.as_secs_f64() * self.speed)
            .min(current.duration);
        let position = current.position;
        let finished = position >= current.duration;
        if finished {
            current.playing = false;
        }

        if !self.emit(session, OutputEventKind::TimeUpdate(position)) {
            return false;
        }
        if finished {
            return self.emit(session, OutputEventKind::Ended);
        }
        true
    }

    fn emit(&self, session: SessionTag, kind: OutputEventKind) -> bool {
        self.event_tx.send(OutputEvent::new(session, kind)).is_ok()
    }
}
