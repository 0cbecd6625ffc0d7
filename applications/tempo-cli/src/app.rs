//! Interactive player loop
//!
//! The controller lives on the calling thread. Stdin lines and device
//! events arrive over channels and are handled one at a time.

use crossbeam_channel::{unbounded, Receiver};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;
use tempo_core::Catalog;
use tempo_playback::{AudioOutput, OutputEvent, TransportController};
use tracing::{debug, info};

use crate::commands::{Command, HELP};
use crate::config::AppConfig;
use crate::device::SimulatedDevice;
use crate::display::{catalog_listing, event_line, transport_line};
use crate::error::{CliError, Result};

/// Controller plus the terminal it reports to
pub struct App<O: AudioOutput, W: Write> {
    controller: TransportController<O>,
    out: W,
}

impl<O: AudioOutput, W: Write> App<O, W> {
    /// Wrap a controller and the writer transport output goes to
    pub fn new(controller: TransportController<O>, out: W) -> Self {
        Self { controller, out }
    }

    /// The transport controller
    pub fn controller(&self) -> &TransportController<O> {
        &self.controller
    }

    /// Everything written so far
    pub fn out(&self) -> &W {
        &self.out
    }

    /// Handle one line of input
    ///
    /// Returns `Ok(false)` when the listener asked to quit. Unknown commands
    /// are reported and ignored.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{} (try `help`)", e)?;
                return Ok(true);
            }
        };

        debug!(?command, "Command");
        if command.apply(&mut self.controller) {
            self.flush_events()?;
            return Ok(true);
        }

        match command {
            Command::List => {
                let listing = catalog_listing(
                    self.controller.catalog(),
                    self.controller.state().current_track_id,
                );
                writeln!(self.out, "{}", listing)?;
            }
            Command::Status => self.print_transport()?,
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(false),
            _ => {}
        }

        Ok(true)
    }

    /// Feed an output event to the controller
    pub fn handle_output_event(&mut self, event: OutputEvent) -> Result<()> {
        self.controller.handle_output_event(event);
        self.flush_events()
    }

    /// Print drained events, then the transport line if anything besides
    /// progress changed
    fn flush_events(&mut self) -> Result<()> {
        let events = self.controller.drain_events();
        let mut changed = false;

        for event in &events {
            if event.is_progress() {
                continue;
            }
            changed = true;
            if let Some(line) = event_line(event, self.controller.catalog()) {
                writeln!(self.out, "{}", line)?;
            }
        }

        if changed {
            self.print_transport()?;
        }
        Ok(())
    }

    fn print_transport(&mut self) -> Result<()> {
        let line = transport_line(&self.controller.snapshot(), self.controller.current_track());
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}

/// Run the interactive player on stdin/stdout until `quit` or end of input
pub fn run(config: &AppConfig) -> Result<()> {
    let catalog = Arc::new(Catalog::load(&config.catalog.path)?);
    info!(tracks = catalog.len(), "Catalog loaded");

    let (device, device_events) = SimulatedDevice::spawn(&catalog, &config.output)?;
    let controller = TransportController::new(catalog, device, config.playback.clone());
    let mut app = App::new(controller, std::io::stdout());

    writeln!(app.out, "{}", HELP)?;
    let lines = spawn_stdin_reader()?;

    loop {
        crossbeam_channel::select! {
            recv(lines) -> line => {
                // End of input
                let Ok(line) = line else { break };
                if !app.handle_line(&line)? {
                    break;
                }
            }
            recv(device_events) -> event => {
                let event = event.map_err(|_| CliError::DeviceStopped)?;
                app.handle_output_event(event)?;
            }
        }
    }

    info!("Exiting");
    Ok(())
}

/// Read stdin lines on a background thread
fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (line_tx, line_rx) = unbounded();

    thread::Builder::new()
        .name("tempo-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    Ok(line_rx)
}
