//! Interactive transport commands
//!
//! One command per stdin line, e.g. `select 3`, `seek 40`, `volume 75`.

use std::str::FromStr;
use tempo_core::TrackId;
use tempo_playback::{AudioOutput, PointerTarget, TransportController};

use crate::error::CliError;

/// Help text printed by `help`
pub const HELP: &str = "\
commands:
  list                      show the catalog
  select <id>               play a track (again to toggle pause)
  toggle | play | pause     transport
  next | prev               skip
  seek <percent>            jump within the track
  volume <percent>          set volume (unmutes)
  mute | shuffle | repeat | like
  click <seek|volume> <x> <left> <width>
                            pointer on a bar
  status                    print the transport line
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Select(TrackId),
    Toggle,
    Play,
    Pause,
    Next,
    Previous,
    /// Percent of the track, 0-100
    Seek(f64),
    /// Percent volume, 0-100
    Volume(f32),
    Mute,
    Shuffle,
    Repeat,
    Like,
    Click {
        target: PointerTarget,
        x: f64,
        left: f64,
        width: f64,
    },
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::InvalidCommand("empty line".to_string()));
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("list" | "ls", []) => Command::List,
            ("select" | "s", [id]) => Command::Select(TrackId::new(parse(id)?)),
            ("toggle" | "t", []) => Command::Toggle,
            ("play", []) => Command::Play,
            ("pause", []) => Command::Pause,
            ("next" | "n", []) => Command::Next,
            ("prev" | "previous" | "p", []) => Command::Previous,
            ("seek", [percent]) => Command::Seek(parse(percent)?),
            ("volume" | "vol", [percent]) => Command::Volume(parse(percent)?),
            ("mute", []) => Command::Mute,
            ("shuffle", []) => Command::Shuffle,
            ("repeat", []) => Command::Repeat,
            ("like", []) => Command::Like,
            ("click", [target, x, left, width]) => Command::Click {
                target: parse_target(target)?,
                x: parse(x)?,
                left: parse(left)?,
                width: parse(width)?,
            },
            ("status", []) => Command::Status,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ => return Err(CliError::InvalidCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

impl Command {
    /// Apply a transport command to the controller
    ///
    /// Returns false for commands the controller does not handle (list,
    /// status, help, quit).
    pub fn apply<O: AudioOutput>(&self, controller: &mut TransportController<O>) -> bool {
        match *self {
            Command::Select(id) => controller.select_track_by_id(id),
            Command::Toggle => controller.play_pause(),
            Command::Play => controller.play(),
            Command::Pause => controller.pause(),
            Command::Next => controller.next(),
            Command::Previous => controller.previous(),
            Command::Seek(percent) => controller.seek_to_fraction(percent / 100.0),
            Command::Volume(percent) => controller.set_volume_fraction(percent / 100.0),
            Command::Mute => controller.toggle_mute(),
            Command::Shuffle => controller.toggle_shuffle(),
            Command::Repeat => controller.cycle_repeat_mode(),
            Command::Like => controller.toggle_like(),
            Command::Click {
                target,
                x,
                left,
                width,
            } => controller.apply_pointer(target, x, left, width),
            Command::List | Command::Status | Command::Help | Command::Quit => return false,
        }
        true
    }
}

fn parse<T: FromStr>(word: &str) -> Result<T, CliError> {
    word.parse()
        .map_err(|_| CliError::InvalidCommand(format!("not a number: {}", word)))
}

fn parse_target(word: &str) -> Result<PointerTarget, CliError> {
    match word {
        "seek" => Ok(PointerTarget::Seek),
        "volume" | "vol" => Ok(PointerTarget::Volume),
        other => Err(CliError::InvalidCommand(format!(
            "unknown bar: {} (expected seek or volume)",
            other
        ))),
    }
}
