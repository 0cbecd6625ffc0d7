/// Player configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempo_playback::PlaybackConfig;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tempo.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_output")]
    pub output: OutputSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,
}

/// Simulated output device timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    /// Interval between time updates
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Delay between a load and its metadata event
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,

    /// Playback speed multiplier (2.0 plays a track in half the time)
    #[serde(default = "default_speed")]
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tempo.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (TEMPO_PLAYBACK__VOLUME=0.5)
        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.tick_ms == 0 {
            return Err(CliError::Config(
                "output.tick_ms must be greater than zero".to_string(),
            ));
        }

        if !(self.output.speed.is_finite() && self.output.speed > 0.0) {
            return Err(CliError::Config(format!(
                "output.speed must be positive, got {}",
                self.output.speed
            )));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 1, got {}",
                self.playback.volume
            )));
        }

        Ok(())
    }
}

// Default values
fn default_output() -> OutputSettings {
    OutputSettings {
        tick_ms: default_tick_ms(),
        load_delay_ms: default_load_delay_ms(),
        speed: default_speed(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_load_delay_ms() -> u64 {
    150
}

fn default_speed() -> f64 {
    1.0
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        path: default_catalog_path(),
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

impl Default for OutputSettings {
    fn default() -> Self {
        default_output()
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        default_catalog()
    }
}
