//! Tempo CLI - headless player driven from the terminal

pub mod app;
pub mod commands;
pub mod config;
pub mod device;
pub mod display;
pub mod error;

pub use app::App;
pub use config::AppConfig;
pub use device::SimulatedDevice;
pub use error::{CliError, Result};
