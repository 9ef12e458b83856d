//! yaml2gcode Settings Crate
//!
//! Handles configuration files and their translation into emitter options.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings};
pub use error::{SettingsError, SettingsResult};
