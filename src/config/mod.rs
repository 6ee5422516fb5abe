//! Configuration module
//!
//! Handles configuration files and environment variable overrides.

pub mod env;
pub mod file;

pub use env::EnvConfig;
pub use file::{AxisConfig, CaseConfig, ConfigFile, DataConfig};
