// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{BuildConfig, BuildConfigRecord};
use crate::errors::ConfigError;

/// Load a configuration file from a given path and return the raw
/// `BuildConfigRecord`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<BuildConfigRecord, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

    let record: BuildConfigRecord = toml::from_str(&contents)?;

    Ok(record)
}

/// Load a configuration file from path and run full validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML (missing fields filled from the default configuration).
/// - Parses the architecture and variant strings into their enums.
/// - Checks the non-emptiness rules (components, mirror, hostname, username).
///
/// An invalid file fails here and never produces a `BuildConfig`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<BuildConfig, ConfigError> {
    let record = load_from_path(&path)?;
    BuildConfig::try_from(record)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `SidBuild.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("SidBuild.toml")
}
