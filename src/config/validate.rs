// src/config/validate.rs

use crate::config::model::BuildConfig;
use crate::errors::ConfigError;

/// Run semantic validation against a candidate configuration.
///
/// Architecture and variant membership is enforced earlier, when the string
/// forms are parsed into their enums. What remains are the non-emptiness
/// rules:
/// - at least one repository component,
/// - a non-empty mirror URL,
/// - a non-empty hostname,
/// - a non-empty username.
pub(crate) fn validate(config: &BuildConfig) -> Result<(), ConfigError> {
    if config.components().is_empty() {
        return Err(ConfigError::NoComponents);
    }
    if config.mirror().is_empty() {
        return Err(ConfigError::MissingMirror);
    }
    if config.hostname().is_empty() {
        return Err(ConfigError::MissingHostname);
    }
    if config.username().is_empty() {
        return Err(ConfigError::MissingUsername);
    }
    Ok(())
}
