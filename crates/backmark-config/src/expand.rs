//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `$VAR` / `${VAR}` references in a configuration value.
///
/// `field` names the config field for error reporting (e.g. `server.host`).
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] if a referenced variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })
}
