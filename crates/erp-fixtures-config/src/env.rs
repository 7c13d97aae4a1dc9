// crates/erp-fixtures-config/src/env.rs
// ============================================================================
// Module: Fixture Environment
// Description: Environment-backed overrides for fixture configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and blank values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for fixture configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureEnv {
    /// Optional path to a TOML configuration file.
    ConfigPath,
    /// Optional REST API base URL override.
    ApiUrl,
    /// Optional request timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl FixtureEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "ERP_FIXTURES_CONFIG",
            Self::ApiUrl => "ERP_FIXTURES_API_URL",
            Self::TimeoutSeconds => "ERP_FIXTURES_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Overrides collected from the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct EnvOverrides {
    /// Optional config file path.
    pub(crate) config_path: Option<PathBuf>,
    /// Optional API URL override.
    pub(crate) api_url: Option<String>,
    /// Optional request timeout override.
    pub(crate) request_timeout: Option<Duration>,
}

impl EnvOverrides {
    /// Reads all fixture overrides from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is not UTF-8, is blank, or
    /// fails to parse.
    pub(crate) fn read() -> Result<Self, ConfigError> {
        let config_path = read_env_nonempty(FixtureEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let api_url = read_env_nonempty(FixtureEnv::ApiUrl.as_str())?;
        let request_timeout = read_env_nonempty(FixtureEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(FixtureEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            config_path,
            api_url,
            request_timeout,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
