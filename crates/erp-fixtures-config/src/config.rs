// crates/erp-fixtures-config/src/config.rs
// ============================================================================
// Module: Fixture Configuration
// Description: Configuration loading and validation for ERP fixtures.
// Purpose: Provide a typed REST endpoint and window layout with safe defaults.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`FixtureConfig`] describes where the ERP REST API lives and which window
//! and tabs hold business partner data. A missing config file yields defaults;
//! environment overrides are applied last.
//! Invariants:
//! - `api_url` is an absolute `http` or `https` URL without a trailing slash.
//! - Timeouts are strictly positive.
//! - Window id is positive and tab ids are non-empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::env::EnvOverrides;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted size for a configuration file.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

/// Default REST API base URL.
const DEFAULT_API_URL: &str = "http://localhost:8080/rest/api";
/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default business partner window id.
const DEFAULT_BPARTNER_WINDOW_ID: u32 = 123;
/// Default tab holding vendor flags.
const DEFAULT_VENDOR_TAB: &str = "AD_Tab-224";
/// Default tab holding customer flags and dropdowns.
const DEFAULT_CUSTOMER_TAB: &str = "AD_Tab-223";

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Top-level fixture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// REST API base URL (for example `http://localhost:8080/rest/api`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Business partner window layout.
    #[serde(default)]
    pub bpartner_window: BPartnerWindowConfig,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            bpartner_window: BPartnerWindowConfig::default(),
        }
    }
}

/// Window and tab identifiers of the business partner screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BPartnerWindowConfig {
    /// Numeric window id of the business partner screen.
    #[serde(default = "default_window_id")]
    pub window_id: u32,
    /// Tab id exposing the vendor flag.
    #[serde(default = "default_vendor_tab")]
    pub vendor_tab: String,
    /// Tab id exposing the customer flag and customer dropdowns.
    #[serde(default = "default_customer_tab")]
    pub customer_tab: String,
}

impl Default for BPartnerWindowConfig {
    fn default() -> Self {
        Self {
            window_id: DEFAULT_BPARTNER_WINDOW_ID,
            vendor_tab: default_vendor_tab(),
            customer_tab: default_customer_tab(),
        }
    }
}

impl FixtureConfig {
    /// Loads configuration from an optional file and applies env overrides.
    ///
    /// The file path is taken from `path`, then from `ERP_FIXTURES_CONFIG`.
    /// When neither is set, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let overrides = EnvOverrides::read()?;
        let resolved = path.map(Path::to_path_buf).or_else(|| overrides.config_path.clone());
        let mut config = match resolved {
            Some(resolved) => Self::from_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and normalizes the API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let trimmed_len = self.api_url.trim_end_matches('/').len();
        self.api_url.truncate(trimmed_len);
        let url = Url::parse(&self.api_url)
            .map_err(|err| ConfigError::Invalid(format!("api_url is not a valid url: {err}")))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid(format!(
                    "api_url scheme must be http or https, got {scheme}"
                )));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.bpartner_window.validate()
    }

    /// Returns the total request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Reads and parses a configuration file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides on top of file or default values.
    fn apply_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(timeout) = overrides.request_timeout {
            self.request_timeout_secs = timeout.as_secs();
        }
    }
}

impl BPartnerWindowConfig {
    /// Validates window and tab identifiers.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_id == 0 {
            return Err(ConfigError::Invalid(
                "bpartner_window.window_id must be greater than zero".to_string(),
            ));
        }
        if self.vendor_tab.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bpartner_window.vendor_tab must not be empty".to_string(),
            ));
        }
        if self.customer_tab.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bpartner_window.customer_tab must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default API URL for serde.
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Default request timeout for serde.
const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Default connect timeout for serde.
const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Default window id for serde.
const fn default_window_id() -> u32 {
    DEFAULT_BPARTNER_WINDOW_ID
}

/// Default vendor tab for serde.
fn default_vendor_tab() -> String {
    DEFAULT_VENDOR_TAB.to_string()
}

/// Default customer tab for serde.
fn default_customer_tab() -> String {
    DEFAULT_CUSTOMER_TAB.to_string()
}
