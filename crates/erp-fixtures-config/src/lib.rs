// crates/erp-fixtures-config/src/lib.rs
// ============================================================================
// Module: ERP Fixtures Config Library
// Description: Configuration model for ERP test-data fixtures.
// Purpose: Resolve the REST endpoint and window layout used by fixture builders.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Fixture configuration is read from an optional TOML file and then overridden
//! by environment variables. The result is validated before use.
//! Invariants:
//! - Loaded configurations always pass [`FixtureConfig::validate`].
//! - Environment values are strict UTF-8 and non-empty.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use config::BPartnerWindowConfig;
pub use config::ConfigError;
pub use config::FixtureConfig;
pub use env::FixtureEnv;
pub use env::read_env_strict;
