// crates/erp-fixtures/src/telemetry.rs
// ============================================================================
// Module: Fixture Telemetry
// Description: Structured logging setup for fixture runs.
// Purpose: Route builder and request events to a fmt subscriber.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Builders log through `tracing`; test binaries call [`init_tracing`] once to
//! see those events. `RUST_LOG` overrides the default filter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "erp_fixtures=info";

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Installs a global fmt subscriber writing to the test output.
///
/// Returns `false` when a global subscriber is already installed; repeated
/// calls are harmless.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init().is_ok()
}
