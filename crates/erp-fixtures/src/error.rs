// crates/erp-fixtures/src/error.rs
// ============================================================================
// Module: Fixture Errors
// Description: Error type surfaced by fixture builders.
// Purpose: Carry transport, lookup, and UI failures to the test runner.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`FixtureError`] is the single error surfaced by [`crate::BPartner::apply`].
//! No variant triggers a retry or cleanup; callers report it as a test failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use erp_fixtures_config::ConfigError;
use thiserror::Error;

use crate::lookup::LookupError;
use crate::ui::DetailTab;
use crate::ui::UiError;

// ============================================================================
// SECTION: Fixture Errors
// ============================================================================

/// Errors returned while building fixtures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture configuration is invalid.
    #[error("fixture config failure: {0}")]
    Config(#[from] ConfigError),
    /// Transport failure or client construction failure.
    #[error("http failure: {0}")]
    Http(String),
    /// Server answered with a non-success status.
    #[error("http status {status} for {url}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
    /// Response body could not be decoded.
    #[error("response decode failure: {0}")]
    Decode(String),
    /// Response document is missing an expected field.
    #[error("response is missing field {0}")]
    MissingField(String),
    /// Dropdown value could not be resolved by name.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// UI driver failure.
    #[error(transparent)]
    Ui(#[from] UiError),
    /// Address summary did not show the entered city.
    #[error("address summary '{summary}' does not contain city '{city}'")]
    AddressNotRendered {
        /// Entered city.
        city: String,
        /// Rendered summary text.
        summary: String,
    },
    /// Detail grid row count differs from the queued item count.
    #[error("{tab} grid shows {actual} rows, expected {expected}")]
    GridMismatch {
        /// Detail tab that was checked.
        tab: DetailTab,
        /// Number of queued items.
        expected: usize,
        /// Number of rendered rows.
        actual: usize,
    },
    /// Builder was already persisted.
    #[error("business partner already applied as record {0}")]
    AlreadyApplied(String),
    /// Manual replay requested before the record exists.
    #[error("business partner has not been persisted yet")]
    NotPersisted,
}
