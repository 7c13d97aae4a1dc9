// crates/erp-fixtures/src/ui/mod.rs
// ============================================================================
// Module: Manual UI Driver
// Description: Browser-runner interface and manual data-entry procedures.
// Purpose: Enter detail rows the REST API cannot set through the record UI.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! The REST window API cannot add business partner locations, contacts, or
//! bank accounts, so those rows are typed into the record-detail screen.
//! [`UiDriver`] abstracts the browser runner; [`manual`] holds the entry
//! procedures; [`InMemoryUi`] simulates the screen for tests.
//! Invariants:
//! - Every procedure starts by selecting its detail tab.
//! - Each batch is followed by a grid row-count check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::http::RecordId;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod manual;
pub mod memory;

pub use manual::ReplayProgress;
pub use manual::replay_manual_entries;
pub use memory::GridRow;
pub use memory::InMemoryUi;
pub use memory::UiAction;

// ============================================================================
// SECTION: Screen Vocabulary
// ============================================================================

/// Detail tabs of the business partner screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailTab {
    /// Partner locations (`C_BPartner_Location`).
    Locations,
    /// Contacts (`AD_User`).
    Contacts,
    /// Bank accounts (`C_BP_BankAccount`).
    BankAccounts,
}

impl DetailTab {
    /// Returns the tab identifier used by the screen.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locations => "C_BPartner_Location",
            Self::Contacts => "AD_User",
            Self::BankAccounts => "C_BP_BankAccount",
        }
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field lives on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Field of the "add new" modal form.
    Modal,
    /// Field of the address sub-editor opened from the modal.
    AddressEditor,
}

// ============================================================================
// SECTION: Driver Interface
// ============================================================================

/// Browser runner primitives used by manual data entry.
///
/// Implementations wrap a real browser automation session or, for tests,
/// [`InMemoryUi`]. Retry and timeout policy belongs to the implementation.
#[async_trait]
pub trait UiDriver: Send {
    /// Opens the record-detail screen of `record_id` in window `window_id`.
    async fn visit_window(&mut self, window_id: u32, record_id: &RecordId)
    -> Result<(), UiError>;

    /// Switches to a detail tab.
    async fn select_tab(&mut self, tab: DetailTab) -> Result<(), UiError>;

    /// Opens the "add new" modal form on the current tab.
    async fn press_add_new(&mut self) -> Result<(), UiError>;

    /// Types `value` into a text field.
    async fn write_string_field(
        &mut self,
        field: &str,
        value: &str,
        scope: FieldScope,
    ) -> Result<(), UiError>;

    /// Types `query` into a searchable list field and picks `expected`.
    async fn write_lookup_field(
        &mut self,
        field: &str,
        query: &str,
        expected: &str,
        scope: FieldScope,
    ) -> Result<(), UiError>;

    /// Clicks the modal form title, committing the focused field.
    async fn click_form_title(&mut self) -> Result<(), UiError>;

    /// Clicks a checkbox and checks it now reads `expected`.
    async fn click_checkbox(
        &mut self,
        field: &str,
        expected: bool,
        scope: FieldScope,
    ) -> Result<(), UiError>;

    /// Opens the address sub-editor attached to `field`.
    async fn open_address_editor(&mut self, field: &str) -> Result<(), UiError>;

    /// Closes the address sub-editor, keeping its values.
    async fn close_address_editor(&mut self) -> Result<(), UiError>;

    /// Returns the rendered address summary of `field`.
    async fn address_summary(&mut self, field: &str) -> Result<String, UiError>;

    /// Confirms and saves the modal form.
    async fn press_done(&mut self) -> Result<(), UiError>;

    /// Returns the number of rows visible in the current tab's grid.
    async fn grid_row_count(&mut self) -> Result<usize, UiError>;
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures reported by UI drivers.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// No record screen has been opened.
    #[error("no record screen is open")]
    NotNavigated,
    /// No detail tab is selected.
    #[error("no detail tab is selected")]
    NoTabSelected,
    /// A modal form is already open.
    #[error("a modal form is already open")]
    FormOpen,
    /// No modal form is open.
    #[error("no modal form is open")]
    NoOpenForm,
    /// The address sub-editor is open.
    #[error("the address editor is still open")]
    EditorOpen,
    /// The address sub-editor is closed.
    #[error("the address editor is not open")]
    EditorClosed,
    /// A searchable list did not offer the requested option.
    #[error("field {field} offers no option '{value}'")]
    UnknownOption {
        /// Lookup field name.
        field: String,
        /// Requested option.
        value: String,
    },
    /// A field shows an unexpected value after interaction.
    #[error("field {field} shows '{actual}', expected '{expected}'")]
    UnexpectedValue {
        /// Field name.
        field: String,
        /// Expected rendered value.
        expected: String,
        /// Actual rendered value.
        actual: String,
    },
    /// Driver-specific failure.
    #[error("ui driver failure: {0}")]
    Driver(String),
}
