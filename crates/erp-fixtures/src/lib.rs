// crates/erp-fixtures/src/lib.rs
// ============================================================================
// Module: ERP Fixtures Library
// Description: Test-data builders for end-to-end ERP UI suites.
// Purpose: Create business partners through REST patches and manual UI replay.
// Dependencies: erp-fixtures-config, reqwest, serde_json, tokio, tracing
// ============================================================================

//! ## Overview
//! ERP Fixtures builds business partner records for end-to-end UI tests.
//! [`BPartner`] accumulates attributes, then [`BPartner::apply`] creates the
//! record over the window REST API and replays locations, contacts, and bank
//! accounts through a [`UiDriver`] because the REST API cannot set them.
//! Invariants:
//! - Name-resolved dropdown values must exist on the server; lookups never
//!   fall back silently.
//! - Failures propagate undecorated; partially created records are left as-is.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bpartner;
pub mod error;
pub mod http;
pub mod lookup;
pub mod patch;
pub mod telemetry;
pub mod ui;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bpartner::BPartner;
pub use bpartner::BPartnerDraft;
pub use bpartner::BPartnerWindow;
pub use bpartner::Contact;
pub use bpartner::Location;
pub use bpartner::ReferenceSnapshot;
pub use bpartner::compute_extended_patch;
pub use bpartner::needs_extended_patch;
pub use erp_fixtures_config::FixtureConfig;
pub use error::FixtureError;
pub use http::FieldDescriptor;
pub use http::RecordId;
pub use http::WindowClient;
pub use http::WrappedResponse;
pub use lookup::Captioned;
pub use lookup::LookupError;
pub use lookup::ReferenceKey;
pub use lookup::ReferenceRecord;
pub use lookup::find_by_name;
pub use patch::PatchOp;
pub use patch::PatchOpKind;
pub use ui::DetailTab;
pub use ui::FieldScope;
pub use ui::InMemoryUi;
pub use ui::UiAction;
pub use ui::UiDriver;
pub use ui::UiError;
