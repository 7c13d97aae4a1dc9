// crates/erp-fixtures/src/bpartner/window.rs
// ============================================================================
// Module: Business Partner Window
// Description: REST client bound to the business partner window layout.
// Purpose: Fetch the reference data used by the extended patch.
// Dependencies: erp-fixtures-config, reqwest, tokio
// ============================================================================

//! ## Overview
//! [`BPartnerWindow`] pairs a [`WindowClient`] with the configured window and
//! tab ids. [`BPartnerWindow::reference_snapshot`] issues the five reference
//! reads concurrently and joins them.
//! Invariants:
//! - The first failing read aborts the join; no partial snapshot is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use erp_fixtures_config::BPartnerWindowConfig;
use erp_fixtures_config::FixtureConfig;
use reqwest::Client;

use crate::bpartner::extended::DISCOUNT_SCHEMA_FIELD;
use crate::bpartner::extended::IS_CUSTOMER_FIELD;
use crate::bpartner::extended::IS_VENDOR_FIELD;
use crate::bpartner::extended::PAYMENT_TERM_FIELD;
use crate::bpartner::extended::PRICING_SYSTEM_FIELD;
use crate::bpartner::extended::ReferenceSnapshot;
use crate::error::FixtureError;
use crate::http::RecordId;
use crate::http::WindowClient;

// ============================================================================
// SECTION: Window
// ============================================================================

/// Business partner window access.
#[derive(Debug, Clone)]
pub struct BPartnerWindow {
    /// Window REST client.
    client: WindowClient,
    /// Window and tab ids.
    layout: BPartnerWindowConfig,
}

impl BPartnerWindow {
    /// Builds window access from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the HTTP client cannot be constructed.
    pub fn new(config: &FixtureConfig) -> Result<Self, FixtureError> {
        Ok(Self {
            client: WindowClient::new(config)?,
            layout: config.bpartner_window.clone(),
        })
    }

    /// Loads configuration from `path` or the environment and builds window
    /// access from it.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Config`] when configuration loading fails, or
    /// [`FixtureError`] when the HTTP client cannot be constructed.
    pub fn load(path: Option<&Path>) -> Result<Self, FixtureError> {
        let config = FixtureConfig::load(path)?;
        Self::new(&config)
    }

    /// Builds window access around an existing reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the configured API URL is unusable.
    pub fn with_client(config: &FixtureConfig, client: Client) -> Result<Self, FixtureError> {
        Ok(Self {
            client: WindowClient::with_client(
                &config.api_url,
                config.bpartner_window.window_id,
                client,
            )?,
            layout: config.bpartner_window.clone(),
        })
    }

    /// Returns the REST client.
    #[must_use]
    pub const fn client(&self) -> &WindowClient {
        &self.client
    }

    /// Returns the window layout.
    #[must_use]
    pub const fn layout(&self) -> &BPartnerWindowConfig {
        &self.layout
    }

    /// Reads flags and dropdown options of record `id` concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when any read fails or a flag field is missing.
    pub async fn reference_snapshot(&self, id: &RecordId) -> Result<ReferenceSnapshot, FixtureError> {
        let vendor_tab = self.layout.vendor_tab.as_str();
        let customer_tab = self.layout.customer_tab.as_str();
        let (vendor, customer, discount_schemas, pricing_systems, payment_terms) = tokio::try_join!(
            self.client.tab_fields(id, vendor_tab),
            self.client.tab_fields(id, customer_tab),
            self.client.dropdown(id, customer_tab, DISCOUNT_SCHEMA_FIELD),
            self.client.dropdown(id, customer_tab, PRICING_SYSTEM_FIELD),
            self.client.dropdown(id, customer_tab, PAYMENT_TERM_FIELD),
        )?;
        Ok(ReferenceSnapshot {
            vendor_flag: vendor.flag(IS_VENDOR_FIELD)?,
            customer_flag: customer.flag(IS_CUSTOMER_FIELD)?,
            discount_schemas,
            pricing_systems,
            payment_terms,
        })
    }
}
