// crates/erp-fixtures/src/bpartner/mod.rs
// ============================================================================
// Module: Business Partner Builder
// Description: Chainable builder that persists a business partner fixture.
// Purpose: Create partners over REST and replay detail rows through the UI.
// Dependencies: serde, tracing
// ============================================================================

//! ## Overview
//! [`BPartner`] wraps a [`BPartnerDraft`] with chainable setters. Calling
//! [`BPartner::apply`] creates the window document, patches the basic and
//! extended fields, then replays locations, contacts, and bank accounts through
//! a [`UiDriver`] when any were queued.
//! Invariants:
//! - Setters change exactly one attribute and return the same builder.
//! - A builder is applied at most once; the id is kept even when a later step
//!   fails.
//! - Without queued detail rows the UI is never touched.
//! - Each queued detail row is entered through the UI at most once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::error::FixtureError;
use crate::http::RecordId;
use crate::patch::PatchOp;
use crate::ui::ReplayProgress;
use crate::ui::UiDriver;
use crate::ui::replay_manual_entries;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod extended;
pub mod window;

pub use extended::ReferenceSnapshot;
pub use extended::compute_extended_patch;
pub use extended::needs_extended_patch;
pub use window::BPartnerWindow;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Company name field.
pub const COMPANY_NAME_FIELD: &str = "CompanyName";
/// Second name field.
pub const NAME2_FIELD: &str = "Name2";

// ============================================================================
// SECTION: Draft Types
// ============================================================================

/// Partner location, referenced by names rather than ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Location {
    /// Location name.
    pub name: String,
    /// City name.
    pub city: String,
    /// Country name as listed in the country lookup.
    pub country: String,
}

impl Location {
    /// Builds a location.
    #[must_use]
    pub fn new(name: impl Into<String>, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

/// Partner contact person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Contact {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Whether the contact is the partner's default contact.
    #[serde(default)]
    pub is_default_contact: bool,
}

impl Contact {
    /// Builds a contact.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        is_default_contact: bool,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_default_contact,
        }
    }
}

/// Attributes of a business partner to be created.
///
/// Deserializes from camelCase fixture documents; only `name` is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BPartnerDraft {
    /// Display name, written to `CompanyName` and `Name2`.
    pub name: String,
    /// Mark the partner as vendor.
    #[serde(default)]
    pub is_vendor: bool,
    /// Mark the partner as customer.
    #[serde(default)]
    pub is_customer: bool,
    /// Vendor pricing system name (sent verbatim).
    #[serde(default)]
    pub vendor_pricing_system: Option<String>,
    /// Vendor discount schema name (sent verbatim).
    #[serde(default)]
    pub vendor_discount_schema: Option<String>,
    /// Customer pricing system name (resolved by lookup).
    #[serde(default)]
    pub customer_pricing_system: Option<String>,
    /// Customer discount schema name (resolved by lookup).
    #[serde(default)]
    pub customer_discount_schema: Option<String>,
    /// Customer dunning name (sent verbatim).
    #[serde(default)]
    pub customer_dunning: Option<String>,
    /// Payment term name (resolved by lookup).
    #[serde(default)]
    pub payment_term: Option<String>,
    /// Bank name for a bank account row.
    #[serde(default)]
    pub bank: Option<String>,
    /// Locations, entered in order.
    #[serde(default)]
    pub b_partner_locations: Vec<Location>,
    /// Contacts, entered in order.
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl BPartnerDraft {
    /// Returns true when locations, contacts, or a bank need UI entry.
    #[must_use]
    pub fn has_manual_entries(&self) -> bool {
        !self.b_partner_locations.is_empty() || !self.contacts.is_empty() || self.bank.is_some()
    }
}

/// Builds the patch that writes the display name.
#[must_use]
pub fn basic_patch(name: &str) -> Vec<PatchOp> {
    vec![PatchOp::replace(COMPANY_NAME_FIELD, name), PatchOp::replace(NAME2_FIELD, name)]
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Chainable business partner builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BPartner {
    /// Queued attributes.
    draft: BPartnerDraft,
    /// Server-issued id once the record exists.
    id: Option<RecordId>,
    /// Detail rows already entered through the UI.
    replayed: ReplayProgress,
}

impl BPartner {
    /// Starts a builder for a partner named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!(name = %name, "bpartner set name");
        Self::from_draft(BPartnerDraft {
            name,
            ..BPartnerDraft::default()
        })
    }

    /// Starts a builder from a complete draft.
    #[must_use]
    pub const fn from_draft(draft: BPartnerDraft) -> Self {
        Self {
            draft,
            id: None,
            replayed: ReplayProgress {
                locations: 0,
                location_rows: 0,
                contacts: 0,
                contact_rows: 0,
                bank: None,
            },
        }
    }

    /// Returns the queued attributes.
    #[must_use]
    pub const fn draft(&self) -> &BPartnerDraft {
        &self.draft
    }

    /// Returns the server-issued id, once created.
    #[must_use]
    pub const fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.draft.name = name.into();
        tracing::debug!(name = %self.draft.name, "bpartner set name");
        self
    }

    /// Sets the vendor flag.
    pub fn set_vendor(&mut self, is_vendor: bool) -> &mut Self {
        tracing::debug!(is_vendor, "bpartner set vendor");
        self.draft.is_vendor = is_vendor;
        self
    }

    /// Sets the vendor pricing system name.
    pub fn set_vendor_pricing_system(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(vendor_pricing_system = %name, "bpartner set vendor pricing system");
        self.draft.vendor_pricing_system = Some(name);
        self
    }

    /// Sets the vendor discount schema name.
    pub fn set_vendor_discount_schema(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(vendor_discount_schema = %name, "bpartner set vendor discount schema");
        self.draft.vendor_discount_schema = Some(name);
        self
    }

    /// Sets the customer dunning name.
    pub fn set_customer_dunning(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(customer_dunning = %name, "bpartner set customer dunning");
        self.draft.customer_dunning = Some(name);
        self
    }

    /// Sets the customer flag.
    pub fn set_customer(&mut self, is_customer: bool) -> &mut Self {
        tracing::debug!(is_customer, "bpartner set customer");
        self.draft.is_customer = is_customer;
        self
    }

    /// Sets the payment term name.
    pub fn set_payment_term(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(payment_term = %name, "bpartner set payment term");
        self.draft.payment_term = Some(name);
        self
    }

    /// Sets the customer pricing system name.
    pub fn set_customer_pricing_system(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(customer_pricing_system = %name, "bpartner set customer pricing system");
        self.draft.customer_pricing_system = Some(name);
        self
    }

    /// Sets the customer discount schema name.
    pub fn set_customer_discount_schema(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(customer_discount_schema = %name, "bpartner set customer discount schema");
        self.draft.customer_discount_schema = Some(name);
        self
    }

    /// Sets the bank used for the bank account row.
    pub fn set_bank(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::debug!(bank = %name, "bpartner set bank");
        self.draft.bank = Some(name);
        self
    }

    /// Appends a location.
    pub fn add_location(&mut self, location: Location) -> &mut Self {
        tracing::debug!(name = %location.name, city = %location.city, "bpartner add location");
        self.draft.b_partner_locations.push(location);
        self
    }

    /// Removes all queued locations.
    pub fn clear_locations(&mut self) -> &mut Self {
        tracing::debug!("bpartner clear locations");
        self.draft.b_partner_locations.clear();
        self.replayed.reset_locations();
        self
    }

    /// Appends a contact.
    pub fn add_contact(&mut self, contact: Contact) -> &mut Self {
        tracing::debug!(
            first_name = %contact.first_name,
            last_name = %contact.last_name,
            "bpartner add contact"
        );
        self.draft.contacts.push(contact);
        self
    }

    /// Removes all queued contacts.
    pub fn clear_contacts(&mut self) -> &mut Self {
        tracing::debug!("bpartner clear contacts");
        self.draft.contacts.clear();
        self.replayed.reset_contacts();
        self
    }

    /// Persists the partner and replays queued detail rows.
    ///
    /// REST steps run first: empty create, name patch, extended patch. Detail
    /// rows follow through [`BPartner::replay_manual`] only when queued.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::AlreadyApplied`] when the builder already holds
    /// an id, or the first failing request, lookup, or UI step. The created
    /// record is left in place on failure.
    pub async fn apply<U>(
        &mut self,
        window: &BPartnerWindow,
        ui: &mut U,
    ) -> Result<&mut Self, FixtureError>
    where
        U: UiDriver + ?Sized,
    {
        if let Some(id) = &self.id {
            return Err(FixtureError::AlreadyApplied(id.to_string()));
        }
        tracing::info!(name = %self.draft.name, "bpartner apply start");
        let id = self.persist(window).await?;
        tracing::info!(name = %self.draft.name, id = %id, "bpartner apply end");

        self.replay_manual(window, ui).await?;
        Ok(self)
    }

    /// Returns the detail rows already entered through the UI.
    #[must_use]
    pub const fn replayed(&self) -> &ReplayProgress {
        &self.replayed
    }

    /// Enters locations, contacts, and bank account queued since the last
    /// replay through the UI.
    ///
    /// The REST API cannot create these rows, so they are typed into the
    /// record screen instead. Without pending rows the UI is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NotPersisted`] before the record exists, or the
    /// first failing UI step or grid check.
    pub async fn replay_manual<U>(
        &mut self,
        window: &BPartnerWindow,
        ui: &mut U,
    ) -> Result<(), FixtureError>
    where
        U: UiDriver + ?Sized,
    {
        let id = self.id.as_ref().ok_or(FixtureError::NotPersisted)?;
        if !self.replayed.has_pending(&self.draft) {
            return Ok(());
        }
        tracing::info!(
            id = %id,
            locations = self.draft.b_partner_locations.len(),
            contacts = self.draft.contacts.len(),
            bank = self.draft.bank.is_some(),
            "bpartner manual entry replay"
        );
        ui.visit_window(window.layout().window_id, id).await?;
        replay_manual_entries(ui, &self.draft, &mut self.replayed).await
    }

    /// Runs the REST steps and records the assigned id.
    async fn persist(&mut self, window: &BPartnerWindow) -> Result<RecordId, FixtureError> {
        let client = window.client();
        let id = client.create_record().await?;
        self.id = Some(id.clone());

        client.patch_record(&id, &basic_patch(&self.draft.name)).await?;

        if needs_extended_patch(&self.draft) {
            let snapshot = window.reference_snapshot(&id).await?;
            let ops = compute_extended_patch(&self.draft, &snapshot)?;
            if !ops.is_empty() {
                client.patch_record_advanced(&id, &ops).await?;
            }
        }
        Ok(id)
    }
}
