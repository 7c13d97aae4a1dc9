// crates/erp-fixtures/src/ui/manual.rs
// ============================================================================
// Module: Manual Entry Procedures
// Description: Scripted form entry for partner locations, contacts, and banks.
// Purpose: Fill detail tabs the REST API cannot write.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! These procedures replay queued detail rows through a [`UiDriver`]. They
//! assume the partner record screen is already open.
//! Invariants:
//! - Locations are entered before contacts, contacts before the bank account.
//! - After each non-empty batch the grid shows exactly the rows entered so far.
//! - Rows recorded in a [`ReplayProgress`] are never entered twice.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::bpartner::BPartnerDraft;
use crate::bpartner::Contact;
use crate::bpartner::Location;
use crate::error::FixtureError;
use crate::ui::DetailTab;
use crate::ui::FieldScope;
use crate::ui::UiDriver;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Location name field.
pub const LOCATION_NAME_FIELD: &str = "Name";
/// Location address field hosting the address sub-editor.
pub const LOCATION_ADDRESS_FIELD: &str = "C_Location_ID";
/// First address line.
pub const ADDRESS_LINE_FIELD: &str = "Address1";
/// Address city.
pub const ADDRESS_CITY_FIELD: &str = "City";
/// Address country lookup.
pub const ADDRESS_COUNTRY_FIELD: &str = "C_Country_ID";
/// Contact first name.
pub const CONTACT_FIRST_NAME_FIELD: &str = "Firstname";
/// Contact last name.
pub const CONTACT_LAST_NAME_FIELD: &str = "Lastname";
/// Contact default flag.
pub const CONTACT_DEFAULT_FIELD: &str = "IsDefaultContact";
/// Bank lookup.
pub const BANK_FIELD: &str = "C_Bank_ID";
/// Bank account name.
pub const BANK_ACCOUNT_NAME_FIELD: &str = "A_Name";

/// Placeholder address line; the form requires a non-empty value.
const ADDRESS_LINE_PLACEHOLDER: &str = " ";
/// Account name written for every bank account.
pub const BANK_ACCOUNT_NAME: &str = "Test Account";

// ============================================================================
// SECTION: Procedures
// ============================================================================

/// Adds one location row.
///
/// # Errors
///
/// Returns [`FixtureError`] when a UI step fails or the rendered address does
/// not contain the city.
pub async fn apply_location<U>(ui: &mut U, location: &Location) -> Result<(), FixtureError>
where
    U: UiDriver + ?Sized,
{
    tracing::debug!(name = %location.name, city = %location.city, "entering location");
    ui.select_tab(DetailTab::Locations).await?;
    ui.press_add_new().await?;
    ui.write_string_field(LOCATION_NAME_FIELD, &location.name, FieldScope::Modal).await?;
    ui.click_form_title().await?;

    ui.open_address_editor(LOCATION_ADDRESS_FIELD).await?;
    ui.write_string_field(ADDRESS_LINE_FIELD, ADDRESS_LINE_PLACEHOLDER, FieldScope::AddressEditor)
        .await?;
    ui.write_string_field(ADDRESS_CITY_FIELD, &location.city, FieldScope::AddressEditor).await?;
    ui.write_lookup_field(
        ADDRESS_COUNTRY_FIELD,
        &location.country,
        &location.country,
        FieldScope::AddressEditor,
    )
    .await?;
    ui.close_address_editor().await?;

    let summary = ui.address_summary(LOCATION_ADDRESS_FIELD).await?;
    if !summary.contains(location.city.as_str()) {
        return Err(FixtureError::AddressNotRendered {
            city: location.city.clone(),
            summary,
        });
    }
    ui.press_done().await?;
    Ok(())
}

/// Adds one contact row.
///
/// # Errors
///
/// Returns [`FixtureError`] when a UI step fails.
pub async fn apply_contact<U>(ui: &mut U, contact: &Contact) -> Result<(), FixtureError>
where
    U: UiDriver + ?Sized,
{
    tracing::debug!(
        first_name = %contact.first_name,
        last_name = %contact.last_name,
        "entering contact"
    );
    ui.select_tab(DetailTab::Contacts).await?;
    ui.press_add_new().await?;
    ui.write_string_field(CONTACT_FIRST_NAME_FIELD, &contact.first_name, FieldScope::Modal).await?;
    ui.write_string_field(CONTACT_LAST_NAME_FIELD, &contact.last_name, FieldScope::Modal).await?;
    if contact.is_default_contact {
        ui.click_checkbox(CONTACT_DEFAULT_FIELD, true, FieldScope::Modal).await?;
    }
    ui.press_done().await?;
    Ok(())
}

/// Adds one bank account row for `bank`.
///
/// # Errors
///
/// Returns [`FixtureError`] when a UI step fails.
pub async fn apply_bank<U>(ui: &mut U, bank: &str) -> Result<(), FixtureError>
where
    U: UiDriver + ?Sized,
{
    tracing::debug!(bank = %bank, "entering bank account");
    ui.select_tab(DetailTab::BankAccounts).await?;
    ui.press_add_new().await?;
    ui.write_lookup_field(BANK_FIELD, bank, bank, FieldScope::Modal).await?;
    ui.write_string_field(BANK_ACCOUNT_NAME_FIELD, BANK_ACCOUNT_NAME, FieldScope::Modal).await?;
    ui.press_done().await?;
    Ok(())
}

/// Detail rows already entered for a record.
///
/// # Invariants
/// - `*_rows` count every row entered through this progress, including rows
///   whose draft entries were cleared afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplayProgress {
    /// Draft locations already entered.
    pub locations: usize,
    /// Location rows entered in total.
    pub location_rows: usize,
    /// Draft contacts already entered.
    pub contacts: usize,
    /// Contact rows entered in total.
    pub contact_rows: usize,
    /// Bank of the last entered bank account.
    pub bank: Option<String>,
}

impl ReplayProgress {
    /// Returns true when `draft` holds rows not entered yet.
    #[must_use]
    pub fn has_pending(&self, draft: &BPartnerDraft) -> bool {
        draft.b_partner_locations.len() > self.locations
            || draft.contacts.len() > self.contacts
            || (draft.bank.is_some() && draft.bank != self.bank)
    }

    /// Forgets entered draft locations; grid row totals are kept.
    pub const fn reset_locations(&mut self) {
        self.locations = 0;
    }

    /// Forgets entered draft contacts; grid row totals are kept.
    pub const fn reset_contacts(&mut self) {
        self.contacts = 0;
    }
}

/// Replays the locations, contacts, and bank account of `draft` not yet
/// recorded in `progress`.
///
/// This is the fallback path for data the REST API cannot set; the record
/// screen must already be open. `progress` advances after every entered row,
/// so a failed replay can be resumed.
///
/// # Errors
///
/// Returns [`FixtureError::GridMismatch`] when a grid row count differs from the
/// number of rows entered so far, or any error of the individual procedures.
pub async fn replay_manual_entries<U>(
    ui: &mut U,
    draft: &BPartnerDraft,
    progress: &mut ReplayProgress,
) -> Result<(), FixtureError>
where
    U: UiDriver + ?Sized,
{
    let locations = draft.b_partner_locations.get(progress.locations..).unwrap_or_default();
    if !locations.is_empty() {
        for location in locations {
            apply_location(ui, location).await?;
            progress.locations += 1;
            progress.location_rows += 1;
        }
        expect_grid_rows(ui, DetailTab::Locations, progress.location_rows).await?;
    }
    let contacts = draft.contacts.get(progress.contacts..).unwrap_or_default();
    if !contacts.is_empty() {
        for contact in contacts {
            apply_contact(ui, contact).await?;
            progress.contacts += 1;
            progress.contact_rows += 1;
        }
        expect_grid_rows(ui, DetailTab::Contacts, progress.contact_rows).await?;
    }
    if let Some(bank) = &draft.bank
        && progress.bank.as_ref() != Some(bank)
    {
        apply_bank(ui, bank).await?;
        progress.bank = Some(bank.clone());
    }
    Ok(())
}

/// Checks the grid of the current tab against the entered row count.
async fn expect_grid_rows<U>(
    ui: &mut U,
    tab: DetailTab,
    expected: usize,
) -> Result<(), FixtureError>
where
    U: UiDriver + ?Sized,
{
    let actual = ui.grid_row_count().await?;
    if actual != expected {
        return Err(FixtureError::GridMismatch {
            tab,
            expected,
            actual,
        });
    }
    Ok(())
}
