// crates/erp-fixtures/src/bpartner/extended.rs
// ============================================================================
// Module: Extended Patch Computation
// Description: Vendor, customer, pricing, and payment fields of a partner.
// Purpose: Turn draft attributes plus server reference data into patch ops.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`compute_extended_patch`] is pure: it reads a [`BPartnerDraft`] and a
//! [`ReferenceSnapshot`] fetched from the server and returns the patch ops for
//! the advanced-edit PATCH.
//! Invariants:
//! - Flags are only written when the server reports them unset.
//! - Customer pricing system, customer discount schema, and payment term are
//!   resolved by exact caption; a miss fails the whole computation.
//! - Vendor pricing system, vendor discount schema, and dunning are sent as raw
//!   names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::bpartner::BPartnerDraft;
use crate::lookup::LookupError;
use crate::lookup::ReferenceRecord;
use crate::lookup::find_by_name;
use crate::patch::PatchOp;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Vendor flag field (vendor tab).
pub const IS_VENDOR_FIELD: &str = "IsVendor";
/// Customer flag field (customer tab).
pub const IS_CUSTOMER_FIELD: &str = "IsCustomer";
/// Vendor pricing system field.
pub const VENDOR_PRICING_SYSTEM_FIELD: &str = "PO_PricingSystem_ID";
/// Vendor discount schema field.
pub const VENDOR_DISCOUNT_SCHEMA_FIELD: &str = "PO_DiscountSchema_ID";
/// Customer dunning field.
pub const DUNNING_FIELD: &str = "C_Dunning_ID";
/// Customer discount schema field.
pub const DISCOUNT_SCHEMA_FIELD: &str = "M_DiscountSchema_ID";
/// Customer pricing system field.
pub const PRICING_SYSTEM_FIELD: &str = "M_PricingSystem_ID";
/// Payment term field.
pub const PAYMENT_TERM_FIELD: &str = "C_PaymentTerm_ID";

// ============================================================================
// SECTION: Reference Snapshot
// ============================================================================

/// Server state read before computing the extended patch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceSnapshot {
    /// Current vendor flag.
    pub vendor_flag: bool,
    /// Current customer flag.
    pub customer_flag: bool,
    /// Discount schema options.
    pub discount_schemas: Vec<ReferenceRecord>,
    /// Pricing system options.
    pub pricing_systems: Vec<ReferenceRecord>,
    /// Payment term options.
    pub payment_terms: Vec<ReferenceRecord>,
}

// ============================================================================
// SECTION: Computation
// ============================================================================

/// Returns true when the draft sets anything the extended patch covers.
///
/// Queued locations also trigger the reads.
#[must_use]
pub fn needs_extended_patch(draft: &BPartnerDraft) -> bool {
    draft.is_vendor
        || draft.is_customer
        || draft.vendor_pricing_system.is_some()
        || draft.vendor_discount_schema.is_some()
        || draft.customer_pricing_system.is_some()
        || draft.customer_discount_schema.is_some()
        || draft.customer_dunning.is_some()
        || draft.payment_term.is_some()
        || !draft.b_partner_locations.is_empty()
}

/// Computes the extended patch for `draft` against `snapshot`.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] when a name-resolved value has no
/// matching option.
pub fn compute_extended_patch(
    draft: &BPartnerDraft,
    snapshot: &ReferenceSnapshot,
) -> Result<Vec<PatchOp>, LookupError> {
    let mut ops = Vec::new();

    if draft.is_vendor && !snapshot.vendor_flag {
        ops.push(PatchOp::replace(IS_VENDOR_FIELD, true));
    }
    if let Some(name) = &draft.vendor_pricing_system {
        ops.push(PatchOp::replace(VENDOR_PRICING_SYSTEM_FIELD, name.as_str()));
    }
    if let Some(name) = &draft.vendor_discount_schema {
        ops.push(PatchOp::replace(VENDOR_DISCOUNT_SCHEMA_FIELD, name.as_str()));
    }

    if draft.is_customer && !snapshot.customer_flag {
        ops.push(PatchOp::replace(IS_CUSTOMER_FIELD, true));
    }
    if let Some(name) = &draft.customer_dunning {
        ops.push(PatchOp::replace(DUNNING_FIELD, name.as_str()));
    }

    let resolved = [
        (DISCOUNT_SCHEMA_FIELD, &draft.customer_discount_schema, &snapshot.discount_schemas),
        (PRICING_SYSTEM_FIELD, &draft.customer_pricing_system, &snapshot.pricing_systems),
        (PAYMENT_TERM_FIELD, &draft.payment_term, &snapshot.payment_terms),
    ];
    for (field, name, options) in resolved {
        if let Some(name) = name {
            ops.push(PatchOp::replace(field, resolve(options, name)?));
        }
    }
    Ok(ops)
}

/// Resolves a name to its `{key, caption}` patch value.
fn resolve(options: &[ReferenceRecord], name: &str) -> Result<Value, LookupError> {
    find_by_name(options, name).map(ReferenceRecord::to_value)
}
