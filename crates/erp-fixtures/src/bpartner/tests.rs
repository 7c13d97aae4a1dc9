// crates/erp-fixtures/src/bpartner/tests.rs
// ============================================================================
// Module: Business Partner Unit Tests
// Description: Unit coverage for builder setters and extended patch computation.
// Purpose: Verify patch contents without network or UI.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Unit tests for [`super::BPartner`] chaining and
//! [`super::compute_extended_patch`].

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::ptr;

use serde_json::json;

use super::BPartner;
use super::BPartnerDraft;
use super::Contact;
use super::Location;
use super::ReferenceSnapshot;
use super::basic_patch;
use super::compute_extended_patch;
use super::needs_extended_patch;
use crate::lookup::LookupError;
use crate::lookup::ReferenceKey;
use crate::lookup::ReferenceRecord;
use crate::patch::PatchOp;

// ============================================================================
// SECTION: Builder
// ============================================================================

#[test]
fn setters_return_the_same_builder() {
    let mut builder = BPartner::new("Acme");
    let returned: *const BPartner = builder.set_vendor(true);
    assert!(ptr::eq(returned, &builder));
    let returned: *const BPartner = builder.set_bank("Deutsche Bank").clear_contacts();
    assert!(ptr::eq(returned, &builder));
}

/// Builder mutation applied by a setter.
type Setter = fn(&mut BPartner);
/// Draft change the setter is expected to make.
type Expected = fn(&mut BPartnerDraft);

/// Returns a builder with every scalar attribute already set.
fn populated() -> BPartner {
    let mut builder = BPartner::new("Acme");
    builder
        .set_vendor(true)
        .set_vendor_pricing_system("old vendor ps")
        .set_vendor_discount_schema("old vendor ds")
        .set_customer_dunning("old dunning")
        .set_customer(true)
        .set_payment_term("old term")
        .set_customer_pricing_system("old ps")
        .set_customer_discount_schema("old ds")
        .set_bank("old bank")
        .add_location(Location::new("HQ", "Berlin", "Germany"))
        .add_contact(Contact::new("Jane", "Doe", true));
    builder
}

#[test]
fn each_setter_overwrites_only_its_attribute() {
    let cases: [(&str, Setter, Expected); 10] = [
        (
            "name",
            |b| {
                b.set_name("New");
            },
            |d| d.name = "New".to_string(),
        ),
        (
            "vendor",
            |b| {
                b.set_vendor(false);
            },
            |d| d.is_vendor = false,
        ),
        (
            "vendor pricing system",
            |b| {
                b.set_vendor_pricing_system("new");
            },
            |d| d.vendor_pricing_system = Some("new".to_string()),
        ),
        (
            "vendor discount schema",
            |b| {
                b.set_vendor_discount_schema("new");
            },
            |d| d.vendor_discount_schema = Some("new".to_string()),
        ),
        (
            "customer dunning",
            |b| {
                b.set_customer_dunning("new");
            },
            |d| d.customer_dunning = Some("new".to_string()),
        ),
        (
            "customer",
            |b| {
                b.set_customer(false);
            },
            |d| d.is_customer = false,
        ),
        (
            "payment term",
            |b| {
                b.set_payment_term("new");
            },
            |d| d.payment_term = Some("new".to_string()),
        ),
        (
            "customer pricing system",
            |b| {
                b.set_customer_pricing_system("new");
            },
            |d| d.customer_pricing_system = Some("new".to_string()),
        ),
        (
            "customer discount schema",
            |b| {
                b.set_customer_discount_schema("new");
            },
            |d| d.customer_discount_schema = Some("new".to_string()),
        ),
        (
            "bank",
            |b| {
                b.set_bank("new");
            },
            |d| d.bank = Some("new".to_string()),
        ),
    ];

    for (label, setter, expected_change) in cases {
        let mut builder = populated();
        let mut expected = builder.draft().clone();
        setter(&mut builder);
        expected_change(&mut expected);
        assert_eq!(builder.draft(), &expected, "setter {label}");
    }
}

#[test]
fn chained_setters_fill_the_draft() {
    let mut builder = BPartner::new("Acme");
    builder
        .set_vendor(true)
        .set_vendor_pricing_system("Vendor PS")
        .set_vendor_discount_schema("Vendor DS")
        .set_customer(true)
        .set_customer_dunning("Dunning")
        .set_customer_pricing_system("Standard")
        .set_customer_discount_schema("Rebate")
        .set_payment_term("30 days net")
        .set_bank("Sparkasse");

    let draft = builder.draft();
    assert!(draft.is_vendor && draft.is_customer);
    assert_eq!(draft.vendor_pricing_system.as_deref(), Some("Vendor PS"));
    assert_eq!(draft.vendor_discount_schema.as_deref(), Some("Vendor DS"));
    assert_eq!(draft.customer_dunning.as_deref(), Some("Dunning"));
    assert_eq!(draft.customer_pricing_system.as_deref(), Some("Standard"));
    assert_eq!(draft.customer_discount_schema.as_deref(), Some("Rebate"));
    assert_eq!(draft.payment_term.as_deref(), Some("30 days net"));
    assert_eq!(draft.bank.as_deref(), Some("Sparkasse"));
    assert!(builder.id().is_none());
}

#[test]
fn clear_resets_sequences_regardless_of_contents() {
    let mut builder = BPartner::new("Acme");
    builder
        .add_location(Location::new("HQ", "Berlin", "Germany"))
        .add_location(Location::new("Depot", "Hamburg", "Germany"))
        .add_contact(Contact::new("Jane", "Doe", true));
    assert_eq!(builder.draft().b_partner_locations.len(), 2);

    builder.clear_locations().clear_contacts();
    assert!(builder.draft().b_partner_locations.is_empty());
    assert!(builder.draft().contacts.is_empty());

    builder.clear_locations();
    assert!(builder.draft().b_partner_locations.is_empty());
}

#[test]
fn add_appends_in_order() {
    let mut builder = BPartner::new("Acme");
    builder
        .add_contact(Contact::new("Jane", "Doe", true))
        .add_contact(Contact::new("John", "Roe", false));
    let names: Vec<&str> =
        builder.draft().contacts.iter().map(|contact| contact.first_name.as_str()).collect();
    assert_eq!(names, ["Jane", "John"]);
}

#[test]
fn draft_deserializes_from_camel_case_fixture() {
    let draft: BPartnerDraft = serde_json::from_value(json!({
        "name": "Acme",
        "isVendor": true,
        "paymentTerm": "30 days net",
        "bPartnerLocations": [{ "name": "HQ", "city": "Berlin", "country": "Germany" }],
        "contacts": [{ "firstName": "Jane", "lastName": "Doe" }]
    }))
    .unwrap();
    assert!(draft.is_vendor);
    assert!(!draft.is_customer);
    assert_eq!(draft.payment_term.as_deref(), Some("30 days net"));
    assert_eq!(draft.b_partner_locations[0], Location::new("HQ", "Berlin", "Germany"));
    assert_eq!(draft.contacts[0], Contact::new("Jane", "Doe", false));
    assert!(draft.has_manual_entries());

    let missing_name = serde_json::from_value::<BPartnerDraft>(json!({ "isVendor": true }));
    assert!(missing_name.is_err());
}

#[test]
fn basic_patch_writes_name_twice() {
    assert_eq!(
        basic_patch("Acme"),
        vec![PatchOp::replace("CompanyName", "Acme"), PatchOp::replace("Name2", "Acme")]
    );
}

// ============================================================================
// SECTION: Extended Patch
// ============================================================================

fn snapshot() -> ReferenceSnapshot {
    ReferenceSnapshot {
        vendor_flag: false,
        customer_flag: false,
        discount_schemas: vec![ReferenceRecord::new(ReferenceKey::Number(3), "Rebate")],
        pricing_systems: vec![
            ReferenceRecord::new(ReferenceKey::Number(6), "Sales"),
            ReferenceRecord::new(ReferenceKey::Number(7), "Standard"),
        ],
        payment_terms: vec![ReferenceRecord::new(
            ReferenceKey::Text("1000009".to_string()),
            "30 days net",
        )],
    }
}

fn draft(name: &str) -> BPartnerDraft {
    BPartnerDraft {
        name: name.to_string(),
        ..BPartnerDraft::default()
    }
}

#[test]
fn plain_partner_needs_no_extended_patch() {
    let mut plain = draft("Acme");
    assert!(!needs_extended_patch(&plain));
    plain.bank = Some("Sparkasse".to_string());
    plain.contacts.push(Contact::new("Jane", "Doe", false));
    assert!(!needs_extended_patch(&plain));

    plain.b_partner_locations.push(Location::new("HQ", "Berlin", "Germany"));
    assert!(needs_extended_patch(&plain));
    assert!(compute_extended_patch(&plain, &snapshot()).unwrap().is_empty());
}

#[test]
fn payment_term_alone_triggers_extended_patch() {
    let mut partner = draft("Acme");
    partner.payment_term = Some("30 days net".to_string());
    assert!(needs_extended_patch(&partner));
}

#[test]
fn vendor_flag_is_written_only_when_unset_on_server() {
    let mut vendor = draft("Acme");
    vendor.is_vendor = true;

    let ops = compute_extended_patch(&vendor, &snapshot()).unwrap();
    assert_eq!(ops, vec![PatchOp::replace("IsVendor", true)]);

    let already_vendor = ReferenceSnapshot {
        vendor_flag: true,
        ..snapshot()
    };
    assert!(compute_extended_patch(&vendor, &already_vendor).unwrap().is_empty());
}

#[test]
fn customer_flag_is_written_only_when_unset_on_server() {
    let mut customer = draft("Acme");
    customer.is_customer = true;

    let ops = compute_extended_patch(&customer, &snapshot()).unwrap();
    assert_eq!(ops, vec![PatchOp::replace("IsCustomer", true)]);

    let already_customer = ReferenceSnapshot {
        customer_flag: true,
        ..snapshot()
    };
    assert!(compute_extended_patch(&customer, &already_customer).unwrap().is_empty());
}

#[test]
fn vendor_names_and_dunning_are_sent_verbatim() {
    let mut partner = draft("Acme");
    partner.vendor_pricing_system = Some("Not In Any List".to_string());
    partner.vendor_discount_schema = Some("Vendor DS".to_string());
    partner.customer_dunning = Some("Dunning".to_string());

    let ops = compute_extended_patch(&partner, &ReferenceSnapshot::default()).unwrap();
    assert_eq!(
        ops,
        vec![
            PatchOp::replace("PO_PricingSystem_ID", "Not In Any List"),
            PatchOp::replace("PO_DiscountSchema_ID", "Vendor DS"),
            PatchOp::replace("C_Dunning_ID", "Dunning"),
        ]
    );
}

#[test]
fn customer_pricing_system_resolves_to_key_and_caption() {
    let mut partner = draft("Acme");
    partner.customer_pricing_system = Some("Standard".to_string());

    let ops = compute_extended_patch(&partner, &snapshot()).unwrap();
    assert_eq!(
        serde_json::to_value(&ops).unwrap(),
        json!([{
            "op": "replace",
            "path": "M_PricingSystem_ID",
            "value": { "key": 7, "caption": "Standard" }
        }])
    );
}

#[test]
fn discount_schema_and_payment_term_resolve_by_caption() {
    let mut partner = draft("Acme");
    partner.customer_discount_schema = Some("Rebate".to_string());
    partner.payment_term = Some("30 days net".to_string());

    let ops = compute_extended_patch(&partner, &snapshot()).unwrap();
    assert_eq!(
        ops,
        vec![
            PatchOp::replace("M_DiscountSchema_ID", json!({ "key": 3, "caption": "Rebate" })),
            PatchOp::replace(
                "C_PaymentTerm_ID",
                json!({ "key": "1000009", "caption": "30 days net" })
            ),
        ]
    );
}

#[test]
fn unresolvable_name_fails_the_computation() {
    let mut partner = draft("Acme");
    partner.is_vendor = true;
    partner.payment_term = Some("60 days net".to_string());

    let err = compute_extended_patch(&partner, &snapshot()).unwrap_err();
    assert_eq!(
        err,
        LookupError::NotFound {
            name: "60 days net".to_string()
        }
    );
}
