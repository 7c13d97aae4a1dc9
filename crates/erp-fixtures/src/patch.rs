// crates/erp-fixtures/src/patch.rs
// ============================================================================
// Module: JSON Patch Operations
// Description: Field-level update instructions for window documents.
// Purpose: Serialize `{op, path, value}` entries accepted by the window API.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`PatchOp`] is a single field-level update sent to the server. Only
//! `replace` is used; `path` is a plain field name, not a JSON pointer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Patch Types
// ============================================================================

/// Patch operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOpKind {
    /// Overwrite the field value.
    Replace,
}

/// Single field update sent in a window PATCH body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOp {
    /// Operation kind.
    pub op: PatchOpKind,
    /// Target field name.
    pub path: String,
    /// New field value.
    pub value: Value,
}

impl PatchOp {
    /// Builds a `replace` operation for `path`.
    #[must_use]
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOpKind::Replace,
            path: path.into(),
            value: value.into(),
        }
    }
}
