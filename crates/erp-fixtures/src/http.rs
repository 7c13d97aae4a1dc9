// crates/erp-fixtures/src/http.rs
// ============================================================================
// Module: Window REST Client
// Description: HTTP access to ERP window documents and dropdowns.
// Purpose: Normalize window API responses into a uniform wrapped shape.
// Dependencies: erp-fixtures-config, reqwest, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`WindowClient`] issues the PATCH and GET calls of the window REST API and
//! returns every response as a [`WrappedResponse`]: the parsed body plus a
//! name-indexed view of the document fields.
//! Invariants:
//! - Non-success statuses fail with [`FixtureError::Status`]; bodies are not
//!   inspected.
//! - Transport failures are surfaced unchanged as [`FixtureError::Http`].
//! - Path segments are percent-encoded; ids and tab names never alter the path
//!   structure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use erp_fixtures_config::FixtureConfig;
use reqwest::Client;
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::error::FixtureError;
use crate::lookup::ReferenceRecord;
use crate::patch::PatchOp;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Segment used to create a new window document.
const NEW_RECORD_SEGMENT: &str = "NEW";

/// Server-issued window document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps a raw document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Wrapped Responses
// ============================================================================

/// Value and metadata of a single document field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDescriptor {
    /// Current field value (`null` when the server omits it).
    pub value: Value,
    /// Remaining descriptor entries (read-only flags, display hints, ...).
    pub metadata: Map<String, Value>,
}

impl FieldDescriptor {
    /// Splits a JSON field descriptor into value and metadata.
    fn from_json(descriptor: &Value) -> Self {
        match descriptor {
            Value::Object(entries) => {
                let mut metadata = entries.clone();
                let value = metadata.remove("value").unwrap_or(Value::Null);
                Self {
                    value,
                    metadata,
                }
            }
            other => Self {
                value: other.clone(),
                metadata: Map::new(),
            },
        }
    }
}

/// Parsed response body with a name-indexed field view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedResponse {
    /// Raw parsed body (`null` for empty bodies).
    pub body: Value,
    /// Fields of the first returned document, keyed by field name.
    pub fields_by_name: BTreeMap<String, FieldDescriptor>,
}

impl WrappedResponse {
    /// Wraps an already parsed body.
    ///
    /// The body may be a document or an array of documents; the first document
    /// contributes `fields_by_name` either from its `fieldsByName` object or
    /// from a `fields` list whose entries carry a `field` name.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let fields_by_name = first_document(&body).map(document_fields).unwrap_or_default();
        Self {
            body,
            fields_by_name,
        }
    }

    /// Checks the status and parses the body of an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Status`] for non-success statuses,
    /// [`FixtureError::Http`] when the body cannot be read, and
    /// [`FixtureError::Decode`] when it is not JSON.
    pub async fn from_response(response: Response) -> Result<Self, FixtureError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FixtureError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let bytes = response.bytes().await.map_err(|err| FixtureError::Http(err.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|err| FixtureError::Decode(err.to_string()))?;
        Ok(Self::from_body(body))
    }

    /// Returns the descriptor of a named field.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingField`] when the field is absent.
    pub fn field(&self, name: &str) -> Result<&FieldDescriptor, FixtureError> {
        self.fields_by_name.get(name).ok_or_else(|| FixtureError::MissingField(name.to_string()))
    }

    /// Returns a boolean field; anything but JSON `true` reads as unset.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingField`] when the field is absent.
    pub fn flag(&self, name: &str) -> Result<bool, FixtureError> {
        Ok(self.field(name)?.value == Value::Bool(true))
    }

    /// Returns the id of the first returned document.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingField`] when no document id is present.
    pub fn document_id(&self) -> Result<RecordId, FixtureError> {
        let id = first_document(&self.body).and_then(|document| document.get("id"));
        match id {
            Some(Value::String(id)) if !id.is_empty() => Ok(RecordId::new(id.as_str())),
            Some(Value::Number(id)) => Ok(RecordId::new(id.to_string())),
            _ => Err(FixtureError::MissingField("id".to_string())),
        }
    }
}

/// Returns the first document of a body.
fn first_document(body: &Value) -> Option<&Value> {
    match body {
        Value::Array(documents) => documents.first(),
        Value::Object(_) => Some(body),
        _ => None,
    }
}

/// Indexes the fields of a document by name.
fn document_fields(document: &Value) -> BTreeMap<String, FieldDescriptor> {
    if let Some(Value::Object(by_name)) = document.get("fieldsByName") {
        return by_name
            .iter()
            .map(|(name, descriptor)| (name.clone(), FieldDescriptor::from_json(descriptor)))
            .collect();
    }
    if let Some(Value::Array(fields)) = document.get("fields") {
        return fields
            .iter()
            .filter_map(|entry| {
                let name = entry.get("field").and_then(Value::as_str)?;
                Some((name.to_string(), FieldDescriptor::from_json(entry)))
            })
            .collect();
    }
    BTreeMap::new()
}

/// Dropdown endpoint payload.
#[derive(Debug, Deserialize)]
struct DropdownResponse {
    /// Available options.
    values: Vec<ReferenceRecord>,
}

// ============================================================================
// SECTION: Window Client
// ============================================================================

/// REST client bound to a single ERP window.
///
/// # Invariants
/// - `window_url` is `{api_url}/window/{window_id}` and can serve as a base.
#[derive(Debug, Clone)]
pub struct WindowClient {
    /// Window base URL.
    window_url: Url,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl WindowClient {
    /// Builds a client for the business partner window of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &FixtureConfig) -> Result<Self, FixtureError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| FixtureError::Http(err.to_string()))?;
        Self::with_client(&config.api_url, config.bpartner_window.window_id, client)
    }

    /// Builds a client from an existing reqwest client.
    ///
    /// Use this to share a session-carrying client with the test harness.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Http`] when `api_url` cannot serve as a base URL.
    pub fn with_client(api_url: &str, window_id: u32, client: Client) -> Result<Self, FixtureError> {
        let api_url = Url::parse(api_url).map_err(|err| FixtureError::Http(err.to_string()))?;
        let window_id = window_id.to_string();
        let window_url = extend_url(&api_url, &["window", window_id.as_str()])?;
        Ok(Self {
            window_url,
            client,
        })
    }

    /// Returns the window base URL.
    #[must_use]
    pub const fn window_url(&self) -> &Url {
        &self.window_url
    }

    /// Creates an empty document and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the request fails or no id is returned.
    pub async fn create_record(&self) -> Result<RecordId, FixtureError> {
        let url = extend_url(&self.window_url, &[NEW_RECORD_SEGMENT])?;
        self.send_patch(url, &[]).await?.document_id()
    }

    /// Patches fields of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the request fails.
    pub async fn patch_record(
        &self,
        id: &RecordId,
        ops: &[PatchOp],
    ) -> Result<WrappedResponse, FixtureError> {
        let url = extend_url(&self.window_url, &[id.as_str()])?;
        self.send_patch(url, ops).await
    }

    /// Patches fields of an existing document in advanced-edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the request fails.
    pub async fn patch_record_advanced(
        &self,
        id: &RecordId,
        ops: &[PatchOp],
    ) -> Result<WrappedResponse, FixtureError> {
        let mut url = extend_url(&self.window_url, &[id.as_str()])?;
        url.query_pairs_mut().append_pair("advanced", "true");
        self.send_patch(url, ops).await
    }

    /// Reads the field data of a document tab.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the request fails.
    pub async fn tab_fields(
        &self,
        id: &RecordId,
        tab: &str,
    ) -> Result<WrappedResponse, FixtureError> {
        let url = extend_url(&self.window_url, &[id.as_str(), tab])?;
        self.send_get(url).await
    }

    /// Reads the dropdown options of a tab field.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the request fails or the payload lacks
    /// a `values` list.
    pub async fn dropdown(
        &self,
        id: &RecordId,
        tab: &str,
        field: &str,
    ) -> Result<Vec<ReferenceRecord>, FixtureError> {
        let url = extend_url(
            &self.window_url,
            &[id.as_str(), tab, id.as_str(), "field", field, "dropdown"],
        )?;
        let response = self.send_get(url).await?;
        let dropdown: DropdownResponse = serde_json::from_value(response.body)
            .map_err(|err| FixtureError::Decode(format!("dropdown {field}: {err}")))?;
        Ok(dropdown.values)
    }

    /// Sends a PATCH with a JSON patch array.
    async fn send_patch(&self, url: Url, ops: &[PatchOp]) -> Result<WrappedResponse, FixtureError> {
        tracing::debug!(method = "PATCH", url = %url, ops = ops.len(), "window request");
        let response = self
            .client
            .patch(url)
            .json(ops)
            .send()
            .await
            .map_err(|err| FixtureError::Http(err.to_string()))?;
        WrappedResponse::from_response(response).await
    }

    /// Sends a GET for window data.
    async fn send_get(&self, url: Url) -> Result<WrappedResponse, FixtureError> {
        tracing::debug!(method = "GET", url = %url, "window request");
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| FixtureError::Http(err.to_string()))?;
        WrappedResponse::from_response(response).await
    }
}

/// Appends percent-encoded path segments to a base URL.
fn extend_url(base: &Url, segments: &[&str]) -> Result<Url, FixtureError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| FixtureError::Http(format!("url cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
