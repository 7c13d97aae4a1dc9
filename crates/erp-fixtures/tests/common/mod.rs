// crates/erp-fixtures/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Stub ERP window API for erp-fixtures integration tests.
// Purpose: Serve canned window responses and record every request.
// Dependencies: axum, erp-fixtures, serde_json, tokio
// ============================================================================

//! ## Overview
//! [`StubErp`] runs an axum server on its own thread and runtime, so
//! concurrent reference reads are served in parallel. It answers the business
//! partner window routes for record [`RECORD_ID`] and keeps a log of received
//! requests for assertions.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::future::IntoFuture;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use erp_fixtures::BPartnerWindow;
use erp_fixtures::FixtureConfig;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Id assigned to every created document.
pub const RECORD_ID: &str = "1000001";

/// Window path served by the stub.
const WINDOW_PATH: &str = "/rest/api/window/123";

// ============================================================================
// SECTION: Stub Options
// ============================================================================

/// Server-side state returned by the stub.
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    /// Current value of `IsVendor`.
    pub vendor_flag: bool,
    /// Current value of `IsCustomer`.
    pub customer_flag: bool,
    /// Path (without query) answered with HTTP 500.
    pub failing_path: Option<String>,
}

/// Request received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Path and query.
    pub url: String,
    /// Raw body.
    pub body: String,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body json")
    }

    /// Returns the path without query.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

/// Shared handler state.
#[derive(Clone)]
struct StubState {
    /// Canned server state.
    options: Arc<StubOptions>,
    /// Received requests in arrival order.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

// ============================================================================
// SECTION: Stub Server
// ============================================================================

/// Stub window API bound to an ephemeral port.
pub struct StubErp {
    /// Base URL, e.g. `http://127.0.0.1:1234`.
    base_url: String,
    /// Received requests in arrival order.
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Shutdown signal for the server.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
}

impl StubErp {
    /// Starts a stub with default options.
    pub fn start() -> Self {
        Self::start_with(StubOptions::default())
    }

    /// Starts a stub with explicit options.
    pub fn start_with(options: StubOptions) -> Self {
        erp_fixtures::telemetry::init_tracing();
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("stub bind");
        listener.set_nonblocking(true).expect("stub listener nonblocking");
        let base_url = format!("http://{}", listener.local_addr().expect("stub local addr"));

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            options: Arc::new(options),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle_request).with_state(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = thread::spawn(move || {
            let runtime = Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                // Open client connections are dropped with the runtime.
                tokio::select! {
                    result = axum::serve(listener, app).into_future() => {
                        result.expect("stub server");
                    }
                    _ = shutdown_rx => {}
                }
            });
        });

        Self {
            base_url,
            requests,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        }
    }

    /// Returns configuration pointing at the stub.
    pub fn config(&self) -> FixtureConfig {
        FixtureConfig::from_toml_str(&format!(
            "api_url = \"{}/rest/api/\"\nrequest_timeout_secs = 5\n",
            self.base_url
        ))
        .expect("stub config")
    }

    /// Returns window access bound to the stub.
    pub fn window(&self) -> BPartnerWindow {
        BPartnerWindow::new(&self.config()).expect("bpartner window")
    }

    /// Returns a snapshot of received requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }

    /// Returns received requests with the given method.
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|request| request.method == method).collect()
    }
}

impl Drop for StubErp {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Routing
// ============================================================================

/// Records and answers one request.
async fn handle_request(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    body: String,
) -> impl IntoResponse {
    let recorded = RecordedRequest {
        method: method.to_string(),
        url: uri.path_and_query().map_or_else(|| uri.path().to_string(), ToString::to_string),
        body,
    };
    let (status, payload) = route(&state.options, &recorded);
    state.requests.lock().expect("request log").push(recorded);
    (status, Json(payload))
}

/// Selects the canned answer for a request.
fn route(options: &StubOptions, request: &RecordedRequest) -> (StatusCode, Value) {
    let path = request.path();
    if options.failing_path.as_deref() == Some(path) {
        return (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "stub failure" }));
    }
    let Some(rest) = path.strip_prefix(WINDOW_PATH) else {
        return (StatusCode::NOT_FOUND, json!({ "message": "unknown window" }));
    };
    let segments: Vec<&str> = rest.trim_start_matches('/').split('/').collect();
    match (request.method.as_str(), segments.as_slice()) {
        ("PATCH", ["NEW" | RECORD_ID]) => (StatusCode::OK, document(json!({}))),
        ("GET", [RECORD_ID, "AD_Tab-224"]) => (
            StatusCode::OK,
            document(json!({ "IsVendor": { "field": "IsVendor", "value": options.vendor_flag } })),
        ),
        ("GET", [RECORD_ID, "AD_Tab-223"]) => (
            StatusCode::OK,
            document(json!({
                "IsCustomer": { "field": "IsCustomer", "value": options.customer_flag }
            })),
        ),
        ("GET", [RECORD_ID, "AD_Tab-223", RECORD_ID, "field", field, "dropdown"]) => {
            (StatusCode::OK, dropdown(field))
        }
        _ => (StatusCode::NOT_FOUND, json!({ "message": "unknown route" })),
    }
}

/// Wraps fields into a single-document response.
fn document(fields_by_name: Value) -> Value {
    json!([{ "id": RECORD_ID, "fieldsByName": fields_by_name }])
}

/// Returns dropdown options for a customer field.
fn dropdown(field: &str) -> Value {
    match field {
        "M_DiscountSchema_ID" => json!({ "values": [{ "key": 3, "caption": "Rebate" }] }),
        "M_PricingSystem_ID" => json!({
            "values": [
                { "key": 6, "caption": "Sales" },
                { "key": 7, "caption": "Standard" }
            ]
        }),
        "C_PaymentTerm_ID" => json!({
            "values": [{ "key": 1_000_009, "caption": "30 days net" }]
        }),
        _ => json!({ "values": [] }),
    }
}
