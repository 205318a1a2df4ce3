//! API route handlers
//!
//! Request handling logic for all endpoints: the login gate, interactive
//! compute, CSV batch, explanation view, PDF report and the recent-decision
//! ring for the dashboard. Input validation happens here, at the boundary —
//! the inference core itself is total and never errors.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::auth::{CredentialVerifier, SessionAuth, SessionStore};
use crate::config::defaults::{INPUT_MAX, INPUT_MIN};
use crate::state::AppState;
use crate::types::{DecisionRecord, RuleActivations, SpeedBand, WashDecision};
use crate::{batch, fuzzy, report};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ControllerState {
    /// Mutable service state (last decision, recent ring, counters)
    pub app_state: Arc<RwLock<AppState>>,
    /// Active session tokens
    pub sessions: SessionStore,
    /// Injected credential verification capability
    pub verifier: Arc<dyn CredentialVerifier>,
    /// Machine ID for responses and logs
    pub machine_id: String,
    /// Startup instant for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl ControllerState {
    /// Create state with an explicit verifier (tests inject stubs here).
    pub fn new(verifier: Arc<dyn CredentialVerifier>, machine_id: &str) -> Self {
        Self {
            app_state: Arc::new(RwLock::new(AppState::default())),
            sessions: SessionStore::new(),
            verifier,
            machine_id: machine_id.to_string(),
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body for compute and report endpoints.
#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    pub weight: f64,
    pub dirt: f64,
}

/// Full decision payload returned by compute and explain.
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub speed_rpm: f64,
    pub activations: RuleActivations,
    pub lean: SpeedBand,
    pub advisory: &'static str,
    pub explanation: String,
}

impl From<WashDecision> for DecisionResponse {
    fn from(decision: WashDecision) -> Self {
        Self {
            speed_rpm: decision.speed_rpm,
            activations: decision.activations,
            lean: decision.lean,
            advisory: decision.lean.advisory(),
            explanation: decision.explanation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub machine_id: String,
    pub machine_name: String,
    pub uptime_secs: i64,
    pub decisions_total: u64,
    pub last_decision_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Input Validation
// ============================================================================

/// Boundary check: both controller inputs must be finite and inside the
/// declared universe.
fn validate_input(name: &str, value: f64) -> Result<f64, Response> {
    if !value.is_finite() || value < INPUT_MIN || value > INPUT_MAX {
        return Err(ApiErrorResponse::bad_request(format!(
            "{name} must be a finite number in [{INPUT_MIN}, {INPUT_MAX}]"
        )));
    }
    Ok(value)
}

// ============================================================================
// Gate Endpoints
// ============================================================================

/// POST /api/v1/login
///
/// Verifies credentials through the injected verifier and issues a session
/// token for the protected endpoints.
pub async fn post_login(
    State(state): State<ControllerState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if !state.verifier.verify(&request.username, &request.password) {
        tracing::warn!(username = %request.username, "Rejected login attempt");
        return ApiErrorResponse::unauthorized("Invalid username or password");
    }

    let token = state.sessions.issue();
    tracing::info!(username = %request.username, "Login successful");
    ApiResponse::ok(LoginResponse { token })
}

/// POST /api/v1/logout
pub async fn post_logout(State(state): State<ControllerState>, auth: SessionAuth) -> Response {
    state.sessions.revoke(&auth.token);
    ApiResponse::ok(serde_json::json!({ "logged_out": true }))
}

// ============================================================================
// Open Endpoints
// ============================================================================

/// GET /api/v1/health
pub async fn get_health(State(state): State<ControllerState>) -> Response {
    ApiResponse::ok(serde_json::json!({
        "status": "ok",
        "machine_id": state.machine_id,
    }))
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<ControllerState>) -> Response {
    let app_state = state.app_state.read().await;
    let config = crate::config::get();

    ApiResponse::ok(StatusResponse {
        machine_id: state.machine_id.clone(),
        machine_name: config.machine.name.clone(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        decisions_total: app_state.decisions_total,
        last_decision_at: app_state.last_decision.as_ref().map(|r| r.timestamp),
    })
}

// ============================================================================
// Decision Endpoints (gated)
// ============================================================================

/// POST /api/v1/compute
///
/// Runs the inference core for one input pair and records the decision.
pub async fn post_compute(
    State(state): State<ControllerState>,
    _auth: SessionAuth,
    Json(request): Json<ComputeRequest>,
) -> Response {
    let (weight, dirt) = match (
        validate_input("weight", request.weight),
        validate_input("dirt", request.dirt),
    ) {
        (Ok(w), Ok(d)) => (w, d),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };

    let decision = fuzzy::compute(weight, dirt);
    tracing::info!(
        weight,
        dirt,
        speed_rpm = decision.speed_rpm,
        lean = decision.lean.short_code(),
        "Decision computed"
    );

    state.app_state.write().await.record(DecisionRecord {
        timestamp: Utc::now(),
        weight,
        dirt,
        decision: decision.clone(),
    });

    ApiResponse::ok(DecisionResponse::from(decision))
}

/// GET /api/v1/explain?weight=..&dirt=..
///
/// What-if view: same decision payload as compute, but nothing is recorded.
pub async fn get_explain(
    State(_state): State<ControllerState>,
    _auth: SessionAuth,
    Query(request): Query<ComputeRequest>,
) -> Response {
    let (weight, dirt) = match (
        validate_input("weight", request.weight),
        validate_input("dirt", request.dirt),
    ) {
        (Ok(w), Ok(d)) => (w, d),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };

    ApiResponse::ok(DecisionResponse::from(fuzzy::compute(weight, dirt)))
}

/// GET /api/v1/decisions/recent
pub async fn get_recent_decisions(
    State(state): State<ControllerState>,
    _auth: SessionAuth,
) -> Response {
    let app_state = state.app_state.read().await;
    let recent: Vec<&DecisionRecord> = app_state.recent.iter().collect();
    ApiResponse::ok(serde_json::json!({ "decisions": recent }))
}

// ============================================================================
// Batch Endpoint (gated)
// ============================================================================

/// POST /api/v1/batch
///
/// Body is CSV text with `weight`/`dirt` columns; the response is the same
/// CSV with the speed column appended, rows in input order.
pub async fn post_batch(
    State(state): State<ControllerState>,
    _auth: SessionAuth,
    body: String,
) -> Response {
    let input = match batch::parse_rows(&body) {
        Ok(input) => input,
        Err(e) => return ApiErrorResponse::bad_request(e.to_string()),
    };

    let row_count = input.rows.len() as u64;
    let outcome = batch::process(input);
    let csv = batch::render_csv(&outcome);

    state.app_state.write().await.count_batch(row_count);
    tracing::info!(rows = row_count, "Batch processed");

    ([(header::CONTENT_TYPE, "text/csv")], csv).into_response()
}

// ============================================================================
// Report Endpoint (gated)
// ============================================================================

/// POST /api/v1/report
///
/// Renders the fixed-layout PDF report for one input pair.
pub async fn post_report(
    State(_state): State<ControllerState>,
    _auth: SessionAuth,
    Json(request): Json<ComputeRequest>,
) -> Response {
    let (weight, dirt) = match (
        validate_input("weight", request.weight),
        validate_input("dirt", request.dirt),
    ) {
        (Ok(w), Ok(d)) => (w, d),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };

    let wash_report = report::WashReport::new(weight, dirt, fuzzy::compute(weight, dirt));
    let pdf = wash_report.render_pdf();

    (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"washsense_report.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response()
}
