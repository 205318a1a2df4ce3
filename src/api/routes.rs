//! API route definitions
//!
//! Organizes endpoints for the washsense panel:
//! - /api/v1/login, /api/v1/logout - access gate
//! - /api/v1/health, /api/v1/status - liveness and counters (open)
//! - /api/v1/compute - one inference call (gated)
//! - /api/v1/explain - what-if decision view (gated)
//! - /api/v1/batch - CSV in, CSV out (gated)
//! - /api/v1/report - PDF report (gated)
//! - /api/v1/decisions/recent - dashboard ring (gated)

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, ControllerState};

/// Create all API routes for the panel
pub fn api_routes(state: ControllerState) -> Router {
    Router::new()
        .route("/login", post(handlers::post_login))
        .route("/logout", post(handlers::post_logout))
        .route("/health", get(handlers::get_health))
        .route("/status", get(handlers::get_status))
        .route("/compute", post(handlers::post_compute))
        .route("/explain", get(handlers::get_explain))
        .route("/batch", post(handlers::post_batch))
        .route("/report", post(handlers::post_report))
        .route("/decisions/recent", get(handlers::get_recent_decisions))
        .with_state(state)
}

/// Legacy health endpoint at root level
pub fn legacy_routes(state: ControllerState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::config::{self, MachineConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn ensure_config() {
        if !config::is_initialized() {
            config::init(MachineConfig::default());
        }
    }

    fn create_test_state() -> ControllerState {
        ControllerState::new(Arc::new(StaticCredentials::new("admin", "admin123")), "TEST")
    }

    #[tokio::test]
    async fn test_api_routes_health() {
        ensure_config();
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_status() {
        ensure_config();
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compute_requires_session() {
        ensure_config();
        let app = api_routes(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/compute")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"weight": 5.0, "dirt": 5.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
