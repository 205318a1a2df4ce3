//! Access gate: credential verification and request-scoped sessions.
//!
//! The credential comparison sits behind the [`CredentialVerifier`] seam so
//! it can be re-backed without touching the core, and login state is a
//! bearer token checked per request by the [`SessionAuth`] extractor rather
//! than anything process-wide.
//!
//! This is a convenience gate, not a security boundary: tokens are plain
//! random strings held in memory with no expiry, and credentials are
//! compared in clear text.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::api::envelope::ApiErrorResponse;
use crate::api::ControllerState;
use crate::config::defaults::SESSION_TOKEN_LEN;

// ============================================================================
// Credential Verification
// ============================================================================

/// Capability to verify a username/password pair.
///
/// Injected into the API state so the gate can be re-backed (directory
/// service, fleet hub, test stub) without touching anything downstream.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Config-backed verifier: one static username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build from the `[auth]` config section.
    pub fn from_config(auth: &crate::config::AuthConfig) -> Self {
        Self::new(auth.username.clone(), auth.password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// In-memory bearer-token store. Tokens live until process exit.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh session token and remember it.
    pub fn issue(&self) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect();
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.clone());
        }
        token
    }

    /// Check whether a token belongs to an active session.
    pub fn is_active(&self, token: &str) -> bool {
        self.tokens
            .read()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }

    /// Drop a session (logout).
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .map(|mut tokens| tokens.remove(token))
            .unwrap_or(false)
    }
}

// ============================================================================
// Request Extractor
// ============================================================================

/// Proof that the request carried an active session token.
///
/// Extracting this in a handler is what marks an endpoint as gated.
pub struct SessionAuth {
    pub token: String,
}

/// Extract Bearer token from Authorization header.
fn extract_bearer(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

#[async_trait]
impl FromRequestParts<ControllerState> for SessionAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ControllerState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(parts)
            .ok_or_else(|| ApiErrorResponse::unauthorized("Missing Bearer token"))?;

        if !state.sessions.is_active(&token) {
            return Err(ApiErrorResponse::forbidden("Invalid or expired session"));
        }

        Ok(SessionAuth { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials_verify() {
        let verifier = StaticCredentials::new("admin", "admin123");
        assert!(verifier.verify("admin", "admin123"));
        assert!(!verifier.verify("admin", "wrong"));
        assert!(!verifier.verify("root", "admin123"));
    }

    #[test]
    fn test_issued_token_is_active_until_revoked() {
        let store = SessionStore::new();
        let token = store.issue();
        assert_eq!(token.len(), SESSION_TOKEN_LEN);
        assert!(store.is_active(&token));

        assert!(store.revoke(&token));
        assert!(!store.is_active(&token));
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_unknown_token_is_not_active() {
        let store = SessionStore::new();
        assert!(!store.is_active("nope"));
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        assert_ne!(store.issue(), store.issue());
    }
}
