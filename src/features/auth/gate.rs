//! Shared-secret authorization for admin endpoints.
//!
//! The credential is taken from the `Authorization` header as-is. When that
//! header is missing or empty, the `admin_password` field of a JSON body is
//! used instead.

use axum::http::{header, HeaderMap};

use crate::core::error::AppError;

/// JSON body field that may carry the admin credential
pub const BODY_CREDENTIAL_FIELD: &str = "admin_password";

#[derive(Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Exact, case-sensitive comparison against the configured secret
    pub fn authorize(&self, credential: Option<&str>) -> Result<(), AppError> {
        match credential {
            Some(supplied) if supplied == self.secret => Ok(()),
            Some(_) => Err(AppError::Unauthorized("Invalid admin credential".to_string())),
            None => Err(AppError::Unauthorized("Missing admin credential".to_string())),
        }
    }
}

/// Credential from the `Authorization` header, ignoring empty values
pub fn header_credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Whether the request declares a JSON body
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.starts_with("application/json") || ct.ends_with("+json"))
        .unwrap_or(false)
}

/// Credential from a JSON body; anything unparsable yields none
pub fn body_credential(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get(BODY_CREDENTIAL_FIELD)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
