//! Bearer token authentication.
//!
//! Mutating routes (upload, delete) require an `Authorization` header whose
//! value exactly matches `Bearer <token>` for the configured shared secret.
//! The comparison runs in constant time via [`subtle::ConstantTimeEq`] so the
//! check leaks no timing information about the secret.
//!
//! The public read path (`/images/...`) and the health check are not guarded.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use http::header::AUTHORIZATION;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header was sent
    MissingToken,

    /// The Authorization header did not match the configured token
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing bearer token"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (error_type, message) = match &self {
            AuthError::MissingToken => ("missing_token", self.to_string()),
            AuthError::InvalidToken => ("invalid_token", self.to_string()),
        };

        // A wrong token could indicate probing, log at warn; a missing header
        // is usually a misconfigured client, debug is enough.
        match &self {
            AuthError::InvalidToken => {
                warn!(error_type = error_type, "Authentication failed: {}", message);
            }
            AuthError::MissingToken => {
                debug!(error_type = error_type, "Authentication failed: {}", message);
            }
        }

        let error_response = ErrorResponse::new(error_type, message);
        (StatusCode::UNAUTHORIZED, Json(error_response)).into_response()
    }
}

// =============================================================================
// Bearer Authentication
// =============================================================================

/// Shared-secret bearer token authenticator.
#[derive(Clone)]
pub struct BearerAuth {
    /// The full expected header value, `Bearer <token>`
    expected: Vec<u8>,
}

impl BearerAuth {
    /// Create an authenticator for the given shared secret.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self {
            expected: format!("Bearer {}", token.as_ref()).into_bytes(),
        }
    }

    /// Verify the raw `Authorization` header value, if any.
    ///
    /// The comparison is constant-time over the full header value;
    /// [`ConstantTimeEq`] short-circuits only on length, which is not secret.
    pub fn verify(&self, header: Option<&[u8]>) -> Result<(), AuthError> {
        let provided = header.ok_or(AuthError::MissingToken)?;

        if provided.ct_eq(&self.expected).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware rejecting requests without a valid bearer token.
///
/// Applied to the mutating API routes; rejected requests get a 401 with a
/// JSON error body and never reach the handler.
pub async fn require_bearer(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.as_bytes());

    auth.verify(header)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
