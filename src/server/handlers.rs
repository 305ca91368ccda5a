//! HTTP request handlers for the image API.
//!
//! # Endpoints
//!
//! - `GET /healthz` - Health check endpoint
//! - `POST /api/images` - Upload an image (converted to WebP, token required)
//! - `DELETE /api/images/{name}` - Delete a stored image (token required)

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::convert::{ConversionLimiter, WebpConverter};
use crate::error::{ConvertError, NameError, StorageError};
use crate::storage::{generate_name, validate_name, ImageStore};

/// URL prefix under which stored images are publicly served.
pub const PUBLIC_IMAGE_PREFIX: &str = "/images";

/// Multipart field carrying the uploaded file bytes.
const UPLOAD_FIELD: &str = "file";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// All members are cheap clones over shared immutable settings; the only
/// cross-request mutable state is the limiter's permit counter.
#[derive(Clone)]
pub struct AppState {
    /// Filesystem gateway for stored images
    pub store: ImageStore,

    /// WebP converter configured from settings
    pub converter: WebpConverter,

    /// Semaphore bounding concurrent conversions
    pub limiter: ConversionLimiter,
}

impl AppState {
    /// Create the application state from its components.
    pub fn new(store: ImageStore, converter: WebpConverter, limiter: ConversionLimiter) -> Self {
        Self {
            store,
            converter,
            limiter,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_image")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status, always "ok"
    pub status: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// All failure modes of the image API, mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed image name on the delete path (400)
    Name(NameError),

    /// Conversion failure; undecodable input is 400, encoder faults are 500
    Convert(ConvertError),

    /// Storage failure; missing file is 404, other I/O is 500
    Storage(StorageError),

    /// The multipart body could not be read (400)
    Upload(String),

    /// No `file` field was present in the multipart body (400)
    MissingFile,
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        ApiError::Name(err)
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        ApiError::Convert(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

/// Convert ApiError to an HTTP response.
///
/// 4xx errors are logged at warn level (404s at debug, common and expected),
/// 5xx errors at error level. Clients only ever see the short message, never
/// stack traces or internal paths.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::Name(err) => (StatusCode::BAD_REQUEST, "bad_name", err.to_string()),

            ApiError::Convert(ConvertError::InvalidImage(_)) => (
                StatusCode::BAD_REQUEST,
                "invalid_image",
                "Uploaded file is not a valid image".to_string(),
            ),
            ApiError::Convert(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "conversion_failed",
                err.to_string(),
            ),

            ApiError::Storage(StorageError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Image not found".to_string(),
            ),
            ApiError::Storage(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                err.to_string(),
            ),

            ApiError::Upload(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_upload",
                format!("Failed to read upload: {msg}"),
            ),

            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "missing_file",
                format!("Multipart field '{UPLOAD_FIELD}' is required"),
            ),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response
///
/// `200 OK` with JSON body `{"status": "ok"}`. No authentication.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Handle image uploads.
///
/// # Endpoint
///
/// `POST /api/images` (bearer token required, enforced by middleware)
///
/// # Request
///
/// Multipart body with a `file` field carrying the raw image bytes. The
/// declared content type is ignored; only the bytes are decoded.
///
/// # Response
///
/// - `303 See Other` with `Location: /images/<32-hex>.webp` on success
/// - `400 Bad Request` if the body is not a decodable image
/// - `401 Unauthorized` if the token is missing or wrong
///
/// Nothing is written to storage unless conversion succeeds.
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let raw = read_upload_field(multipart).await?;

    let name = generate_name();

    // CPU-bound decode/encode runs on the blocking pool, bounded by the
    // limiter; the request suspends here when all slots are taken.
    let converter = state.converter.clone();
    let encoded = state.limiter.run(move || converter.convert(&raw)).await?;

    state.store.put(&name, &encoded).await?;

    info!(name = %name, bytes = encoded.len(), "image uploaded");

    let location = format!("{PUBLIC_IMAGE_PREFIX}/{name}");
    Ok(Redirect::to(&location).into_response())
}

/// Handle image deletion.
///
/// # Endpoint
///
/// `DELETE /api/images/{name}` (bearer token required, enforced by middleware)
///
/// # Response
///
/// - `204 No Content` on success
/// - `400 Bad Request` if the name fails validation
/// - `401 Unauthorized` if the token is missing or wrong
/// - `404 Not Found` if no such image exists (repeatable: deleting an
///   already-deleted name yields 404 every time)
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let name = validate_name(&name)?;

    if !state.store.exists(name).await {
        return Err(StorageError::NotFound(name.to_string()).into());
    }

    state.store.delete(name).await?;

    info!(name = %name, "image deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Pull the raw upload bytes out of the multipart body.
///
/// Only the `file` field is consumed; other fields are skipped.
async fn read_upload_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;

        match field {
            Some(field) if field.name() == Some(UPLOAD_FIELD) => {
                return field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()));
            }
            Some(_) => continue,
            None => return Err(ApiError::MissingFile),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
