//! Test utilities for integration tests.
//!
//! Helpers for building the application router over a temporary storage
//! directory, generating image fixtures, and crafting multipart upload
//! requests.

use std::io::Cursor;
use std::path::Path;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use image::{Rgb, RgbImage};

use image_vault::convert::{ConversionLimiter, WebpConverter};
use image_vault::server::{create_router, AppState, RouterConfig};
use image_vault::storage::ImageStore;

/// Bearer token used by all tests.
pub const TEST_TOKEN: &str = "test-token";

/// Multipart boundary used by crafted upload bodies.
pub const BOUNDARY: &str = "image-vault-test-boundary";

// =============================================================================
// Application Setup
// =============================================================================

/// Build the full application router over the given storage directory.
///
/// Uses a conversion limit of 2 and no max-side clamp; tracing is disabled to
/// keep test output quiet.
pub fn test_app(storage_dir: &Path) -> Router {
    test_app_with(storage_dir, 0, 2)
}

/// Build the router with explicit max-side and conversion-limit settings.
pub fn test_app_with(storage_dir: &Path, max_side: u32, max_conversions: usize) -> Router {
    let state = AppState::new(
        ImageStore::new(storage_dir),
        WebpConverter::new(80, 2, max_side),
        ConversionLimiter::new(max_conversions),
    );

    let config = RouterConfig::new(TEST_TOKEN).with_tracing(false);
    create_router(state, config)
}

// =============================================================================
// Fixtures
// =============================================================================

/// A 40x40 solid-color PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(40, 40, Rgb([12, 200, 50]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// A 40x40 solid-color JPEG.
pub fn jpeg_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(40, 40, Rgb([200, 12, 50]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    buf
}

/// Whether the bytes form a WebP container (RIFF....WEBP).
pub fn is_webp(data: &[u8]) -> bool {
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}

/// Whether a name is `<32 lowercase hex>.webp`.
pub fn is_generated_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, "webp")) => {
            stem.len() == 32
                && stem
                    .chars()
                    .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        }
        _ => false,
    }
}

/// Names of all regular files directly under `dir`.
pub fn stored_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

// =============================================================================
// Request Builders
// =============================================================================

/// Build a multipart upload request for `POST /api/images`.
///
/// `token` is added as a bearer Authorization header when present.
pub fn upload_request(token: Option<&str>, data: &[u8]) -> Request<Body> {
    upload_request_with_field(token, "file", data)
}

/// Build an upload request with a custom multipart field name.
pub fn upload_request_with_field(
    token: Option<&str>,
    field: &str,
    data: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"upload.bin\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/images")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    builder.body(Body::from(body)).unwrap()
}

/// Build a delete request for `DELETE /api/images/{name}`.
///
/// `name` is inserted into the URI verbatim, so tests can percent-encode
/// separators to probe the validator.
pub fn delete_request(token: Option<&str>, name: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("DELETE")
        .uri(format!("/api/images/{name}"));

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

/// Build a plain GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
