//! Authentication integration tests.
//!
//! Tests verify:
//! - Mutating routes reject missing and wrong tokens with 401
//! - Rejected requests never touch the filesystem
//! - The read path and health check stay public

use axum::http::StatusCode;
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::test_utils::{
    delete_request, png_bytes, stored_files, test_app, upload_request, TEST_TOKEN,
};

// =============================================================================
// Upload Authorization
// =============================================================================

#[tokio::test]
async fn test_upload_without_token_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(upload_request(None, &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "missing_token");

    // No file may be created by an unauthorized upload.
    assert!(stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_upload_with_wrong_token_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(upload_request(Some("wrong-token"), &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_token");

    assert!(stored_files(dir.path()).is_empty());
}

// =============================================================================
// Delete Authorization
// =============================================================================

#[tokio::test]
async fn test_delete_without_token_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.webp"), b"payload").unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(delete_request(None, "sample.webp"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(dir.path().join("sample.webp").exists());
}

#[tokio::test]
async fn test_delete_with_wrong_token_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.webp"), b"payload").unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(delete_request(Some("wrong-token"), "sample.webp"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(dir.path().join("sample.webp").exists());
}

#[tokio::test]
async fn test_auth_check_runs_before_name_validation() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());

    // A malformed name without a token is a 401, not a 400.
    let response = app
        .oneshot(delete_request(None, "not-an-image.png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.webp"), b"payload").unwrap();
    let app = test_app(dir.path());

    let response = app
        .oneshot(delete_request(Some(TEST_TOKEN), "sample.webp"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
