//! Concurrency integration tests.
//!
//! The conversion bound itself is asserted in the limiter's unit tests; here
//! we verify the end-to-end property: more parallel uploads than conversion
//! slots all complete successfully, none dropped, none corrupted.

use axum::http::StatusCode;
use tower::ServiceExt;

use super::test_utils::{
    is_generated_name, is_webp, png_bytes, stored_files, test_app_with, upload_request, TEST_TOKEN,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_uploads_beyond_limit_all_succeed() {
    const UPLOADS: usize = 6;

    let dir = tempfile::tempdir().unwrap();
    // One conversion slot forces every upload but one to wait its turn.
    let app = test_app_with(dir.path(), 0, 1);

    let mut handles = Vec::new();
    for _ in 0..UPLOADS {
        let app = app.clone();
        let payload = png_bytes();
        handles.push(tokio::spawn(async move {
            app.oneshot(upload_request(Some(TEST_TOKEN), &payload))
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    // Every upload produced its own intact, decodable WebP.
    let files = stored_files(dir.path());
    assert_eq!(files.len(), UPLOADS);
    for name in files {
        assert!(is_generated_name(&name), "unexpected name: {name}");
        let stored = std::fs::read(dir.path().join(&name)).unwrap();
        assert!(is_webp(&stored));
        assert!(image::load_from_memory(&stored).is_ok());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_valid_and_invalid_parallel_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app_with(dir.path(), 0, 2);

    let mut handles = Vec::new();
    for i in 0..6 {
        let app = app.clone();
        let payload = if i % 2 == 0 {
            png_bytes()
        } else {
            b"not an image".to_vec()
        };
        handles.push(tokio::spawn(async move {
            (
                i,
                app.oneshot(upload_request(Some(TEST_TOKEN), &payload))
                    .await
                    .unwrap(),
            )
        }));
    }

    for handle in handles {
        let (i, response) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        } else {
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    // Only the valid uploads left files behind.
    assert_eq!(stored_files(dir.path()).len(), 3);
}
