//! # image-vault
//!
//! A minimal HTTP service for token-protected image storage. Uploads are
//! decoded from any common container format, converted to WebP at a
//! configured quality, stored under random 128-bit identifiers, and served
//! back as public static files.
//!
//! ## Features
//!
//! - **Single canonical format**: every stored image is lossy WebP, named
//!   `<32-hex>.webp` in a flat storage directory
//! - **Bounded conversion**: decode/encode runs on the blocking pool behind a
//!   counting semaphore so upload bursts cannot exhaust CPU or memory
//! - **Traversal-safe deletes**: client-supplied names are validated as bare
//!   `.webp` file names before touching the filesystem
//! - **Shared-secret auth**: mutating routes require a bearer token, compared
//!   in constant time
//!
//! ## Architecture
//!
//! - [`config`] - CLI and configuration types
//! - [`convert`] - WebP encoding behind the concurrency limiter
//! - [`storage`] - name contract and filesystem gateway
//! - [`server`] - Axum-based HTTP server and routes
//! - [`error`] - error types shared across layers
//!
//! ## Example
//!
//! ```rust,no_run
//! use image_vault::{
//!     convert::{ConversionLimiter, WebpConverter},
//!     server::{create_router, AppState, RouterConfig},
//!     storage::ImageStore,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(
//!         ImageStore::new("data/images"),
//!         WebpConverter::new(80, 2, 0),
//!         ConversionLimiter::new(2),
//!     );
//!     let router = create_router(state, RouterConfig::new("change-me-token"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use convert::{ConversionLimiter, WebpConverter, MAX_METHOD, MAX_QUALITY};
pub use error::{ConvertError, NameError, StorageError};
pub use server::{
    create_router, AppState, AuthError, BearerAuth, ErrorResponse, HealthResponse, RouterConfig,
    PUBLIC_IMAGE_PREFIX,
};
pub use storage::{generate_name, validate_name, ImageStore, WEBP_EXTENSION};
