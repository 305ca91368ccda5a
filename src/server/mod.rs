//! HTTP server layer for image-vault.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   POST /api/images   DELETE /api/images/{name}   GET /images/*  │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    auth     │  │        routes           │  │
//! │  │ (requests)  │  │  (bearer)   │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{require_bearer, AuthError, BearerAuth};
pub use handlers::{
    delete_handler, health_handler, upload_handler, ApiError, AppState, ErrorResponse,
    HealthResponse, PUBLIC_IMAGE_PREFIX,
};
pub use routes::{create_router, RouterConfig};
