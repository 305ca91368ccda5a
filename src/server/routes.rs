//! Router configuration for image-vault.
//!
//! # Route Structure
//!
//! ```text
//! /healthz                    - Health check (public)
//! /api/images                 - POST upload (bearer token)
//! /api/images/{name}          - DELETE image (bearer token)
//! /images/{name}              - Static image files (public, read-only)
//! ```

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use http::header::{HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::auth::{require_bearer, BearerAuth};
use super::handlers::{
    delete_handler, health_handler, upload_handler, AppState, PUBLIC_IMAGE_PREFIX,
};
use crate::config::{DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_UPLOAD_BYTES};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Shared secret bearer token guarding the mutating routes
    pub api_token: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds for served images
    pub cache_max_age: u32,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given bearer token.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Cache max-age is 1 hour (3600 seconds)
    /// - Upload bodies are limited to 32 MiB
    /// - Tracing is enabled
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            cors_origins: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Set the Cache-Control max-age in seconds for served images.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Set the upload body size limit in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (health check, static image serving)
/// - Protected routes (upload and delete, bearer token required)
/// - CORS configuration
/// - Request tracing (optional)
pub fn create_router(state: AppState, config: RouterConfig) -> Router {
    let auth = BearerAuth::new(&config.api_token);
    let cors = build_cors_layer(&config);

    // Mutating routes; auth middleware is applied to the nested router AFTER
    // nesting so unauthorized requests are rejected before body handling.
    let api_routes = Router::new()
        .route("/images", post(upload_handler))
        .route("/images/{name}", delete(delete_handler))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(auth, require_bearer));

    // Public read path: the storage root served as static files, content type
    // inferred from the extension, with a cache header on every hit.
    let cache_header = HeaderValue::from_str(&format!("public, max-age={}", config.cache_max_age))
        .expect("cache-control header value is always valid");
    let static_routes = Router::new()
        .fallback_service(ServeDir::new(state.store.root()))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            cache_header,
        ));

    let router = Router::new()
        .merge(protected_routes)
        .route("/healthz", get(health_handler))
        .nest_service(PUBLIC_IMAGE_PREFIX, static_routes)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
