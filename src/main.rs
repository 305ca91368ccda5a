//! image-vault - Token-protected WebP image storage service.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_vault::{
    config::Config,
    convert::{ConversionLimiter, WebpConverter},
    server::{create_router, AppState, RouterConfig},
    storage::ImageStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Storage dir: {}", config.storage_dir.display());
    // Report token presence only; the value never reaches the logs.
    info!("  API token: set ({} bytes)", config.api_token.len());
    info!(
        "  WebP: quality {}, method {}, max side {}",
        config.quality,
        config.method,
        if config.max_side == 0 {
            "unlimited".to_string()
        } else {
            config.max_side.to_string()
        }
    );
    info!("  Max concurrent conversions: {}", config.max_conversions);
    info!("  Max upload size: {} bytes", config.max_upload_bytes);

    // Create the storage root up front so a permission problem fails the
    // process instead of the first upload.
    if let Err(e) = tokio::fs::create_dir_all(&config.storage_dir).await {
        error!(
            "Failed to create storage directory {}: {}",
            config.storage_dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    // Assemble components
    let store = ImageStore::new(&config.storage_dir);
    let converter = WebpConverter::new(config.quality, config.method, config.max_side);
    let limiter = ConversionLimiter::new(config.max_conversions);
    let state = AppState::new(store, converter, limiter);

    let router = create_router(state, build_router_config(&config));

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("  Health check:  GET  http://{}/healthz", addr);
    info!("  Upload image:  POST http://{}/api/images", addr);
    info!("  Public images: GET  http://{}/images/<name>", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "image_vault=debug,tower_http=debug"
    } else {
        "image_vault=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new(&config.api_token)
        .with_cache_max_age(config.cache_max_age)
        .with_max_upload_bytes(config.max_upload_bytes)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
