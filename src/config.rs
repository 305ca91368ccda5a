//! Configuration management for image-vault.
//!
//! Configuration is resolved from command-line arguments and environment
//! variables (with an `IMAGE_VAULT_` prefix), with sensible defaults for all
//! optional settings. Numeric ranges are validated at startup: an out-of-range
//! value aborts the process before the server binds.
//!
//! # Environment Variables
//!
//! - `IMAGE_VAULT_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMAGE_VAULT_PORT` - Server port (default: 8000)
//! - `IMAGE_VAULT_TOKEN` - Shared secret bearer token (required)
//! - `IMAGE_VAULT_STORAGE_DIR` - Directory holding stored images (default: data/images)
//! - `IMAGE_VAULT_QUALITY` - WebP quality 0-100 (default: 80)
//! - `IMAGE_VAULT_METHOD` - WebP encoder method/effort 0-6 (default: 2)
//! - `IMAGE_VAULT_MAX_SIDE` - Max image side in pixels, 0 = unlimited (default: 0)
//! - `IMAGE_VAULT_MAX_CONVERSIONS` - Max concurrent conversions (default: half the CPUs, min 1)
//! - `IMAGE_VAULT_MAX_UPLOAD_BYTES` - Upload body size limit (default: 32 MiB)
//! - `IMAGE_VAULT_CACHE_MAX_AGE` - HTTP cache max-age for served images (default: 3600)
//! - `IMAGE_VAULT_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::Parser;

use crate::convert::{MAX_METHOD, MAX_QUALITY};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default storage directory.
pub const DEFAULT_STORAGE_DIR: &str = "data/images";

/// Default WebP quality.
pub const DEFAULT_QUALITY: u8 = 80;

/// Default WebP encoder method (0 = fastest, 6 = slowest/best compression).
pub const DEFAULT_METHOD: u8 = 2;

/// Default upload body size limit (32 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Default HTTP cache max-age for served images in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

/// Default conversion concurrency: half the available CPUs, at least one.
pub fn default_max_conversions() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() / 2)
        .unwrap_or(1)
        .max(1)
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// image-vault - Token-protected WebP image storage.
///
/// Accepts image uploads, converts them to WebP, stores them under random
/// identifiers and serves them back as public static files.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-vault")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMAGE_VAULT_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "IMAGE_VAULT_PORT")]
    pub port: u16,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Shared secret bearer token required for upload and delete.
    #[arg(long, env = "IMAGE_VAULT_TOKEN")]
    pub api_token: String,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Directory under which all stored images live.
    #[arg(long, default_value = DEFAULT_STORAGE_DIR, env = "IMAGE_VAULT_STORAGE_DIR")]
    pub storage_dir: PathBuf,

    // =========================================================================
    // Conversion Configuration
    // =========================================================================
    /// WebP output quality (0-100, higher = better fidelity).
    #[arg(long, default_value_t = DEFAULT_QUALITY, env = "IMAGE_VAULT_QUALITY")]
    pub quality: u8,

    /// WebP encoder method/effort (0-6, higher = slower/better compression).
    #[arg(long, default_value_t = DEFAULT_METHOD, env = "IMAGE_VAULT_METHOD")]
    pub method: u8,

    /// Maximum image side in pixels; larger images are downscaled. 0 = unlimited.
    #[arg(long, default_value_t = 0, env = "IMAGE_VAULT_MAX_SIDE")]
    pub max_side: u32,

    /// Maximum number of concurrent image conversions.
    #[arg(long, default_value_t = default_max_conversions(), env = "IMAGE_VAULT_MAX_CONVERSIONS")]
    pub max_conversions: usize,

    /// Maximum accepted upload body size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "IMAGE_VAULT_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    // =========================================================================
    // HTTP Configuration
    // =========================================================================
    /// Cache-Control max-age in seconds for served images.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "IMAGE_VAULT_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "IMAGE_VAULT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_token.is_empty() {
            return Err("API token is required. Set --api-token or IMAGE_VAULT_TOKEN".to_string());
        }

        if self.storage_dir.as_os_str().is_empty() {
            return Err("storage_dir must not be empty".to_string());
        }

        if self.quality > MAX_QUALITY {
            return Err(format!("quality must be between 0 and {MAX_QUALITY}"));
        }

        if self.method > MAX_METHOD {
            return Err(format!("method must be between 0 and {MAX_METHOD}"));
        }

        if self.max_conversions == 0 {
            return Err("max_conversions must be greater than 0".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
