//! WebP image converter.
//!
//! Decodes an uploaded byte buffer in any commonly supported container format
//! (PNG, JPEG, GIF, BMP, WebP), normalizes it to opaque RGB, optionally
//! downscales it, and re-encodes it as lossy WebP.
//!
//! # Design Decisions
//!
//! - **Content over content-type**: the declared content type of an upload is
//!   never trusted; only the bytes decide whether something is an image.
//!
//! - **Alpha is flattened**: the canonical output is always opaque, so any
//!   alpha channel is dropped during the RGB conversion.
//!
//! - **Deterministic resampling**: when a max side is configured, oversized
//!   images are downscaled with Lanczos3 so the same input always produces
//!   the same output bytes.

use bytes::Bytes;
use image::imageops::FilterType;

use crate::error::ConvertError;

/// Maximum WebP quality.
pub const MAX_QUALITY: u8 = 100;

/// Maximum WebP encoder method.
pub const MAX_METHOD: u8 = 6;

// =============================================================================
// WebP Converter
// =============================================================================

/// Converts uploaded images to lossy WebP.
///
/// Holds only immutable encoder settings, so independent calls may run
/// concurrently without any shared mutable state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WebpConverter {
    quality: u8,
    method: u8,
    max_side: u32,
}

impl WebpConverter {
    /// Create a converter with the given encoder settings.
    ///
    /// `quality` is 0-100 and `method` 0-6, both passed through to libwebp
    /// unmodified; `max_side` of 0 disables downscaling.
    pub fn new(quality: u8, method: u8, max_side: u32) -> Self {
        Self {
            quality,
            method,
            max_side,
        }
    }

    /// Decode `raw` as an image and re-encode it as lossy WebP.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidImage`] if the bytes are not a decodable image
    /// - [`ConvertError::Encode`] if WebP encoding fails
    pub fn convert(&self, raw: &[u8]) -> Result<Bytes, ConvertError> {
        let decoded = image::load_from_memory(raw)
            .map_err(|e| ConvertError::InvalidImage(e.to_string()))?;

        let decoded = if self.needs_downscale(decoded.width(), decoded.height()) {
            decoded.resize(self.max_side, self.max_side, FilterType::Lanczos3)
        } else {
            decoded
        };

        // Canonical output is opaque 3-channel; alpha is flattened here.
        let rgb = decoded.to_rgb8();

        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height());
        let mut config = webp::WebPConfig::new()
            .map_err(|_| ConvertError::Encode("failed to initialize encoder config".to_string()))?;
        config.lossless = 0;
        config.quality = f32::from(self.quality);
        config.method = i32::from(self.method);

        let encoded = encoder
            .encode_advanced(&config)
            .map_err(|e| ConvertError::Encode(format!("{e:?}")))?;

        Ok(Bytes::copy_from_slice(&encoded))
    }

    fn needs_downscale(&self, width: u32, height: u32) -> bool {
        self.max_side > 0 && (width > self.max_side || height > self.max_side)
    }
}

// =============================================================================
// Tests
// =============================================================================
