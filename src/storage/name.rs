//! Image name generation and validation.
//!
//! Every image the service creates is named `<32-hex-chars>.webp`: a random
//! 128-bit identifier rendered as lowercase hex plus the canonical extension.
//! Client-supplied names (the delete path) are validated against a stricter
//! contract than "looks like a file": the name must be a single bare path
//! segment with exactly the `.webp` extension, so a validated name joined onto
//! the storage root can never escape it.

use std::path::{Component, Path};

use uuid::Uuid;

use crate::error::NameError;

/// Canonical extension for stored images, without the leading dot.
pub const WEBP_EXTENSION: &str = "webp";

/// Generate a fresh image name: 32 lowercase hex characters plus `.webp`.
pub fn generate_name() -> String {
    format!("{}.{}", Uuid::new_v4().simple(), WEBP_EXTENSION)
}

/// Validate a client-supplied image name.
///
/// Accepts the name only if:
/// - interpreted as a path, it is exactly one normal component equal to the
///   input (no separators, no `.` or `..` segments, no drive/root prefixes);
/// - it ends in `.webp` (case-sensitive) with a non-empty stem.
///
/// Returns the validated name unchanged on success.
pub fn validate_name(name: &str) -> Result<&str, NameError> {
    // Backslash is a valid filename byte on Unix but a separator on Windows;
    // reject it outright so names mean the same thing everywhere.
    if name.contains('\\') {
        return Err(NameError::NotAFileName(name.to_string()));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(single)), None) if single == name => {}
        _ => return Err(NameError::NotAFileName(name.to_string())),
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext == WEBP_EXTENSION => Ok(name),
        _ => Err(NameError::WrongExtension(name.to_string())),
    }
}
