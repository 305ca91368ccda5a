use thiserror::Error;

/// Errors from validating a client-supplied image name.
#[derive(Debug, Clone, Error)]
pub enum NameError {
    /// Name contains path separators or dot segments
    #[error("image name must be a bare file name without path segments: {0}")]
    NotAFileName(String),

    /// Name does not carry the canonical `.webp` extension
    #[error("image name must end in .webp: {0}")]
    WrongExtension(String),
}

/// Errors from decoding and re-encoding an uploaded image.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// Uploaded bytes could not be decoded as an image
    #[error("uploaded file is not a valid image: {0}")]
    InvalidImage(String),

    /// WebP encoding failed
    #[error("failed to encode WebP: {0}")]
    Encode(String),

    /// The blocking conversion task failed to run to completion
    #[error("conversion task failed: {0}")]
    Worker(String),
}

/// Errors from reading or mutating the storage directory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The named image does not exist
    #[error("image not found: {0}")]
    NotFound(String),

    /// Filesystem failure while writing or deleting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
