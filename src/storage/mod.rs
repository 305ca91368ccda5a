//! Storage layer: name contract and filesystem gateway.
//!
//! The storage root is a flat directory of files named `<32-hex>.webp`; there
//! are no subdirectories and no sidecar metadata. [`name`] owns the identifier
//! contract (generation and validation), [`store`] owns the filesystem
//! operations. Everything the HTTP layer writes or deletes goes through
//! [`ImageStore`]; static reads are served straight from [`ImageStore::root`].

mod name;
mod store;

pub use name::{generate_name, validate_name, WEBP_EXTENSION};
pub use store::ImageStore;
