//! Conversion layer: WebP encoding behind a concurrency bound.
//!
//! # Architecture
//!
//! The conversion layer sits between the HTTP upload handler and the storage
//! gateway:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             Upload Handler              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  ConversionLimiter (semaphore slots)    │
//! │  ┌───────────────────────────────────┐  │
//! │  │  WebpConverter (blocking pool)    │  │
//! │  │  decode → flatten → encode        │  │
//! │  └───────────────────────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              ImageStore                 │
//! └─────────────────────────────────────────┘
//! ```

mod encoder;
mod limiter;

pub use encoder::{WebpConverter, MAX_METHOD, MAX_QUALITY};
pub use limiter::ConversionLimiter;
