//! Bounded execution of CPU-heavy conversions.
//!
//! Decoding and re-encoding images is CPU-bound; running it inline on the
//! async runtime would starve request acceptance, and running it unbounded on
//! the blocking pool would let a burst of uploads exhaust CPU and memory. The
//! limiter combines both concerns: a counting semaphore caps how many
//! conversions run at once, and each conversion executes on tokio's blocking
//! pool. Callers beyond the limit suspend until a slot frees; nothing is
//! rejected and nothing times out.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::ConvertError;

/// Counting semaphore bounding concurrent conversions.
///
/// Cheap to clone; clones share the same slot pool.
#[derive(Debug, Clone)]
pub struct ConversionLimiter {
    semaphore: Arc<Semaphore>,
}

impl ConversionLimiter {
    /// Create a limiter with the given number of slots (must be >= 1,
    /// enforced by config validation).
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Number of currently free conversion slots.
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Run `work` on the blocking pool, holding one conversion slot for its
    /// full duration.
    ///
    /// The permit moves into the blocking task, so the slot stays occupied
    /// until the conversion finishes even if the calling request future is
    /// dropped mid-flight.
    pub async fn run<F, T>(&self, work: F) -> Result<T, ConvertError>
    where
        F: FnOnce() -> Result<T, ConvertError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|e| ConvertError::Worker(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            work()
        })
        .await
        .map_err(|e| ConvertError::Worker(e.to_string()))?
    }
}
