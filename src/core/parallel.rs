//! Parallel processing utilities

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ModulithError, Result};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Execute a function in parallel on a collection of items with error handling.
/// Output order follows input order.
pub fn parallel_process_with_errors<T, F, R>(items: Vec<T>, f: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
{
    items.into_par_iter().map(f).collect()
}

/// Execute a function in parallel on a collection of items with progress reporting and error handling
pub fn parallel_process_with_progress_and_errors<T, F, R, P>(
    items: Vec<T>,
    f: F,
    progress_callback: P,
) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R> + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    items
        .into_par_iter()
        .map(|item| {
            let result = f(item);
            let count = counter.fetch_add(1, Ordering::SeqCst) + 1;

            progress_callback(ProgressUpdate::new(
                count,
                total,
                format!("Processed {}/{}", count, total),
            ));

            result
        })
        .collect()
}

/// Run `f` inside a dedicated rayon pool.
///
/// `parallel == false` forces a single worker; `threads` defaults to the
/// number of logical CPUs.
pub fn with_thread_pool<F, R>(parallel: bool, threads: Option<usize>, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    let threads = if parallel {
        threads.unwrap_or_else(num_cpus::get).max(1)
    } else {
        1
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ModulithError::analysis_error(format!("Failed to create thread pool: {}", e)))?;

    tracing::debug!(threads, "running in dedicated thread pool");

    Ok(pool.install(f))
}
