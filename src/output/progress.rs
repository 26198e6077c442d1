//! Progress reporting for module verification
//!
//! Bars are drawn on stderr so they never mix with report output.

use crate::core::parallel::ProgressUpdate;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// A hidden reporter is created in quiet mode or when progress is disabled
    pub fn new(enabled: bool, quiet: bool, verbose: bool) -> Self {
        let bar = if enabled && !quiet {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            if let Ok(style) =
                ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            Some(bar)
        } else {
            None
        };

        Self { verbose, bar }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }

        tracing::info!(total, "{}", operation);
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
        }

        if self.verbose {
            tracing::debug!(current, total, "{}", message);
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation and remove the bar
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }

        tracing::info!("{}", message);
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
