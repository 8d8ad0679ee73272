//! Progress display for batch grid conversion

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Grids: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks conversion progress across a set of grid files
///
/// Small batches print nothing beyond the per-file output; larger batches get a
/// single bar showing the file currently being processed.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    file_count: usize,
    completed: usize,
    failed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no files registered
    pub const fn new() -> Self {
        Self {
            bar: None,
            file_count: 0,
            completed: 0,
            failed: 0,
        }
    }

    /// Register the batch size and create the bar when the batch is large
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let bar = ProgressBar::new(file_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            self.bar = Some(bar);
        }
    }

    /// Show which file is being processed
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(name.to_string());
        }
    }

    /// Record the outcome of a file
    pub fn complete_file(&mut self, succeeded: bool) {
        self.completed += 1;
        if !succeeded {
            self.failed += 1;
        }
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of files registered
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of files finished so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Number of finished files that failed
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Whether a visible bar is in use
    pub const fn is_batched(&self) -> bool {
        self.bar.is_some()
    }

    /// Close the bar with a summary message
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(format!("{} processed, {} failed", self.completed, self.failed));
        }
    }
}
