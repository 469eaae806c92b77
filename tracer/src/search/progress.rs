//! Progress reporting for search runs.

use common::SharedFn;

/// Snapshot of a running search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchProgress {
    /// Live entries in the open set.
    pub open: usize,
    /// Voxels whose distance is final.
    pub closed: usize,
    pub stage: SearchStage,
    /// Smallest `g` still queued: everything closer has been explored.
    pub min_open_distance: Option<f64>,
    pub message: Option<String>,
}

/// Stage of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Expanding the open set.
    Searching,
    /// The run returned; `message` names the outcome.
    Finished,
}

/// Callback type for progress reporting.
pub type ProgressCallback = SharedFn<dyn Fn(SearchProgress) + Send + Sync>;

/// Report progress using the callback if set.
pub fn report_progress(callback: &ProgressCallback, progress: impl FnOnce() -> SearchProgress) {
    if let Some(f) = callback.as_ref() {
        f(progress());
    }
}
