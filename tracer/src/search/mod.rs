//! Best-first path search over the voxel grid.
//!
//! [`AStarSearch`] runs A* (or Dijkstra with a zero heuristic) between two
//! voxels, [`BidirectionalSearch`] grows one front from each end and joins
//! them where they meet, and [`Filler`] computes every voxel reachable from
//! a set of seeds within a cost threshold.
//!
//! All drivers share the same step model: moving to a neighbour costs
//! `max(cost(value), min_step_cost) × calibrated step length`, with 26
//! neighbours per voxel (8 in single-slice volumes). Heuristic estimates are
//! multiplied by the cost model's minimum step cost so they never
//! overestimate.
//!
//! Not finding a path and being cancelled are [`SearchOutcome`]s, not
//! errors. Only invalid construction parameters produce
//! [`Error`](crate::Error).


mod astar;
mod bidirectional;
mod filler;
mod frontier;
mod open_set;
mod path;
mod progress;

pub use astar::AStarSearch;
pub use bidirectional::BidirectionalSearch;
pub use filler::{Fill, FillNode, FillStatus, Filler};
pub use path::TracedPath;
pub use progress::{report_progress, ProgressCallback, SearchProgress, SearchStage};

use common::CancelToken;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::search_image::SearchImageType;
use crate::voxel::Voxel;

// ============================================================================
// Node state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SearchStatus {
    /// Not yet reached.
    #[default]
    Free,
    /// Queued with a tentative distance.
    Open,
    /// Distance is final.
    Closed,
}

/// Per-voxel search record. The predecessor is stored by coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub predecessor: Option<Voxel>,
    pub status: SearchStatus,
}

impl NodeState {
    pub fn open(g: f64, h: f64, predecessor: Option<Voxel>) -> Self {
        Self {
            g,
            h,
            f: g + h,
            predecessor,
            status: SearchStatus::Open,
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotFoundReason {
    /// Every reachable voxel was explored.
    Exhausted,
    /// Start or goal lies outside the volume.
    OutOfBounds,
    /// [`SearchConfig::max_nodes`] voxels were visited.
    NodeLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(TracedPath),
    NotFound(NotFoundReason),
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&TracedPath> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<TracedPath> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    fn describe(&self) -> String {
        match self {
            Self::Found(path) => format!(
                "found path of {} voxels, cost {}",
                path.len(),
                path.total_cost
            ),
            Self::NotFound(reason) => format!("not found: {}", reason),
            Self::Cancelled => "cancelled".to_string(),
        }
    }
}

// ============================================================================
// Configuration and hooks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub search_image_type: SearchImageType,
    /// Stop with [`NotFoundReason::NodeLimit`] after visiting this many voxels.
    pub max_nodes: Option<usize>,
    /// Loop iterations between progress reports.
    pub report_every: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_image_type: SearchImageType::Sparse,
            max_nodes: None,
            report_every: 10_000,
        }
    }
}

impl SearchConfig {
    #[inline]
    fn should_report(&self, iteration: usize) -> bool {
        self.report_every > 0 && iteration > 0 && iteration % self.report_every == 0
    }

    #[inline]
    fn over_node_limit(&self, visited: usize) -> bool {
        self.max_nodes.is_some_and(|limit| visited >= limit)
    }
}

/// Caller-owned observation and control points for one run.
#[derive(Debug, Clone, Default)]
pub struct SearchHooks {
    pub progress: ProgressCallback,
    pub cancel: Option<CancelToken>,
}

impl SearchHooks {
    pub fn with_progress(progress: ProgressCallback) -> Self {
        Self {
            progress,
            cancel: None,
        }
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self {
            progress: ProgressCallback::none(),
            cancel: Some(cancel),
        }
    }

    #[inline]
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
