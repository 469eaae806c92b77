//! Tracer - best-first path search through 3-D intensity volumes.
//!
//! Traces filamentous structures (neurites, vessels) by finding the cheapest
//! voxel path between two points, where stepping onto a voxel costs a
//! function of its intensity:
//! - Cost models mapping intensity to traversal cost
//! - A*/Dijkstra with a calibrated Euclidean heuristic
//! - Bidirectional search and threshold-bounded fills
//! - Per-slice node storage that stays small on very large volumes
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tracer::{
//!     AStarSearch, Calibration, CostKind, CostModel, CostParams, DenseVolume, Euclidean,
//!     SearchConfig, SearchHooks, VolumeStats, Voxel,
//! };
//!
//! let volume = DenseVolume::new(width, height, depth, samples)?;
//! let stats = VolumeStats::compute(&volume)?;
//! let cost = CostModel::from_stats(CostKind::Reciprocal, &stats, &CostParams::default())?;
//! let calibration = Calibration::new(0.3, 0.3, 1.0, "um")?;
//!
//! let search = AStarSearch::new(
//!     &volume,
//!     Voxel::new(10, 12, 0),
//!     Voxel::new(80, 64, 9),
//!     cost,
//!     Euclidean::new(calibration.clone())?,
//!     calibration,
//!     SearchConfig::default(),
//! )?;
//! if let Some(path) = search.run(&SearchHooks::default()).into_path() {
//!     println!("{} voxels, cost {}", path.len(), path.total_cost);
//! }
//! ```

pub mod config;
pub mod cost;
mod error;
pub mod heuristic;
pub mod search;
pub mod search_image;
pub mod volume;
mod voxel;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Core types
// ============================================================================

pub use error::{Error, Result};
pub use voxel::{Calibration, Dims, Voxel};

// ============================================================================
// Volumes
// ============================================================================

pub use volume::{DenseVolume, Volume, VolumeStats};

// ============================================================================
// Cost and heuristic models
// ============================================================================

pub use cost::{Cost, CostKind, CostModel, CostParams};
pub use heuristic::{Dijkstra, Euclidean, Heuristic, HeuristicKind, HeuristicModel};

// ============================================================================
// Node storage
// ============================================================================

pub use search_image::{SearchImage, SearchImageStack, SearchImageType};

// ============================================================================
// Search
// ============================================================================

pub use search::{
    // Drivers
    AStarSearch,
    BidirectionalSearch,
    Filler,
    // Results
    Fill,
    FillNode,
    FillStatus,
    NotFoundReason,
    SearchOutcome,
    TracedPath,
    // Configuration and hooks
    ProgressCallback,
    SearchConfig,
    SearchHooks,
    SearchProgress,
    SearchStage,
};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{load_config_file, TracerConfig};
