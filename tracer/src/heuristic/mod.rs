//! Remaining-cost estimates used to order the open set.
//!
//! A heuristic returns a distance-like quantity. The search multiplies it by
//! the active cost model's minimum step cost before adding it to `g`, which
//! keeps the estimate a lower bound of the true remaining cost.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::voxel::{Calibration, Voxel};

pub trait Heuristic: Send + Sync {
    fn estimate_cost_to_goal(&self, current: Voxel, goal: Voxel) -> f64;

    /// Spacing the estimate is measured in, if any. A search must step with
    /// the same spacing or the scaled estimate stops being a lower bound.
    fn distance_calibration(&self) -> Option<&Calibration> {
        None
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    #[inline]
    fn estimate_cost_to_goal(&self, current: Voxel, goal: Voxel) -> f64 {
        (**self).estimate_cost_to_goal(current, goal)
    }

    fn distance_calibration(&self) -> Option<&Calibration> {
        (**self).distance_calibration()
    }
}

/// Fails when `heuristic` measures distance with a spacing other than the
/// one the search steps with. Units are not compared.
pub(crate) fn check_calibration_matches<H: Heuristic + ?Sized>(
    heuristic: &H,
    calibration: &Calibration,
) -> Result<()> {
    match heuristic.distance_calibration() {
        Some(own) if !own.same_spacing(calibration) => Err(Error::CalibrationMismatch {
            heuristic_width: own.width,
            heuristic_height: own.height,
            heuristic_depth: own.depth,
            width: calibration.width,
            height: calibration.height,
            depth: calibration.depth,
        }),
        _ => Ok(()),
    }
}

/// Zero estimate; turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dijkstra;

impl Heuristic for Dijkstra {
    #[inline]
    fn estimate_cost_to_goal(&self, _current: Voxel, _goal: Voxel) -> f64 {
        0.0
    }
}

/// Calibrated straight-line distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Euclidean {
    calibration: Calibration,
}

impl Euclidean {
    pub fn new(calibration: Calibration) -> Result<Self> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
}

impl Heuristic for Euclidean {
    #[inline]
    fn estimate_cost_to_goal(&self, current: Voxel, goal: Voxel) -> f64 {
        self.calibration
            .step_length(goal.x - current.x, goal.y - current.y, goal.z - current.z)
    }

    fn distance_calibration(&self) -> Option<&Calibration> {
        Some(&self.calibration)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    Dijkstra,
    #[default]
    Euclidean,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeuristicModel {
    Dijkstra(Dijkstra),
    Euclidean(Euclidean),
}

impl HeuristicModel {
    pub fn new(kind: HeuristicKind, calibration: Option<Calibration>) -> Result<Self> {
        match kind {
            HeuristicKind::Dijkstra => Ok(Self::Dijkstra(Dijkstra)),
            HeuristicKind::Euclidean => {
                let calibration = calibration.ok_or(Error::MissingCalibration {
                    heuristic: "Euclidean",
                })?;
                Ok(Self::Euclidean(Euclidean::new(calibration)?))
            }
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        match self {
            Self::Dijkstra(_) => HeuristicKind::Dijkstra,
            Self::Euclidean(_) => HeuristicKind::Euclidean,
        }
    }
}

impl Heuristic for HeuristicModel {
    #[inline]
    fn estimate_cost_to_goal(&self, current: Voxel, goal: Voxel) -> f64 {
        match self {
            Self::Dijkstra(h) => h.estimate_cost_to_goal(current, goal),
            Self::Euclidean(h) => h.estimate_cost_to_goal(current, goal),
        }
    }

    fn distance_calibration(&self) -> Option<&Calibration> {
        match self {
            Self::Dijkstra(h) => h.distance_calibration(),
            Self::Euclidean(h) => h.distance_calibration(),
        }
    }
}
