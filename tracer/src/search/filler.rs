//! Threshold-bounded distance fill.
//!
//! A [`Filler`] runs Dijkstra outward from a set of seed voxels and stops
//! once the cheapest queued voxel lies beyond the threshold. Those queued
//! voxels are kept, so raising the threshold with [`Filler::set_threshold`]
//! and calling [`Filler::run`] again continues where the last run stopped.
//!
//! [`Fill`] is a plain snapshot of the explored region that can be stored
//! and later turned back into a resumable filler with [`Filler::from_fill`].

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::frontier::{step_cost, Frontier, Neighbourhood};
use super::{
    report_progress, NodeState, SearchConfig, SearchHooks, SearchStage, SearchStatus, TracedPath,
};
use crate::cost::{Cost, CostKind, CostModel};
use crate::error::{Error, Result};
use crate::volume::Volume;
use crate::voxel::{Calibration, Voxel};

/// How a [`Filler::run`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    /// Everything within the threshold has been explored.
    Complete,
    Cancelled,
    /// [`SearchConfig::max_nodes`] voxels were visited.
    NodeLimit,
}

// ============================================================================
// Snapshot
// ============================================================================

/// One explored voxel. `previous` indexes into [`Fill::nodes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillNode {
    pub voxel: Voxel,
    pub distance: f64,
    pub previous: Option<usize>,
    /// Still queued, so `distance` may shrink when the fill resumes.
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub threshold: f64,
    /// Cost model the distances were measured with.
    pub metric: Option<CostKind>,
    pub calibration: Calibration,
    pub nodes: Vec<FillNode>,
}

impl Fill {
    /// Nodes at or below the threshold.
    pub fn within_threshold(&self) -> impl Iterator<Item = &FillNode> {
        self.nodes
            .iter()
            .filter(move |node| node.distance <= self.threshold)
    }

    /// Physical volume of the voxels at or below the threshold.
    pub fn volume(&self) -> f64 {
        self.within_threshold().count() as f64 * self.calibration.voxel_volume()
    }
}

// ============================================================================
// Filler
// ============================================================================

#[derive(Debug)]
pub struct Filler<'a, V: ?Sized, C = CostModel> {
    volume: &'a V,
    cost: C,
    calibration: Calibration,
    threshold: f64,
    config: SearchConfig,
    frontier: Frontier,
    neighbourhood: Neighbourhood,
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

impl<'a, V, C> Filler<'a, V, C>
where
    V: Volume + ?Sized,
    C: Cost,
{
    pub fn new(
        volume: &'a V,
        cost: C,
        calibration: Calibration,
        threshold: f64,
        config: SearchConfig,
    ) -> Result<Self> {
        calibration.validate()?;
        check_threshold(threshold)?;
        let dims = volume.dims();
        Ok(Self {
            volume,
            cost,
            frontier: Frontier::new(dims, config.search_image_type)?,
            neighbourhood: Neighbourhood::new(dims, &calibration),
            calibration,
            threshold,
            config,
        })
    }

    /// Rebuilds a resumable filler from a snapshot taken on `volume`.
    pub fn from_fill(volume: &'a V, cost: C, fill: &Fill, config: SearchConfig) -> Result<Self> {
        let mut filler = Self::new(volume, cost, fill.calibration.clone(), fill.threshold, config)?;
        if fill.metric.is_some() && fill.metric != filler.cost.cost_kind() {
            log::warn!(
                "Restoring fill measured with {:?} using {:?} costs",
                fill.metric,
                filler.cost.cost_kind()
            );
        }

        let dims = volume.dims();
        for (index, node) in fill.nodes.iter().enumerate() {
            if !dims.contains(node.voxel) {
                return Err(Error::InvalidFill(format!(
                    "node {} at {:?} lies outside volume {:?}",
                    index, node.voxel, dims
                )));
            }
            if !node.distance.is_finite() || node.distance < 0.0 {
                return Err(Error::InvalidFill(format!(
                    "node {} at {:?} has distance {}",
                    index, node.voxel, node.distance
                )));
            }
            let predecessor = match node.previous {
                None => None,
                Some(previous) => match fill.nodes.get(previous) {
                    Some(previous) => Some(previous.voxel),
                    None => {
                        return Err(Error::InvalidFill(format!(
                            "node {} refers to missing node {}",
                            index, previous
                        )))
                    }
                },
            };
            let mut state = NodeState::open(node.distance, 0.0, predecessor);
            if !node.open {
                state.status = SearchStatus::Closed;
            }
            filler.frontier.restore(node.voxel, state);
        }

        log::debug!(
            "Restored fill with {} nodes, threshold {}",
            fill.nodes.len(),
            fill.threshold
        );
        Ok(filler)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Changes the threshold. Raising it lets the next [`Filler::run`]
    /// continue into voxels the previous run left queued.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<()> {
        check_threshold(threshold)?;
        log::debug!("Fill threshold {} -> {}", self.threshold, threshold);
        self.threshold = threshold;
        Ok(())
    }

    /// Adds a zero-distance seed. Returns `false` for voxels outside the
    /// volume or already explored.
    pub fn add_seed(&mut self, voxel: Voxel) -> bool {
        if !self.volume.dims().contains(voxel) {
            return false;
        }
        self.frontier.relax(voxel, 0.0, 0.0, None)
    }

    pub fn add_seeds(&mut self, voxels: impl IntoIterator<Item = Voxel>) {
        for voxel in voxels {
            self.add_seed(voxel);
        }
    }

    /// Seeds every voxel of a traced path.
    pub fn add_path(&mut self, path: &TracedPath) {
        self.add_seeds(path.voxels.iter().copied());
    }

    /// Final distance of an explored voxel.
    pub fn distance_at(&self, voxel: Voxel) -> Option<f64> {
        self.frontier
            .node(voxel)
            .filter(|node| node.status == SearchStatus::Closed)
            .map(|node| node.g)
    }

    /// Smallest queued distance; everything closer has been explored.
    pub fn explored_distance(&mut self) -> Option<f64> {
        self.frontier.peek().map(|entry| entry.g)
    }

    pub fn run(&mut self, hooks: &SearchHooks) -> FillStatus {
        let mut iteration = 0usize;
        let status = loop {
            if hooks.is_cancelled() {
                break FillStatus::Cancelled;
            }
            if self.config.over_node_limit(self.frontier.visited()) {
                break FillStatus::NodeLimit;
            }
            match self.frontier.peek() {
                Some(entry) if entry.g <= self.threshold => {}
                _ => break FillStatus::Complete,
            }
            let Some(current) = self.frontier.pop_and_close() else {
                break FillStatus::Complete;
            };

            for (next, length) in self.neighbourhood.around(current.voxel) {
                if self.frontier.status(next) == SearchStatus::Closed {
                    continue;
                }
                let Some(step) = step_cost(self.volume, &self.cost, next, length) else {
                    continue;
                };
                self.frontier
                    .relax(next, current.g + step, 0.0, Some(current.voxel));
            }

            iteration += 1;
            if self.config.should_report(iteration) {
                let min_open = self.frontier.peek().map(|entry| entry.g);
                let frontier = &self.frontier;
                report_progress(&hooks.progress, || {
                    frontier.progress(SearchStage::Searching, min_open, None)
                });
            }
        };

        let min_open = self.frontier.peek().map(|entry| entry.g);
        log::info!(
            "Fill to threshold {} stopped ({:?}) with {} voxels explored",
            self.threshold,
            status,
            self.frontier.closed_count()
        );
        let frontier = &self.frontier;
        report_progress(&hooks.progress, || {
            frontier.progress(
                SearchStage::Finished,
                min_open,
                Some(format!("{:?}", status)),
            )
        });
        status
    }

    /// Snapshot of every voxel reached so far, ordered by coordinate.
    pub fn fill(&self) -> Fill {
        let mut reached: Vec<(Voxel, NodeState)> = self
            .frontier
            .nodes()
            .nodes()
            .filter(|(_, node)| node.status != SearchStatus::Free)
            .map(|(voxel, node)| (voxel, *node))
            .collect();
        reached.sort_by_key(|(voxel, _)| (voxel.z, voxel.y, voxel.x));

        let index: HashMap<Voxel, usize> = reached
            .iter()
            .enumerate()
            .map(|(i, (voxel, _))| (*voxel, i))
            .collect();

        let nodes = reached
            .iter()
            .map(|(voxel, node)| FillNode {
                voxel: *voxel,
                distance: node.g,
                previous: node
                    .predecessor
                    .and_then(|previous| index.get(&previous).copied()),
                open: node.status == SearchStatus::Open,
            })
            .collect();

        Fill {
            threshold: self.threshold,
            metric: self.cost.cost_kind(),
            calibration: self.calibration.clone(),
            nodes,
        }
    }
}
