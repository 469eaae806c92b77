//! Node bookkeeping shared by every search driver: one stack of node states
//! plus its open set.

use super::open_set::{OpenEntry, OpenSet};
use super::{NodeState, SearchProgress, SearchStage, SearchStatus};
use crate::cost::Cost;
use crate::error::Result;
use crate::search_image::{SearchImageStack, SearchImageType};
use crate::volume::Volume;
use crate::voxel::{Calibration, Dims, Voxel};

const OFFSETS_3D: usize = 26;
const OFFSETS_2D: usize = 8;

/// Neighbour offsets with their calibrated step lengths.
#[derive(Debug, Clone)]
pub(crate) struct Neighbourhood {
    steps: Vec<(i32, i32, i32, f64)>,
}

impl Neighbourhood {
    /// 26-connected, or 8-connected when the volume is a single slice.
    pub fn new(dims: Dims, calibration: &Calibration) -> Self {
        let planar = dims.is_planar();
        let mut steps = Vec::with_capacity(if planar { OFFSETS_2D } else { OFFSETS_3D });
        let z_range = if planar { 0..=0 } else { -1..=1 };
        for dz in z_range {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    steps.push((dx, dy, dz, calibration.step_length(dx, dy, dz)));
                }
            }
        }
        Self { steps }
    }

    /// `(neighbour, step length)` pairs around `voxel`, bounds unchecked.
    #[inline]
    pub fn around(&self, voxel: Voxel) -> impl Iterator<Item = (Voxel, f64)> + '_ {
        self.steps
            .iter()
            .map(move |&(dx, dy, dz, length)| (voxel.offset(dx, dy, dz), length))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Cost of stepping onto `to`, or `None` when the voxel is outside the
/// volume or cannot be entered (NaN sample or non-finite cost).
#[inline]
pub(crate) fn step_cost<V, C>(volume: &V, cost: &C, to: Voxel, length: f64) -> Option<f64>
where
    V: Volume + ?Sized,
    C: Cost,
{
    let value = volume.value(to)?;
    if value.is_nan() {
        return None;
    }
    let c = cost.cost_moving_to(value);
    if !c.is_finite() {
        return None;
    }
    Some(c.max(cost.min_step_cost()) * length)
}

#[derive(Debug)]
pub(crate) struct Frontier {
    nodes: SearchImageStack<NodeState>,
    open: OpenSet,
    open_count: usize,
    closed_count: usize,
}

impl Frontier {
    pub fn new(dims: Dims, image_type: SearchImageType) -> Result<Self> {
        Ok(Self {
            nodes: SearchImageStack::new(dims.width, dims.height, image_type)?,
            open: OpenSet::default(),
            open_count: 0,
            closed_count: 0,
        })
    }

    #[inline]
    pub fn node(&self, voxel: Voxel) -> Option<&NodeState> {
        self.nodes.node(voxel)
    }

    #[inline]
    pub fn status(&self, voxel: Voxel) -> SearchStatus {
        self.nodes
            .node(voxel)
            .map_or(SearchStatus::Free, |node| node.status)
    }

    pub fn nodes(&self) -> &SearchImageStack<NodeState> {
        &self.nodes
    }

    /// Records a path of cost `g` to `voxel`. Returns whether the voxel was
    /// newly opened or improved; closed voxels are never reopened.
    pub fn relax(&mut self, voxel: Voxel, g: f64, h: f64, predecessor: Option<Voxel>) -> bool {
        match self.nodes.node_mut(voxel) {
            Some(node) if node.status == SearchStatus::Closed => false,
            Some(node) if g >= node.g => false,
            Some(node) => {
                let reopened = node.status != SearchStatus::Open;
                *node = NodeState::open(g, h, predecessor);
                if reopened {
                    self.open_count += 1;
                }
                self.open.push(voxel, g, h);
                true
            }
            None => {
                self.nodes.set_node(voxel, NodeState::open(g, h, predecessor));
                self.open_count += 1;
                self.open.push(voxel, g, h);
                true
            }
        }
    }

    /// Stores a node restored from elsewhere, queueing it when it is open.
    pub fn restore(&mut self, voxel: Voxel, node: NodeState) {
        match node.status {
            SearchStatus::Open => {
                self.open_count += 1;
                self.open.push(voxel, node.g, node.h);
            }
            SearchStatus::Closed => self.closed_count += 1,
            SearchStatus::Free => {}
        }
        self.nodes.set_node(voxel, node);
    }

    /// Drops stale entries from the top of the open set.
    fn discard_stale(&mut self) {
        while let Some(entry) = self.open.peek() {
            if self.is_live(entry) {
                return;
            }
            self.open.pop();
        }
    }

    #[inline]
    fn is_live(&self, entry: &OpenEntry) -> bool {
        self.nodes.node(entry.voxel).is_some_and(|node| {
            node.status == SearchStatus::Open && node.g == entry.g && node.h == entry.h
        })
    }

    /// Best live entry without removing it.
    pub fn peek(&mut self) -> Option<OpenEntry> {
        self.discard_stale();
        self.open.peek().copied()
    }

    /// Removes the best live entry and closes its voxel.
    pub fn pop_and_close(&mut self) -> Option<OpenEntry> {
        self.discard_stale();
        let entry = self.open.pop()?;
        if let Some(node) = self.nodes.node_mut(entry.voxel) {
            node.status = SearchStatus::Closed;
        }
        self.open_count -= 1;
        self.closed_count += 1;
        Some(entry)
    }

    /// Smallest `g` still queued. Linear in visited nodes, so only called
    /// when reporting progress.
    pub fn min_open_distance(&self) -> Option<f64> {
        self.nodes
            .nodes()
            .filter(|(_, node)| node.status == SearchStatus::Open)
            .map(|(_, node)| node.g)
            .min_by(f64::total_cmp)
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    #[inline]
    pub fn closed_count(&self) -> usize {
        self.closed_count
    }

    pub fn visited(&self) -> usize {
        self.nodes.total_nodes()
    }

    pub fn progress(
        &self,
        stage: SearchStage,
        min_open_distance: Option<f64>,
        message: Option<String>,
    ) -> SearchProgress {
        SearchProgress {
            open: self.open_count,
            closed: self.closed_count,
            stage,
            min_open_distance,
            message,
        }
    }

    /// Voxels from the seed of `voxel`'s chain to `voxel`, in that order.
    pub fn path_to(&self, voxel: Voxel) -> Vec<Voxel> {
        let mut path = vec![voxel];
        let mut current = voxel;
        while let Some(previous) = self.nodes.node(current).and_then(|node| node.predecessor) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}
