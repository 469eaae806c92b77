use super::frontier::{step_cost, Frontier, Neighbourhood};
use super::{
    report_progress, NotFoundReason, SearchConfig, SearchHooks, SearchOutcome, SearchStage,
    SearchStatus, TracedPath,
};
use crate::cost::{Cost, CostModel};
use crate::error::Result;
use crate::heuristic::{check_calibration_matches, Heuristic, HeuristicModel};
use crate::volume::Volume;
use crate::voxel::{Calibration, Voxel};

/// A* between two voxels. With a zero heuristic this is Dijkstra.
///
/// The search itself holds only configuration; node state and the open set
/// live for the duration of one [`AStarSearch::run`] call, so the same
/// search can be run repeatedly (and from several threads at once).
#[derive(Debug)]
pub struct AStarSearch<'a, V: ?Sized, C = CostModel, H = HeuristicModel> {
    volume: &'a V,
    start: Voxel,
    goal: Voxel,
    cost: C,
    heuristic: H,
    calibration: Calibration,
    config: SearchConfig,
}

impl<'a, V, C, H> AStarSearch<'a, V, C, H>
where
    V: Volume + ?Sized,
    C: Cost,
    H: Heuristic,
{
    pub fn new(
        volume: &'a V,
        start: Voxel,
        goal: Voxel,
        cost: C,
        heuristic: H,
        calibration: Calibration,
        config: SearchConfig,
    ) -> Result<Self> {
        calibration.validate()?;
        check_calibration_matches(&heuristic, &calibration)?;
        Ok(Self {
            volume,
            start,
            goal,
            cost,
            heuristic,
            calibration,
            config,
        })
    }

    pub fn start(&self) -> Voxel {
        self.start
    }

    pub fn goal(&self) -> Voxel {
        self.goal
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    fn estimate(&self, voxel: Voxel) -> f64 {
        self.heuristic.estimate_cost_to_goal(voxel, self.goal) * self.cost.min_step_cost()
    }

    pub fn run(&self, hooks: &SearchHooks) -> SearchOutcome {
        let dims = self.volume.dims();
        if !dims.contains(self.start) || !dims.contains(self.goal) {
            log::warn!(
                "Search endpoints {:?} -> {:?} outside volume {:?}",
                self.start,
                self.goal,
                dims
            );
            return SearchOutcome::NotFound(NotFoundReason::OutOfBounds);
        }
        let Ok(mut frontier) = Frontier::new(dims, self.config.search_image_type) else {
            return SearchOutcome::NotFound(NotFoundReason::OutOfBounds);
        };
        let neighbourhood = Neighbourhood::new(dims, &self.calibration);

        log::debug!(
            "Searching {:?} -> {:?} ({} neighbours, min step cost {})",
            self.start,
            self.goal,
            neighbourhood.len(),
            self.cost.min_step_cost()
        );

        frontier.relax(self.start, 0.0, self.estimate(self.start), None);

        let mut iteration = 0usize;
        let outcome = loop {
            if hooks.is_cancelled() {
                break SearchOutcome::Cancelled;
            }
            if self.config.over_node_limit(frontier.visited()) {
                break SearchOutcome::NotFound(NotFoundReason::NodeLimit);
            }
            let Some(current) = frontier.pop_and_close() else {
                break SearchOutcome::NotFound(NotFoundReason::Exhausted);
            };
            if current.voxel == self.goal {
                let voxels = frontier.path_to(self.goal);
                break SearchOutcome::Found(TracedPath::new(voxels, current.g));
            }

            for (next, length) in neighbourhood.around(current.voxel) {
                if frontier.status(next) == SearchStatus::Closed {
                    continue;
                }
                let Some(step) = step_cost(self.volume, &self.cost, next, length) else {
                    continue;
                };
                frontier.relax(next, current.g + step, self.estimate(next), Some(current.voxel));
            }

            iteration += 1;
            if self.config.should_report(iteration) {
                report_progress(&hooks.progress, || {
                    frontier.progress(SearchStage::Searching, frontier.min_open_distance(), None)
                });
            }
        };

        let message = outcome.describe();
        log::info!(
            "Search {:?} -> {:?} {} after {} iterations ({} voxels visited)",
            self.start,
            self.goal,
            message,
            iteration,
            frontier.visited()
        );
        report_progress(&hooks.progress, || {
            frontier.progress(
                SearchStage::Finished,
                frontier.min_open_distance(),
                Some(message),
            )
        });
        outcome
    }
}
