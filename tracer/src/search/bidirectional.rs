use super::frontier::{step_cost, Frontier, Neighbourhood};
use super::{
    report_progress, NotFoundReason, SearchConfig, SearchHooks, SearchOutcome, SearchProgress,
    SearchStage, SearchStatus, TracedPath,
};
use crate::cost::{Cost, CostModel};
use crate::error::Result;
use crate::heuristic::{check_calibration_matches, Heuristic, HeuristicModel};
use crate::volume::Volume;
use crate::voxel::{Calibration, Voxel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    Goal,
}

/// Point where the two fronts touch. `from_start` ends the start-side half
/// and `from_goal` ends the goal-side half; they are equal or adjacent.
#[derive(Debug, Clone, Copy)]
struct Meeting {
    from_start: Voxel,
    from_goal: Voxel,
    total: f64,
}

/// A* grown from both endpoints at once.
///
/// Each iteration expands whichever side has fewer open nodes. The goal
/// side charges the cost of the voxel it leaves, so both fronts measure
/// the same forward path cost. The search ends when an expansion reaches a
/// voxel the other side has closed, or when a side pops its own target.
#[derive(Debug)]
pub struct BidirectionalSearch<'a, V: ?Sized, C = CostModel, H = HeuristicModel> {
    volume: &'a V,
    start: Voxel,
    goal: Voxel,
    cost: C,
    heuristic: H,
    calibration: Calibration,
    config: SearchConfig,
}

impl<'a, V, C, H> BidirectionalSearch<'a, V, C, H>
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

    #[inline]
    fn estimate(&self, voxel: Voxel, side: Side) -> f64 {
        let target = match side {
            Side::Start => self.goal,
            Side::Goal => self.start,
        };
        self.heuristic.estimate_cost_to_goal(voxel, target) * self.cost.min_step_cost()
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
        let image_type = self.config.search_image_type;
        let (Ok(mut from_start), Ok(mut from_goal)) =
            (Frontier::new(dims, image_type), Frontier::new(dims, image_type))
        else {
            return SearchOutcome::NotFound(NotFoundReason::OutOfBounds);
        };
        let neighbourhood = Neighbourhood::new(dims, &self.calibration);

        from_start.relax(self.start, 0.0, self.estimate(self.start, Side::Start), None);
        from_goal.relax(self.goal, 0.0, self.estimate(self.goal, Side::Goal), None);

        let mut iteration = 0usize;
        let outcome = loop {
            if hooks.is_cancelled() {
                break SearchOutcome::Cancelled;
            }
            if self
                .config
                .over_node_limit(from_start.visited() + from_goal.visited())
            {
                break SearchOutcome::NotFound(NotFoundReason::NodeLimit);
            }

            let side = if from_goal.open_count() < from_start.open_count() {
                Side::Goal
            } else {
                Side::Start
            };
            let (own, other) = match side {
                Side::Start => (&mut from_start, &from_goal),
                Side::Goal => (&mut from_goal, &from_start),
            };

            match self.expand(side, own, other, &neighbourhood) {
                Expansion::Exhausted => break SearchOutcome::NotFound(NotFoundReason::Exhausted),
                Expansion::Met(meeting) => break self.join(&from_start, &from_goal, meeting),
                Expansion::Continue => {}
            }

            iteration += 1;
            if self.config.should_report(iteration) {
                report_progress(&hooks.progress, || {
                    combined_progress(&from_start, &from_goal, SearchStage::Searching, None)
                });
            }
        };

        let message = outcome.describe();
        log::info!(
            "Bidirectional search {:?} -> {:?} {} after {} iterations",
            self.start,
            self.goal,
            message,
            iteration
        );
        report_progress(&hooks.progress, || {
            combined_progress(&from_start, &from_goal, SearchStage::Finished, Some(message))
        });
        outcome
    }

    fn expand(
        &self,
        side: Side,
        own: &mut Frontier,
        other: &Frontier,
        neighbourhood: &Neighbourhood,
    ) -> Expansion {
        let Some(current) = own.pop_and_close() else {
            return Expansion::Exhausted;
        };
        let target = match side {
            Side::Start => self.goal,
            Side::Goal => self.start,
        };

        let joined = |near: Voxel, far: Voxel, total: f64| match side {
            Side::Start => Meeting {
                from_start: near,
                from_goal: far,
                total,
            },
            Side::Goal => Meeting {
                from_start: far,
                from_goal: near,
                total,
            },
        };

        if current.voxel == target {
            return Expansion::Met(joined(current.voxel, current.voxel, current.g));
        }
        if let Some(node) = other.node(current.voxel) {
            if node.status == SearchStatus::Closed {
                return Expansion::Met(joined(current.voxel, current.voxel, current.g + node.g));
            }
        }

        let mut best: Option<Meeting> = None;
        for (next, length) in neighbourhood.around(current.voxel) {
            if own.status(next) == SearchStatus::Closed {
                continue;
            }
            let step = match side {
                Side::Start => step_cost(self.volume, &self.cost, next, length),
                // the forward path enters `next` earlier and pays for
                // `current` here, so `next` only has to be enterable
                Side::Goal => {
                    let enterable = next == self.start
                        || step_cost(self.volume, &self.cost, next, length).is_some();
                    if enterable {
                        step_cost(self.volume, &self.cost, current.voxel, length)
                    } else {
                        None
                    }
                }
            };
            let Some(step) = step else {
                continue;
            };
            let g = current.g + step;

            if let Some(node) = other.node(next) {
                if node.status == SearchStatus::Closed {
                    let total = g + node.g;
                    if best.is_none_or(|m| total < m.total) {
                        best = Some(joined(current.voxel, next, total));
                    }
                    continue;
                }
            }
            own.relax(next, g, self.estimate(next, side), Some(current.voxel));
        }

        match best {
            Some(meeting) => Expansion::Met(meeting),
            None => Expansion::Continue,
        }
    }

    fn join(&self, from_start: &Frontier, from_goal: &Frontier, meeting: Meeting) -> SearchOutcome {
        let mut voxels = from_start.path_to(meeting.from_start);
        let mut tail = from_goal.path_to(meeting.from_goal);
        tail.reverse();
        if meeting.from_start == meeting.from_goal {
            tail.remove(0);
        }
        voxels.extend(tail);
        SearchOutcome::Found(TracedPath::new(voxels, meeting.total))
    }
}

enum Expansion {
    Continue,
    Met(Meeting),
    Exhausted,
}

fn combined_progress(
    from_start: &Frontier,
    from_goal: &Frontier,
    stage: SearchStage,
    message: Option<String>,
) -> SearchProgress {
    let a = from_start.progress(stage, None, None);
    let b = from_goal.progress(stage, None, None);
    SearchProgress {
        open: a.open + b.open,
        closed: a.closed + b.closed,
        stage,
        min_open_distance: None,
        message,
    }
}
