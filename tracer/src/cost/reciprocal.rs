use super::{check_range, rescale, Cost, RESCALED_MAX};
use crate::error::Result;

/// Rescaled value substituted for samples at or below `min`.
pub const RECIPROCAL_FUDGE: f64 = 1e-6;

/// `1 / rescaled intensity`: bright voxels are cheap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reciprocal {
    min: f64,
    max: f64,
}

impl Reciprocal {
    pub const MIN_STEP_COST: f64 = 1.0 / RESCALED_MAX;

    pub fn new(min: f64, max: f64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self { min, max })
    }
}

impl Cost for Reciprocal {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        let rescaled = rescale(value, self.min, self.max);
        let rescaled = if rescaled <= 0.0 {
            RECIPROCAL_FUDGE
        } else {
            rescaled.min(RESCALED_MAX)
        };
        1.0 / rescaled
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}
