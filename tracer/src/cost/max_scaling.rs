use super::reciprocal::RECIPROCAL_FUDGE;
use super::{check_positive, Cost};
use crate::error::Result;

const SCALED_MAX: f64 = 256.0;

/// Reciprocal cost over intensities scaled by `256 / max` only, without
/// subtracting the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxScaling {
    multiplier: f64,
}

impl MaxScaling {
    pub const MIN_STEP_COST: f64 = 1.0 / SCALED_MAX;

    pub fn new(max: f64) -> Result<Self> {
        check_positive("MaxScaling", "maximum", max)?;
        Ok(Self {
            multiplier: SCALED_MAX / max,
        })
    }
}

impl Cost for MaxScaling {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        let scaled = value * self.multiplier;
        let scaled = if scaled <= 0.0 {
            RECIPROCAL_FUDGE
        } else {
            scaled.min(SCALED_MAX)
        };
        1.0 / scaled
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}
