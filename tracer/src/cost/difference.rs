use super::{check_range, rescale, Cost, RESCALED_MAX};
use crate::error::Result;

/// `256 - rescaled intensity`: linear penalty for dim voxels.
///
/// Rescaled values are capped at 255 so the cheapest step costs exactly 1.
/// Samples below `min` are not floored and cost more than 256.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difference {
    min: f64,
    max: f64,
}

impl Difference {
    pub const MIN_STEP_COST: f64 = 1.0;

    pub fn new(min: f64, max: f64) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self { min, max })
    }
}

impl Cost for Difference {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        let rescaled = rescale(value, self.min, self.max).min(RESCALED_MAX);
        RESCALED_MAX + 1.0 - rescaled
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}

/// Square of [`Difference`]; penalizes dim voxels much more steeply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceSq {
    inner: Difference,
}

impl DifferenceSq {
    pub const MIN_STEP_COST: f64 = 1.0;

    pub fn new(min: f64, max: f64) -> Result<Self> {
        Ok(Self {
            inner: Difference::new(min, max)?,
        })
    }
}

impl Cost for DifferenceSq {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        let d = self.inner.cost_moving_to(value);
        d * d
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}
