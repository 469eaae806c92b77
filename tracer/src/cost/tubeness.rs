use super::{check_positive, Cost};
use crate::error::Result;

/// Measure substituted for voxels with no tubeness response.
const ZERO_RESPONSE_MEASURE: f64 = 0.2;
const MEASURE_CAP: f64 = 256.0;

/// Reciprocal of a scaled tubeness (Hessian) filter response.
///
/// The volume handed to the search must hold the filter output, not raw
/// intensities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tubeness {
    multiplier: f64,
}

impl Tubeness {
    pub const MIN_STEP_COST: f64 = 1.0 / MEASURE_CAP;

    pub fn new(multiplier: f64) -> Result<Self> {
        check_positive("Tubeness", "multiplier", multiplier)?;
        Ok(Self { multiplier })
    }
}

impl Cost for Tubeness {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        let measure = if value > 0.0 {
            value
        } else {
            ZERO_RESPONSE_MEASURE
        };
        1.0 / (measure * self.multiplier).min(MEASURE_CAP)
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}
