use super::{check_finite, Cost};
use crate::error::{Error, Result};

/// Cost relative to a reference intensity: `1` on an exact match, otherwise
/// `1 + |v - ref| / (ref + v)`. Defined for non-negative samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeDifference {
    reference: f64,
}

impl RelativeDifference {
    pub const MIN_STEP_COST: f64 = 1.0;

    pub fn new(reference: f64) -> Result<Self> {
        check_finite("RelativeDifference", "reference", reference)?;
        if reference < 0.0 {
            return Err(Error::InvalidParameter {
                model: "RelativeDifference",
                name: "reference",
                value: reference,
            });
        }
        Ok(Self { reference })
    }

    pub fn reference(&self) -> f64 {
        self.reference
    }
}

impl Cost for RelativeDifference {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        if value == self.reference {
            return 1.0;
        }
        // abs() keeps the ratio non-negative for samples outside the domain
        let denominator = (self.reference + value).abs();
        1.0 + (value - self.reference).abs() / denominator
    }

    fn min_step_cost(&self) -> f64 {
        Self::MIN_STEP_COST
    }
}
