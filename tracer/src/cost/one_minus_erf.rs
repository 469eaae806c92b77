use super::{check_finite, check_positive, Cost};
use crate::error::Result;

/// Added to the computed minimum so it never reaches zero.
pub const STEP_COST_LOWER_BOUND: f64 = 1e-60;

const MODEL: &str = "OneMinusErf";

/// `erfc(z_fudge * zscore(v))`: cost falls off like a Gaussian tail as the
/// sample rises above the volume mean.
///
/// The minimum step cost depends on `z_fudge`, so it is cached and
/// recomputed by [`OneMinusErf::set_z_fudge`] before the setter returns.
///
/// The cached minimum is `erfc(z_fudge * zscore(max))` plus
/// [`STEP_COST_LOWER_BOUND`], while costs are only floored at that bound. So
/// when the tail at `max` is tiny but non-zero, `cost_moving_to(max)` sits
/// one bound below `min_step_cost()`. Search drivers clamp every step to
/// the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneMinusErf {
    max: f64,
    avg: f64,
    std_dev: f64,
    z_fudge: f64,
    min_step_cost: f64,
}

impl OneMinusErf {
    /// `max`, `average` and `std_dev` are the volume's intensity statistics.
    pub fn new(max: f64, average: f64, std_dev: f64) -> Result<Self> {
        check_finite(MODEL, "maximum", max)?;
        check_finite(MODEL, "average", average)?;
        check_positive(MODEL, "standard deviation", std_dev)?;

        let mut model = Self {
            max,
            avg: average,
            std_dev,
            z_fudge: 1.0,
            min_step_cost: 0.0,
        };
        model.min_step_cost = model.compute_min_step_cost();
        log::debug!("{} min step cost = {}", MODEL, model.min_step_cost);
        Ok(model)
    }

    /// Scale for the intensity z-score. Values below 1 separate very bright
    /// voxels numerically at the price of exploring more nodes.
    pub fn set_z_fudge(&mut self, z_fudge: f64) -> Result<()> {
        check_positive(MODEL, "z fudge", z_fudge)?;
        self.z_fudge = z_fudge;
        self.min_step_cost = self.compute_min_step_cost();
        log::debug!(
            "{} z fudge = {}, min step cost = {}",
            MODEL,
            z_fudge,
            self.min_step_cost
        );
        Ok(())
    }

    pub fn z_fudge(&self) -> f64 {
        self.z_fudge
    }

    #[inline]
    fn z_score(&self, value: f64) -> f64 {
        (value - self.avg) / self.std_dev
    }

    fn compute_min_step_cost(&self) -> f64 {
        libm::erfc(self.z_fudge * self.z_score(self.max)) + STEP_COST_LOWER_BOUND
    }
}

impl Cost for OneMinusErf {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        // erfc underflows to 0 far above the mean
        libm::erfc(self.z_fudge * self.z_score(value)).max(STEP_COST_LOWER_BOUND)
    }

    fn min_step_cost(&self) -> f64 {
        self.min_step_cost
    }
}
