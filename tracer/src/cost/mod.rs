//! Cost models turning a voxel sample into the price of stepping onto it.
//!
//! Every model guarantees `cost_moving_to(v) > 0` for finite samples in its
//! domain and declares [`Cost::min_step_cost`], the smallest cost it can
//! produce. The search scales heuristic estimates by that minimum so they
//! stay admissible whichever model is active.


mod difference;
mod max_scaling;
mod one_minus_erf;
mod reciprocal;
mod relative_difference;
mod tubeness;

pub use difference::{Difference, DifferenceSq};
pub use max_scaling::MaxScaling;
pub use one_minus_erf::OneMinusErf;
pub use reciprocal::Reciprocal;
pub use relative_difference::RelativeDifference;
pub use tubeness::Tubeness;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::volume::VolumeStats;

/// Upper end of the range intensities are rescaled into.
pub const RESCALED_MAX: f64 = 255.0;

/// Value-based cost function.
pub trait Cost: Send + Sync {
    /// Cost of moving onto a voxel whose sample is `value`.
    fn cost_moving_to(&self, value: f64) -> f64;

    /// Smallest value [`Cost::cost_moving_to`] can return over the model's domain.
    fn min_step_cost(&self) -> f64;

    /// Name recorded in fills; `None` for models outside [`CostKind`].
    fn cost_kind(&self) -> Option<CostKind> {
        None
    }
}

impl<C: Cost + ?Sized> Cost for &C {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        (**self).cost_moving_to(value)
    }

    #[inline]
    fn min_step_cost(&self) -> f64 {
        (**self).min_step_cost()
    }

    fn cost_kind(&self) -> Option<CostKind> {
        (**self).cost_kind()
    }
}

/// Linear map of `[min, max]` onto `[0, 255]`. Not clamped; each model
/// clamps the result the way its formula requires.
#[inline]
pub(crate) fn rescale(value: f64, min: f64, max: f64) -> f64 {
    RESCALED_MAX * (value - min) / (max - min)
}

pub(crate) fn check_range(min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() && max > min {
        Ok(())
    } else {
        Err(Error::DegenerateRange { min, max })
    }
}

pub(crate) fn check_positive(model: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { model, name, value })
    }
}

pub(crate) fn check_finite(model: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter { model, name, value })
    }
}

/// Names of the available cost models, as used in configuration and fills.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    #[default]
    Reciprocal,
    Difference,
    DifferenceSq,
    OneMinusErf,
    RelativeDifference,
    MaxScaling,
    Tubeness,
}

/// Model parameters that are not derived from volume statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParams {
    /// Multiplier applied to the intensity z-score by [`OneMinusErf`].
    pub z_fudge: f64,
    /// Reference value for [`RelativeDifference`]; the volume mean when unset.
    pub reference: Option<f64>,
    /// Scale applied to filter responses by [`Tubeness`].
    pub tubeness_multiplier: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            z_fudge: 1.0,
            reference: None,
            tubeness_multiplier: 4.0,
        }
    }
}

/// Closed set of cost models, chosen once per search.
#[derive(Debug, Clone, PartialEq)]
pub enum CostModel {
    Reciprocal(Reciprocal),
    Difference(Difference),
    DifferenceSq(DifferenceSq),
    OneMinusErf(OneMinusErf),
    RelativeDifference(RelativeDifference),
    MaxScaling(MaxScaling),
    Tubeness(Tubeness),
}

impl CostModel {
    /// Builds the model named by `kind` from global volume statistics.
    pub fn from_stats(kind: CostKind, stats: &VolumeStats, params: &CostParams) -> Result<Self> {
        let model = match kind {
            CostKind::Reciprocal => Self::Reciprocal(Reciprocal::new(stats.min, stats.max)?),
            CostKind::Difference => Self::Difference(Difference::new(stats.min, stats.max)?),
            CostKind::DifferenceSq => {
                Self::DifferenceSq(DifferenceSq::new(stats.min, stats.max)?)
            }
            CostKind::OneMinusErf => {
                let mut model = OneMinusErf::new(stats.max, stats.mean, stats.std_dev)?;
                model.set_z_fudge(params.z_fudge)?;
                Self::OneMinusErf(model)
            }
            CostKind::RelativeDifference => Self::RelativeDifference(RelativeDifference::new(
                params.reference.unwrap_or(stats.mean),
            )?),
            CostKind::MaxScaling => Self::MaxScaling(MaxScaling::new(stats.max)?),
            CostKind::Tubeness => Self::Tubeness(Tubeness::new(params.tubeness_multiplier)?),
        };
        log::debug!(
            "Built {} cost model, min step cost = {}",
            kind,
            model.min_step_cost()
        );
        Ok(model)
    }

    pub fn kind(&self) -> CostKind {
        match self {
            Self::Reciprocal(_) => CostKind::Reciprocal,
            Self::Difference(_) => CostKind::Difference,
            Self::DifferenceSq(_) => CostKind::DifferenceSq,
            Self::OneMinusErf(_) => CostKind::OneMinusErf,
            Self::RelativeDifference(_) => CostKind::RelativeDifference,
            Self::MaxScaling(_) => CostKind::MaxScaling,
            Self::Tubeness(_) => CostKind::Tubeness,
        }
    }
}

impl Cost for CostModel {
    #[inline]
    fn cost_moving_to(&self, value: f64) -> f64 {
        match self {
            Self::Reciprocal(c) => c.cost_moving_to(value),
            Self::Difference(c) => c.cost_moving_to(value),
            Self::DifferenceSq(c) => c.cost_moving_to(value),
            Self::OneMinusErf(c) => c.cost_moving_to(value),
            Self::RelativeDifference(c) => c.cost_moving_to(value),
            Self::MaxScaling(c) => c.cost_moving_to(value),
            Self::Tubeness(c) => c.cost_moving_to(value),
        }
    }

    #[inline]
    fn min_step_cost(&self) -> f64 {
        match self {
            Self::Reciprocal(c) => c.min_step_cost(),
            Self::Difference(c) => c.min_step_cost(),
            Self::DifferenceSq(c) => c.min_step_cost(),
            Self::OneMinusErf(c) => c.min_step_cost(),
            Self::RelativeDifference(c) => c.min_step_cost(),
            Self::MaxScaling(c) => c.min_step_cost(),
            Self::Tubeness(c) => c.min_step_cost(),
        }
    }

    fn cost_kind(&self) -> Option<CostKind> {
        Some(self.kind())
    }
}
