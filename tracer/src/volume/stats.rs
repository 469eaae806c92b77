use serde::{Deserialize, Serialize};

use super::Volume;
use crate::error::{Error, Result};

/// Global intensity statistics used to parameterize cost models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Number of finite samples the statistics were computed from.
    pub count: usize,
}

impl VolumeStats {
    /// Single pass over every voxel. Non-finite samples are skipped.
    pub fn compute<V: Volume + ?Sized>(volume: &V) -> Result<Self> {
        let dims = volume.dims();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut count = 0usize;
        // Welford's running mean / squared deviation
        let mut mean = 0.0f64;
        let mut m2 = 0.0f64;

        for z in 0..dims.depth {
            for y in 0..dims.height {
                for x in 0..dims.width {
                    let v = volume.value_at(x, y, z);
                    if !v.is_finite() {
                        continue;
                    }
                    min = min.min(v);
                    max = max.max(v);
                    count += 1;
                    let delta = v - mean;
                    mean += delta / count as f64;
                    m2 += delta * (v - mean);
                }
            }
        }

        if count == 0 {
            return Err(Error::EmptyVolume);
        }

        let stats = Self {
            min,
            max,
            mean,
            std_dev: (m2 / count as f64).sqrt(),
            count,
        };
        log::debug!(
            "Volume stats: min={} max={} mean={} std_dev={} over {} voxels",
            stats.min,
            stats.max,
            stats.mean,
            stats.std_dev,
            stats.count
        );
        Ok(stats)
    }
}
