use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::voxel::{Calibration, Voxel};

/// Voxel sequence from start to goal with its accumulated cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedPath {
    pub voxels: Vec<Voxel>,
    pub total_cost: f64,
}

impl TracedPath {
    pub fn new(voxels: Vec<Voxel>, total_cost: f64) -> Self {
        Self { voxels, total_cost }
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn start(&self) -> Option<Voxel> {
        self.voxels.first().copied()
    }

    pub fn goal(&self) -> Option<Voxel> {
        self.voxels.last().copied()
    }

    pub fn physical_points(&self, calibration: &Calibration) -> Vec<DVec3> {
        self.voxels
            .iter()
            .map(|&voxel| calibration.to_physical(voxel))
            .collect()
    }

    /// Polyline length in calibrated units.
    pub fn physical_length(&self, calibration: &Calibration) -> f64 {
        self.voxels
            .windows(2)
            .map(|pair| {
                calibration.step_length(
                    pair[1].x - pair[0].x,
                    pair[1].y - pair[0].y,
                    pair[1].z - pair[0].z,
                )
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_geometry() {
        let path = TracedPath::new(
            vec![Voxel::new(0, 0, 0), Voxel::new(1, 0, 0), Voxel::new(1, 0, 1)],
            3.0,
        );
        let cal = Calibration::new(0.5, 0.5, 2.0, "um").unwrap();

        assert_eq!(path.start(), Some(Voxel::new(0, 0, 0)));
        assert_eq!(path.goal(), Some(Voxel::new(1, 0, 1)));
        assert_eq!(
            path.physical_points(&cal),
            vec![
                DVec3::ZERO,
                DVec3::new(0.5, 0.0, 0.0),
                DVec3::new(0.5, 0.0, 2.0)
            ]
        );
        assert!((path.physical_length(&cal) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_voxel_path_has_zero_length() {
        let path = TracedPath::new(vec![Voxel::new(3, 3, 3)], 0.0);
        assert_eq!(path.physical_length(&Calibration::isotropic()), 0.0);
        assert_eq!(path.len(), 1);
    }
}
