//! Voxel coordinates, volume extents and physical calibration.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer position in a volume. `z` selects the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Voxel {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl From<(i32, i32, i32)> for Voxel {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

/// Extent of a volume in voxels. Valid coordinates are `0..width` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Dims {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn contains(&self, voxel: Voxel) -> bool {
        voxel.x >= 0
            && voxel.y >= 0
            && voxel.z >= 0
            && (voxel.x as usize) < self.width
            && (voxel.y as usize) < self.height
            && (voxel.z as usize) < self.depth
    }

    /// Single-slice volumes are searched with the 8-connected neighbourhood.
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.depth == 1
    }

    pub fn voxel_count(&self) -> usize {
        self.width * self.height * self.depth
    }
}

/// Physical voxel spacing per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default = "Calibration::default_unit")]
    pub unit: String,
}

impl Calibration {
    pub fn new(width: f64, height: f64, depth: f64, unit: impl Into<String>) -> Result<Self> {
        let calibration = Self {
            width,
            height,
            depth,
            unit: unit.into(),
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Unit spacing on every axis.
    pub fn isotropic() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            unit: Self::default_unit(),
        }
    }

    fn default_unit() -> String {
        "pixel".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if valid(self.width) && valid(self.height) && valid(self.depth) {
            Ok(())
        } else {
            Err(Error::InvalidCalibration {
                width: self.width,
                height: self.height,
                depth: self.depth,
            })
        }
    }

    /// Equal spacing on every axis; the unit label is ignored.
    pub fn same_spacing(&self, other: &Calibration) -> bool {
        self.spacing() == other.spacing()
    }

    #[inline]
    pub fn spacing(&self) -> DVec3 {
        DVec3::new(self.width, self.height, self.depth)
    }

    /// Physical length of a move by `(dx, dy, dz)` voxels.
    #[inline]
    pub fn step_length(&self, dx: i32, dy: i32, dz: i32) -> f64 {
        (DVec3::new(dx as f64, dy as f64, dz as f64) * self.spacing()).length()
    }

    pub fn to_physical(&self, voxel: Voxel) -> DVec3 {
        DVec3::new(voxel.x as f64, voxel.y as f64, voxel.z as f64) * self.spacing()
    }

    pub fn voxel_volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::isotropic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_contains() {
        let dims = Dims::new(3, 2, 1);
        assert!(dims.contains(Voxel::new(0, 0, 0)));
        assert!(dims.contains(Voxel::new(2, 1, 0)));
        assert!(!dims.contains(Voxel::new(3, 0, 0)));
        assert!(!dims.contains(Voxel::new(0, 0, 1)));
        assert!(!dims.contains(Voxel::new(-1, 0, 0)));
        assert!(dims.is_planar());
    }

    #[test]
    fn test_calibration_rejects_zero_and_nan() {
        assert!(Calibration::new(1.0, 1.0, 0.0, "um").is_err());
        assert!(Calibration::new(f64::NAN, 1.0, 1.0, "um").is_err());
        assert!(Calibration::new(-0.5, 1.0, 1.0, "um").is_err());
        assert!(Calibration::new(0.5, 0.5, 2.0, "um").is_ok());
    }

    #[test]
    fn test_same_spacing_ignores_unit() {
        let a = Calibration::new(0.5, 0.5, 2.0, "um").unwrap();
        let b = Calibration::new(0.5, 0.5, 2.0, "micron").unwrap();
        let c = Calibration::new(0.5, 0.5, 1.0, "um").unwrap();
        assert!(a.same_spacing(&b));
        assert!(!a.same_spacing(&c));
    }

    #[test]
    fn test_step_length_is_anisotropic() {
        let cal = Calibration::new(0.5, 0.5, 2.0, "um").unwrap();
        assert!((cal.step_length(1, 0, 0) - 0.5).abs() < 1e-12);
        assert!((cal.step_length(0, 0, 1) - 2.0).abs() < 1e-12);
        let diagonal = (0.25f64 + 0.25 + 4.0).sqrt();
        assert!((cal.step_length(1, -1, 1) - diagonal).abs() < 1e-12);
    }

    #[test]
    fn test_to_physical_and_voxel_volume() {
        let cal = Calibration::new(0.5, 0.25, 2.0, "um").unwrap();
        assert_eq!(cal.to_physical(Voxel::new(2, 4, 3)), DVec3::new(1.0, 1.0, 6.0));
        assert!((cal.voxel_volume() - 0.25).abs() < 1e-12);
    }
}
