//! Read access to intensity volumes.
//!
//! The search only ever sees normalized `f64` samples. Pixel-type dispatch
//! and any rescaling happen in the [`Volume`] implementation, upstream of
//! the cost formula.


mod stats;

pub use stats::VolumeStats;

use common::Buffer2;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::voxel::{Dims, Voxel};

/// Scalar volume addressed by voxel coordinates.
///
/// `Sync` so independent searches can share one volume across threads.
pub trait Volume: Sync {
    fn dims(&self) -> Dims;

    /// Sample at `(x, y, z)`. Callers guarantee the position is inside
    /// [`Volume::dims`].
    fn value_at(&self, x: usize, y: usize, z: usize) -> f64;

    /// Bounds-checked sample.
    fn value(&self, voxel: Voxel) -> Option<f64> {
        if self.dims().contains(voxel) {
            Some(self.value_at(voxel.x as usize, voxel.y as usize, voxel.z as usize))
        } else {
            None
        }
    }
}

/// In-memory volume stored as one [`Buffer2`] per slice.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVolume<T> {
    slices: Vec<Buffer2<T>>,
    dims: Dims,
}

impl<T: ToPrimitive + Copy + Sync> DenseVolume<T> {
    /// Builds a volume from x-fastest, then y, then z ordered samples.
    pub fn new(width: usize, height: usize, depth: usize, samples: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::InvalidVolumeDimensions {
                width,
                height,
                depth,
            });
        }
        let slice_len = width * height;
        if samples.len() != slice_len * depth {
            return Err(Error::SampleCountMismatch {
                expected: slice_len * depth,
                actual: samples.len(),
            });
        }

        let slices = samples
            .chunks_exact(slice_len)
            .map(|chunk| Buffer2::new(width, height, chunk.to_vec()))
            .collect();

        Ok(Self {
            slices,
            dims: Dims::new(width, height, depth),
        })
    }

    pub fn from_fn(dims: Dims, mut f: impl FnMut(usize, usize, usize) -> T) -> Result<Self> {
        if dims.width == 0 || dims.height == 0 || dims.depth == 0 {
            return Err(Error::InvalidVolumeDimensions {
                width: dims.width,
                height: dims.height,
                depth: dims.depth,
            });
        }
        let slices = (0..dims.depth)
            .map(|z| Buffer2::from_fn(dims.width, dims.height, |x, y| f(x, y, z)))
            .collect();
        Ok(Self { slices, dims })
    }

    pub fn filled(dims: Dims, value: T) -> Result<Self> {
        Self::from_fn(dims, |_, _, _| value)
    }

    pub fn set(&mut self, voxel: Voxel, value: T) {
        assert!(
            self.dims.contains(voxel),
            "voxel {:?} outside volume {:?}",
            voxel,
            self.dims
        );
        *self.slices[voxel.z as usize].get_mut(voxel.x as usize, voxel.y as usize) = value;
    }

    pub fn slice(&self, z: usize) -> &Buffer2<T> {
        &self.slices[z]
    }
}

impl<T: ToPrimitive + Copy + Sync> Volume for DenseVolume<T> {
    #[inline]
    fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn value_at(&self, x: usize, y: usize, z: usize) -> f64 {
        self.slices[z].get(x, y).to_f64().unwrap_or(f64::NAN)
    }
}
