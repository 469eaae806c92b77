//! Per-slice storage of search-node state.
//!
//! A search touches a tiny fraction of a large volume, so node state lives in
//! a [`SearchImageStack`]: one 2-D [`SearchImage`] per z, created the first
//! time the search touches that slice. Each slice is either dense (flat
//! buffer of optional cells) or sparse (hash map of occupied cells); the
//! choice is made once per run with [`SearchImageType`].

#[cfg(test)]
mod tests;

mod dense;
mod sparse;

pub use dense::DenseSearchImage;
pub use sparse::SparseSearchImage;

use std::collections::BTreeSet;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{Error, Result};
use crate::voxel::Voxel;

/// Expected visited fraction at or above which dense slices pay off.
pub const DENSE_OCCUPANCY_THRESHOLD: f64 = 0.25;

/// Sparse `(x, y) -> V` map for a single slice. Absent cells are unvisited.
///
/// Coordinates passed to the mutating methods must lie inside
/// `width × height`.
pub trait SearchImage<V> {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn get_value(&self, x: usize, y: usize) -> Option<&V>;

    fn get_value_mut(&mut self, x: usize, y: usize) -> Option<&mut V>;

    fn set_value(&mut self, x: usize, y: usize, value: V);

    /// Stored cells as `(x, y, value)`, in no particular order.
    fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, &V)> + '_>;

    /// Number of stored cells.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SearchImageType {
    Dense,
    #[default]
    Sparse,
}

impl SearchImageType {
    /// Picks the storage for a search expected to visit `expected_ratio` of
    /// each touched slice.
    pub fn for_occupancy(expected_ratio: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&expected_ratio) {
            return Err(Error::InvalidOccupancy(expected_ratio));
        }
        if expected_ratio >= DENSE_OCCUPANCY_THRESHOLD {
            Ok(Self::Dense)
        } else {
            Ok(Self::Sparse)
        }
    }
}

/// One slice of a [`SearchImageStack`], in whichever storage the run chose.
#[derive(Debug, Clone)]
pub enum SearchSlice<V> {
    Dense(DenseSearchImage<V>),
    Sparse(SparseSearchImage<V>),
}

impl<V> SearchSlice<V> {
    pub fn new(image_type: SearchImageType, width: usize, height: usize) -> Self {
        match image_type {
            SearchImageType::Dense => Self::Dense(DenseSearchImage::new(width, height)),
            SearchImageType::Sparse => Self::Sparse(SparseSearchImage::new(width, height)),
        }
    }

    pub fn image_type(&self) -> SearchImageType {
        match self {
            Self::Dense(_) => SearchImageType::Dense,
            Self::Sparse(_) => SearchImageType::Sparse,
        }
    }
}

impl<V> SearchImage<V> for SearchSlice<V> {
    fn width(&self) -> usize {
        match self {
            Self::Dense(image) => image.width(),
            Self::Sparse(image) => image.width(),
        }
    }

    fn height(&self) -> usize {
        match self {
            Self::Dense(image) => image.height(),
            Self::Sparse(image) => image.height(),
        }
    }

    #[inline]
    fn get_value(&self, x: usize, y: usize) -> Option<&V> {
        match self {
            Self::Dense(image) => image.get_value(x, y),
            Self::Sparse(image) => image.get_value(x, y),
        }
    }

    #[inline]
    fn get_value_mut(&mut self, x: usize, y: usize) -> Option<&mut V> {
        match self {
            Self::Dense(image) => image.get_value_mut(x, y),
            Self::Sparse(image) => image.get_value_mut(x, y),
        }
    }

    #[inline]
    fn set_value(&mut self, x: usize, y: usize, value: V) {
        match self {
            Self::Dense(image) => image.set_value(x, y, value),
            Self::Sparse(image) => image.set_value(x, y, value),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, &V)> + '_> {
        match self {
            Self::Dense(image) => image.iter(),
            Self::Sparse(image) => image.iter(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Dense(image) => image.len(),
            Self::Sparse(image) => image.len(),
        }
    }
}

// ============================================================================
// Stack
// ============================================================================

/// Lazily populated `z -> slice` map. Slices that were never touched are
/// never allocated.
#[derive(Debug, Clone)]
pub struct SearchImageStack<V> {
    slices: HashMap<i32, SearchSlice<V>>,
    width: usize,
    height: usize,
    image_type: SearchImageType,
}

impl<V> SearchImageStack<V> {
    pub fn new(width: usize, height: usize, image_type: SearchImageType) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            slices: HashMap::new(),
            width,
            height,
            image_type,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn image_type(&self) -> SearchImageType {
        self.image_type
    }

    /// Creates an empty slice at `z`, replacing any slice already there.
    pub fn new_slice(&mut self, z: i32) -> &mut SearchSlice<V> {
        let slice = SearchSlice::new(self.image_type, self.width, self.height);
        match self.slices.entry(z) {
            Entry::Occupied(mut entry) => {
                entry.insert(slice);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(slice),
        }
    }

    pub fn get_slice(&self, z: i32) -> Option<&SearchSlice<V>> {
        self.slices.get(&z)
    }

    pub fn get_slice_mut(&mut self, z: i32) -> Option<&mut SearchSlice<V>> {
        self.slices.get_mut(&z)
    }

    pub fn slice_or_create(&mut self, z: i32) -> &mut SearchSlice<V> {
        let (image_type, width, height) = (self.image_type, self.width, self.height);
        self.slices
            .entry(z)
            .or_insert_with(|| SearchSlice::new(image_type, width, height))
    }

    /// Slice indices that have been created, ascending.
    pub fn key_set(&self) -> BTreeSet<i32> {
        self.slices.keys().copied().collect()
    }

    /// Number of allocated slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Allocated slices as `(z, slice)`, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &SearchSlice<V>)> {
        self.slices.iter().map(|(&z, slice)| (z, slice))
    }

    #[inline]
    pub fn node(&self, voxel: Voxel) -> Option<&V> {
        let (x, y) = self.planar(voxel)?;
        self.slices.get(&voxel.z)?.get_value(x, y)
    }

    #[inline]
    pub fn node_mut(&mut self, voxel: Voxel) -> Option<&mut V> {
        let (x, y) = self.planar(voxel)?;
        self.slices.get_mut(&voxel.z)?.get_value_mut(x, y)
    }

    /// Stores `value` at `voxel`, creating its slice if needed. Voxels
    /// outside the slice extent are ignored.
    pub fn set_node(&mut self, voxel: Voxel, value: V) {
        if let Some((x, y)) = self.planar(voxel) {
            self.slice_or_create(voxel.z).set_value(x, y, value);
        }
    }

    /// Stored cells across every slice.
    pub fn total_nodes(&self) -> usize {
        self.slices.values().map(SearchImage::len).sum()
    }

    /// Every stored cell as `(voxel, value)`, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = (Voxel, &V)> {
        self.slices.iter().flat_map(|(&z, slice)| {
            slice
                .iter()
                .map(move |(x, y, value)| (Voxel::new(x as i32, y as i32, z), value))
        })
    }

    #[inline]
    fn planar(&self, voxel: Voxel) -> Option<(usize, usize)> {
        if voxel.x < 0 || voxel.y < 0 {
            return None;
        }
        let (x, y) = (voxel.x as usize, voxel.y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }
}
