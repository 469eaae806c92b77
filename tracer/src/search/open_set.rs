//! Min-priority open set with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::voxel::Voxel;

/// Queued candidate. Entries are never updated in place: a cheaper
/// rediscovery pushes a fresh entry and the old one goes stale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenEntry {
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub seq: u64,
    pub voxel: Voxel,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    /// Reversed so the max-heap pops lowest `f`, then lowest `h`, then the
    /// earliest push.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl OpenSet {
    pub fn push(&mut self, voxel: Voxel, g: f64, h: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry {
            f: g + h,
            g,
            h,
            seq,
            voxel,
        });
    }

    #[inline]
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    #[inline]
    pub fn peek(&self) -> Option<&OpenEntry> {
        self.heap.peek()
    }

    /// Queued entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_f_first() {
        let mut open = OpenSet::default();
        open.push(Voxel::new(0, 0, 0), 5.0, 1.0);
        open.push(Voxel::new(1, 0, 0), 2.0, 1.0);
        open.push(Voxel::new(2, 0, 0), 3.0, 4.0);

        let order: Vec<_> = std::iter::from_fn(|| open.pop()).map(|e| e.voxel.x).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_ties_prefer_lower_h_then_insertion_order() {
        let mut open = OpenSet::default();
        open.push(Voxel::new(0, 0, 0), 1.0, 2.0);
        open.push(Voxel::new(1, 0, 0), 2.0, 1.0);
        open.push(Voxel::new(2, 0, 0), 2.0, 1.0);

        assert_eq!(open.pop().unwrap().voxel.x, 1);
        assert_eq!(open.pop().unwrap().voxel.x, 2);
        assert_eq!(open.pop().unwrap().voxel.x, 0);
        assert!(open.is_empty());
    }
}
