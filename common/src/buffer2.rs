use std::slice;

/// Row-major 2-D buffer addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer2<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cells length must equal width * height"
        );
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.contains(x, y));
        y * self.width + x
    }

    /// Inverse of [`Buffer2::index`].
    #[inline]
    pub fn position(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Like [`Buffer2::get`] but returns `None` outside the buffer.
    #[inline]
    pub fn get_checked(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            Some(&self.cells[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.cells.iter()
    }
}

impl<T: Default> Buffer2<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_, _| T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_dimensions() {
        let buf = Buffer2::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.len(), 6);
        assert!(!buf.is_empty());
    }

    #[test]
    #[should_panic(expected = "cells length must equal width * height")]
    fn test_new_panics_on_size_mismatch() {
        Buffer2::new(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let buf = Buffer2::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(buf.cells(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_new_default_with_option_cells() {
        let buf: Buffer2<Option<u32>> = Buffer2::new_default(4, 3);
        assert_eq!(buf.len(), 12);
        assert!(buf.iter().all(Option::is_none));
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut buf = Buffer2::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(*buf.get(2, 0), 30);
        assert_eq!(*buf.get(0, 1), 40);
        *buf.get_mut(1, 1) = 99;
        assert_eq!(*buf.get(1, 1), 99);
    }

    #[test]
    fn test_get_checked_outside_is_none() {
        let buf = Buffer2::new(2, 2, vec![7u8; 4]);
        assert_eq!(buf.get_checked(1, 1), Some(&7));
        assert_eq!(buf.get_checked(2, 0), None);
        assert_eq!(buf.get_checked(0, 2), None);
    }

    #[test]
    fn test_index_and_position_round_trip() {
        let buf = Buffer2::<u8>::new_default(5, 3);
        assert_eq!(buf.index(3, 2), 13);
        assert_eq!(buf.position(13), (3, 2));
        assert_eq!(buf.position(0), (0, 0));
    }
}
