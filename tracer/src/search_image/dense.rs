use common::Buffer2;

use super::SearchImage;

/// Flat `width × height` buffer of optional cells.
#[derive(Debug, Clone)]
pub struct DenseSearchImage<V> {
    cells: Buffer2<Option<V>>,
    occupied: usize,
}

impl<V> DenseSearchImage<V> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Buffer2::new_default(width, height),
            occupied: 0,
        }
    }
}

impl<V> SearchImage<V> for DenseSearchImage<V> {
    fn width(&self) -> usize {
        self.cells.width()
    }

    fn height(&self) -> usize {
        self.cells.height()
    }

    #[inline]
    fn get_value(&self, x: usize, y: usize) -> Option<&V> {
        self.cells.get_checked(x, y)?.as_ref()
    }

    #[inline]
    fn get_value_mut(&mut self, x: usize, y: usize) -> Option<&mut V> {
        if !self.cells.contains(x, y) {
            return None;
        }
        self.cells.get_mut(x, y).as_mut()
    }

    #[inline]
    fn set_value(&mut self, x: usize, y: usize, value: V) {
        assert!(
            self.cells.contains(x, y),
            "({}, {}) is outside {}x{} search image",
            x,
            y,
            self.cells.width(),
            self.cells.height()
        );
        let cell = self.cells.get_mut(x, y);
        if cell.is_none() {
            self.occupied += 1;
        }
        *cell = Some(value);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, &V)> + '_> {
        let cells = &self.cells;
        Box::new(cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let (x, y) = cells.position(idx);
            cell.as_ref().map(|value| (x, y, value))
        }))
    }

    fn len(&self) -> usize {
        self.occupied
    }
}
