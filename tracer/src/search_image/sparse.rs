use hashbrown::HashMap;

use super::SearchImage;

/// Occupied cells only, keyed by `y * width + x`.
#[derive(Debug, Clone)]
pub struct SparseSearchImage<V> {
    cells: HashMap<usize, V>,
    width: usize,
    height: usize,
}

impl<V> SparseSearchImage<V> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: HashMap::new(),
            width,
            height,
        }
    }

    #[inline]
    fn key(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl<V> SearchImage<V> for SparseSearchImage<V> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn get_value(&self, x: usize, y: usize) -> Option<&V> {
        self.cells.get(&self.key(x, y)?)
    }

    #[inline]
    fn get_value_mut(&mut self, x: usize, y: usize) -> Option<&mut V> {
        let key = self.key(x, y)?;
        self.cells.get_mut(&key)
    }

    #[inline]
    fn set_value(&mut self, x: usize, y: usize, value: V) {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside {}x{} search image",
            x,
            y,
            self.width,
            self.height
        );
        self.cells.insert(y * self.width + x, value);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, &V)> + '_> {
        let width = self.width;
        Box::new(
            self.cells
                .iter()
                .map(move |(&idx, value)| (idx % width, idx / width, value)),
        )
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}
