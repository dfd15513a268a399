//! Dense square matrix indexed by box position.

/// Row-major n×n matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T> {
    n: usize,
    cells: Vec<T>,
}

impl<T: Clone> SquareMatrix<T> {
    pub fn new(n: usize, fill: T) -> Self {
        Self {
            n,
            cells: vec![fill; n * n],
        }
    }
}

impl<T> SquareMatrix<T> {
    /// Number of rows (and columns).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.cells[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.cells[i * self.n + j] = value;
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}

impl<T: Clone> SquareMatrix<T> {
    /// Stores `value` at both (i, j) and (j, i).
    #[inline]
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: T) {
        self.set(i, j, value.clone());
        self.set(j, i, value);
    }
}

impl<T: PartialEq> SquareMatrix<T> {
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
