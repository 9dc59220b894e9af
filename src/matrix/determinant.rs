/// Dense square matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    order: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// Returns `None` unless `data` holds exactly `order * order` values.
    pub fn from_row_major(order: usize, data: Vec<f64>) -> Option<Self> {
        (order.checked_mul(order) == Some(data.len())).then_some(Self { order, data })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.data[self.order * row + column]
    }

    fn set(&mut self, row: usize, column: usize, value: f64) {
        self.data[self.order * row + column] = value;
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.order;
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.data.split_at_mut(high * n);
        head[low * n..(low + 1) * n].swap_with_slice(&mut tail[..n]);
    }

    /// Swap in the first row below `index` with a non-zero entry in column `index`.
    fn pivot_from_below(&mut self, index: usize) -> bool {
        match (index + 1..self.order).find(|&row| self.get(row, index) != 0.0) {
            Some(row) => {
                self.swap_rows(row, index);
                true
            }
            None => false,
        }
    }

    /// Zero column `pivot` in every row below the pivot row.
    fn eliminate_below(&mut self, pivot: usize) {
        let pivot_value = self.get(pivot, pivot);

        for row in pivot + 1..self.order {
            let factor = self.get(row, pivot) / pivot_value;
            for column in pivot..self.order {
                let value = self.get(row, column) - factor * self.get(pivot, column);
                self.set(row, column, value);
            }
        }
    }

    /// Determinant by Gaussian elimination. Consumes the matrix.
    pub fn determinant(mut self) -> f64 {
        if self.order == 0 {
            return 1.0;
        }

        let mut sign = 1.0;
        for i in 0..self.order - 1 {
            if self.get(i, i) == 0.0 {
                if !self.pivot_from_below(i) {
                    return 0.0;
                }
                sign = -sign;
            }
            self.eliminate_below(i);
        }

        sign * (0..self.order).map(|i| self.get(i, i)).product::<f64>()
    }
}
