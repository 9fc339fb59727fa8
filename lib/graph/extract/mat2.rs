//! Dense binary matrices with arithmetic over GF(2).

use ndarray::Array2;

/// A single elementary row operation: row `dst` is replaced by the sum of rows
/// `dst` and `src`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowAdd {
    pub src: usize,
    pub dst: usize,
}

/// A dense matrix over GF(2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mat2 {
    data: Array2<bool>,
}

impl Mat2 {
    /// Create a new all-zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self { data: Array2::from_elem((nrows, ncols), false) }
    }

    /// Create a new matrix by evaluating `f` at each `(row, column)`.
    pub fn from_fn<F>(nrows: usize, ncols: usize, f: F) -> Self
    where F: FnMut((usize, usize)) -> bool
    {
        Self { data: Array2::from_shape_fn((nrows, ncols), f) }
    }

    pub fn nrows(&self) -> usize { self.data.nrows() }

    pub fn ncols(&self) -> usize { self.data.ncols() }

    /// Return the `(r, c)` entry, or `false` if out of bounds.
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.data.get((r, c)).copied().unwrap_or(false)
    }

    /// Set the `(r, c)` entry. Out-of-bounds indices are ignored.
    pub fn set(&mut self, r: usize, c: usize, val: bool) {
        if let Some(x) = self.data.get_mut((r, c)) { *x = val; }
    }

    /// Return the number of nonzero entries in row `r`.
    pub fn row_weight(&self, r: usize) -> usize {
        self.data.row(r).iter().filter(|x| **x).count()
    }

    /// Return the column indices of the nonzero entries in row `r`.
    pub fn row_ones(&self, r: usize) -> Vec<usize> {
        self.data.row(r).iter().enumerate()
            .filter_map(|(c, x)| x.then_some(c))
            .collect()
    }

    /// Add row `op.src` to row `op.dst`.
    pub fn row_add(&mut self, op: RowAdd) {
        if op.src == op.dst { return; }
        for c in 0..self.ncols() {
            if self.data[[op.src, c]] { self.data[[op.dst, c]] ^= true; }
        }
    }

    /// Perform Gauss-Jordan elimination in place, returning the row operations
    /// performed in order.
    ///
    /// Columns are processed left to right. For each, the topmost usable row
    /// with a 1 in that column is added into the current pivot row (if it is
    /// not already the pivot row), and the pivot row is then added into every
    /// other row with a 1 in that column. The result is in reduced row
    /// echelon form, up to the order of rows.
    pub fn gauss_jordan(&mut self) -> Vec<RowAdd> {
        let mut ops: Vec<RowAdd> = Vec::new();
        let mut pivot_row: usize = 0;
        for c in 0..self.ncols() {
            if pivot_row >= self.nrows() { break; }
            let Some(r) = (pivot_row..self.nrows()).find(|r| self.get(*r, c))
                else { continue; };
            if r != pivot_row {
                let op = RowAdd { src: r, dst: pivot_row };
                self.row_add(op);
                ops.push(op);
            }
            for r2 in 0..self.nrows() {
                if r2 != pivot_row && self.get(r2, c) {
                    let op = RowAdd { src: pivot_row, dst: r2 };
                    self.row_add(op);
                    ops.push(op);
                }
            }
            pivot_row += 1;
        }
        ops
    }

    /// Return the rank of the matrix.
    pub fn rank(&self) -> usize {
        let mut m = self.clone();
        m.gauss_jordan();
        (0..m.nrows()).filter(|r| m.row_weight(*r) > 0).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mat(rows: &[&[u8]]) -> Mat2 {
        Mat2::from_fn(rows.len(), rows[0].len(), |(r, c)| rows[r][c] == 1)
    }

    #[test]
    fn invertible_reduces_to_identity() {
        let mut m = mat(&[
            &[0, 1, 1],
            &[1, 1, 0],
            &[1, 1, 1],
        ]);
        let orig = m.clone();
        let ops = m.gauss_jordan();
        assert_eq!(m, mat(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]));

        let mut replay = orig;
        ops.into_iter().for_each(|op| replay.row_add(op));
        assert_eq!(replay, m);
    }

    #[test]
    fn rank_deficient() {
        let mut m = mat(&[
            &[1, 1, 0, 1],
            &[0, 1, 1, 0],
            &[1, 0, 1, 1],
        ]);
        assert_eq!(m.rank(), 2);
        m.gauss_jordan();
        assert_eq!(m.row_weight(2), 0);
        assert_eq!(m.row_ones(0), vec![0, 2, 3]);
        assert_eq!(m.row_ones(1), vec![1, 2]);
    }

    #[test]
    fn row_ops() {
        let mut m = Mat2::zeros(2, 3);
        m.set(0, 0, true);
        m.set(0, 2, true);
        m.set(1, 2, true);
        m.row_add(RowAdd { src: 0, dst: 1 });
        assert_eq!(m.row_ones(1), vec![0]);
        assert_eq!(m.row_weight(0), 2);
        assert!(!m.get(5, 5));
    }
}
