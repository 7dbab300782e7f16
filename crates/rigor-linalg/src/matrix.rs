//! 2-D matrices of intervals.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use tracing::trace;

use rigor_core::{Interval, Result, RigorError};

use crate::exec::{fill, ExecConfig};
use crate::vector::Vector;

/// A fixed `rows x columns` grid of [`Interval`] elements, row-major.
///
/// Constructed once from interval data (taking ownership of the buffer: the
/// caller must not retain an alias) or synthesized from scalars via the
/// explicit [`Matrix::exact`] / [`Matrix::measured`] factories. Dimensions
/// are immutable after construction; individual cells are mutable through
/// the row/column accessors, which exist for decomposition-style algorithms
/// built on top of this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Array2<Interval>,
}

impl Matrix {
    /// Matrix of exact zero points.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), Interval::exact(0.0)),
        }
    }

    /// Create a matrix over an existing interval grid, taking ownership.
    pub fn from_array(data: Array2<Interval>) -> Self {
        Self { data }
    }

    /// Create a matrix from rows of intervals. Fails when rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Interval>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        for row in &rows {
            if row.len() != ncols {
                return Err(RigorError::dimension_mismatch(
                    vec![ncols],
                    vec![row.len()],
                ));
            }
        }
        let cells: Vec<Interval> = rows.into_iter().flatten().collect();
        Ok(Self {
            data: Array2::from_shape_vec((nrows, ncols), cells)
                .expect("row-major cell count matches shape"),
        })
    }

    /// Synthesize from scalars treated as true mathematical points.
    pub fn exact(values: &Array2<f64>) -> Self {
        Self {
            data: values.mapv(Interval::exact),
        }
    }

    /// Synthesize from scalars treated as measured (already-rounded) values.
    pub fn measured(values: &Array2<f64>) -> Self {
        Self {
            data: values.mapv(Interval::measured),
        }
    }

    /// Column matrix (`len x 1`) from a vector.
    pub fn from_vector(vector: &Vector) -> Self {
        let cells: Vec<Interval> = vector.iter().copied().collect();
        Self {
            data: Array2::from_shape_vec((cells.len(), 1), cells)
                .expect("column cell count matches shape"),
        }
    }

    /// Row matrix (`1 x len`) from interval elements.
    pub fn from_row(cells: &[Interval]) -> Self {
        Self {
            data: Array2::from_shape_vec((1, cells.len()), cells.to_vec())
                .expect("row cell count matches shape"),
        }
    }

    /// Column matrix (`len x 1`) from interval elements.
    pub fn from_column(cells: &[Interval]) -> Self {
        Self {
            data: Array2::from_shape_vec((cells.len(), 1), cells.to_vec())
                .expect("column cell count matches shape"),
        }
    }

    /// Square matrix with `cells` on the diagonal, exact zeros elsewhere.
    pub fn diagonal(cells: &[Interval]) -> Self {
        let mut matrix = Self::zeros(cells.len(), cells.len());
        for (i, &cell) in cells.iter().enumerate() {
            matrix.data[[i, i]] = cell;
        }
        matrix
    }

    /// The `n x n` identity: exact ones on the diagonal.
    pub fn identity(n: usize) -> Self {
        Self::diagonal(&vec![Interval::exact(1.0); n])
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Cell at `(row, col)`. Panics when out of range.
    pub fn get(&self, row: usize, col: usize) -> Interval {
        self.data[[row, col]]
    }

    /// Overwrite the cell at `(row, col)`. Panics when out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Interval) {
        self.data[[row, col]] = value;
    }

    /// Copy of row `row` as a vector.
    pub fn row(&self, row: usize) -> Vector {
        Vector::from_array(self.data.row(row).to_owned())
    }

    /// Copy of column `col` as a vector.
    pub fn column(&self, col: usize) -> Vector {
        Vector::from_array(self.data.column(col).to_owned())
    }

    /// Overwrite row `row` with `cells`. Fails on length mismatch.
    pub fn set_row(&mut self, row: usize, cells: &[Interval]) -> Result<()> {
        if cells.len() != self.cols() {
            return Err(RigorError::dimension_mismatch(
                vec![self.cols()],
                vec![cells.len()],
            ));
        }
        for (c, &cell) in cells.iter().enumerate() {
            self.data[[row, c]] = cell;
        }
        Ok(())
    }

    /// Overwrite column `col` with `cells`. Fails on length mismatch.
    pub fn set_column(&mut self, col: usize, cells: &[Interval]) -> Result<()> {
        if cells.len() != self.rows() {
            return Err(RigorError::dimension_mismatch(
                vec![self.rows()],
                vec![cells.len()],
            ));
        }
        for (r, &cell) in cells.iter().enumerate() {
            self.data[[r, col]] = cell;
        }
        Ok(())
    }

    /// Set every cell of row `row` to `value`.
    pub fn fill_row(&mut self, row: usize, value: Interval) {
        for c in 0..self.cols() {
            self.data[[row, c]] = value;
        }
    }

    /// Set every cell of column `col` to `value`.
    pub fn fill_column(&mut self, col: usize, value: Interval) {
        for r in 0..self.rows() {
            self.data[[r, col]] = value;
        }
    }

    /// Exchange rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        for c in 0..self.cols() {
            self.data.swap([a, c], [b, c]);
        }
    }

    /// Exchange columns `a` and `b` in place.
    pub fn swap_columns(&mut self, a: usize, b: usize) {
        for r in 0..self.rows() {
            self.data.swap([r, a], [r, b]);
        }
    }

    /// Apply a per-cell function across an output grid, dispatching
    /// sequential or parallel on the complexity score. All element-wise
    /// operations funnel through here.
    fn build<F>(rows: usize, cols: usize, complexity: usize, config: &ExecConfig, cell: F) -> Self
    where
        F: Fn(usize, usize) -> Interval + Sync + Send,
    {
        let cells = fill(rows * cols, complexity, config, |i| {
            cell(i / cols, i % cols)
        });
        Self {
            data: Array2::from_shape_vec((rows, cols), cells)
                .expect("cell count matches shape"),
        }
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(RigorError::dimension_mismatch(
                vec![self.rows(), self.cols()],
                vec![other.rows(), other.cols()],
            ));
        }
        Ok(())
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Matrix {
        self.transpose_with(&ExecConfig::ambient())
    }

    /// Transpose under an explicit dispatch configuration.
    pub fn transpose_with(&self, config: &ExecConfig) -> Matrix {
        let (rows, cols) = self.shape();
        Self::build(cols, rows, rows * cols, config, |r, c| self.data[[c, r]])
    }

    /// Scalar-times-matrix: every cell multiplied by `factor`.
    pub fn scale(&self, factor: Interval) -> Matrix {
        self.scale_with(factor, &ExecConfig::ambient())
    }

    /// Scalar multiply under an explicit dispatch configuration.
    pub fn scale_with(&self, factor: Interval, config: &ExecConfig) -> Matrix {
        let (rows, cols) = self.shape();
        Self::build(rows, cols, rows * cols, config, |r, c| {
            self.data[[r, c]] * factor
        })
    }

    /// Element-wise sum. Fails on shape mismatch.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.add_with(other, &ExecConfig::ambient())
    }

    /// Element-wise sum under an explicit dispatch configuration.
    pub fn add_with(&self, other: &Matrix, config: &ExecConfig) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let (rows, cols) = self.shape();
        Ok(Self::build(rows, cols, rows * cols, config, |r, c| {
            self.data[[r, c]] + other.data[[r, c]]
        }))
    }

    /// Element-wise difference. Fails on shape mismatch.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.sub_with(other, &ExecConfig::ambient())
    }

    /// Element-wise difference under an explicit dispatch configuration.
    pub fn sub_with(&self, other: &Matrix, config: &ExecConfig) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let (rows, cols) = self.shape();
        Ok(Self::build(rows, cols, rows * cols, config, |r, c| {
            self.data[[r, c]] - other.data[[r, c]]
        }))
    }

    /// Element-wise negation.
    pub fn neg(&self) -> Matrix {
        self.neg_with(&ExecConfig::ambient())
    }

    /// Negation under an explicit dispatch configuration.
    pub fn neg_with(&self, config: &ExecConfig) -> Matrix {
        let (rows, cols) = self.shape();
        Self::build(rows, cols, rows * cols, config, |r, c| -self.data[[r, c]])
    }

    /// Matrix product. Fails when `self.cols() != other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        self.matmul_with(other, &ExecConfig::ambient())
    }

    /// Matrix product under an explicit dispatch configuration.
    ///
    /// Each output cell is an index-order dot product of a row and a column;
    /// cells are independent, so parallel execution needs no locking, and
    /// the per-cell accumulation order is fixed for reproducibility.
    pub fn matmul_with(&self, other: &Matrix, config: &ExecConfig) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(RigorError::dimension_mismatch(
                vec![self.cols()],
                vec![other.rows()],
            ));
        }
        let (rows, inner) = self.shape();
        let cols = other.cols();
        Ok(Self::build(rows, cols, rows * cols * inner, config, |r, c| {
            (0..inner).fold(Interval::exact(0.0), |acc, k| {
                acc + self.data[[r, k]] * other.data[[k, c]]
            })
        }))
    }

    /// Matrix-times-vector product. Fails when `self.cols() != vector.len()`.
    pub fn mul_vector(&self, vector: &Vector) -> Result<Vector> {
        self.mul_vector_with(vector, &ExecConfig::ambient())
    }

    /// Matrix-times-vector under an explicit dispatch configuration.
    pub fn mul_vector_with(&self, vector: &Vector, config: &ExecConfig) -> Result<Vector> {
        if self.cols() != vector.len() {
            return Err(RigorError::dimension_mismatch(
                vec![self.cols()],
                vec![vector.len()],
            ));
        }
        let (rows, cols) = self.shape();
        let cells = fill(rows, rows * cols, config, |r| {
            (0..cols).fold(Interval::exact(0.0), |acc, k| {
                acc + self.data[[r, k]] * vector[k]
            })
        });
        Ok(Vector::from_intervals(cells))
    }

    /// Squared Frobenius norm: the sum of squared cells.
    pub fn frobenius_norm_squared(&self) -> Interval {
        self.frobenius_norm_squared_with(&ExecConfig::ambient())
    }

    /// Squared Frobenius norm under an explicit dispatch configuration.
    ///
    /// The one true reduction in this crate. In parallel mode each worker
    /// accumulates a private partial sum over its row, and only the merge
    /// into the shared total is serialized, under a mutex: interval addition
    /// is a compound operation, not an atomic primitive, so a lock-free
    /// shared increment would lose updates. Merge order is not
    /// deterministic, so parallel and sequential results agree within
    /// padding tolerance rather than bit-for-bit; this is an accepted
    /// property of the reduction, not a defect.
    pub fn frobenius_norm_squared_with(&self, config: &ExecConfig) -> Interval {
        let (rows, cols) = self.shape();
        if config.should_parallelize(rows * cols) {
            trace!(rows, cols, "frobenius reduction: parallel");
            let total = Mutex::new(Interval::exact(0.0));
            (0..rows).into_par_iter().for_each(|r| {
                let partial = (0..cols).fold(Interval::exact(0.0), |acc, c| {
                    let cell = self.data[[r, c]];
                    acc + cell * cell
                });
                let mut sum = total.lock().expect("frobenius accumulator poisoned");
                *sum = *sum + partial;
            });
            total
                .into_inner()
                .expect("frobenius accumulator poisoned")
        } else {
            trace!(rows, cols, "frobenius reduction: sequential");
            self.data
                .iter()
                .fold(Interval::exact(0.0), |acc, cell| acc + *cell * *cell)
        }
    }

    /// Frobenius norm: square root of the sum of squared cells.
    pub fn frobenius_norm(&self) -> Interval {
        self.frobenius_norm_with(&ExecConfig::ambient())
    }

    /// Frobenius norm under an explicit dispatch configuration.
    pub fn frobenius_norm_with(&self, config: &ExecConfig) -> Interval {
        self.frobenius_norm_squared_with(config).sqrt()
    }
}

impl fmt::Display for Matrix {
    /// Truncated rendering: at most 5x5 cells, with an ellipsis marker for
    /// anything beyond.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_VISIBLE: usize = 5;
        let visible_rows = self.rows().min(MAX_VISIBLE);
        let visible_cols = self.cols().min(MAX_VISIBLE);

        for r in 0..visible_rows {
            write!(f, "[")?;
            for c in 0..visible_cols {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[[r, c]])?;
            }
            if self.cols() > MAX_VISIBLE {
                write!(f, ", …")?;
            }
            writeln!(f, "]")?;
        }
        if self.rows() > MAX_VISIBLE {
            writeln!(f, "…")?;
        }
        Ok(())
    }
}
