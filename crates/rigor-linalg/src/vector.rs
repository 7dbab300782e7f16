//! 1-D vectors of intervals.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use rigor_core::{Interval, Result, RigorError};

use crate::exec::{fill, ExecConfig};

/// A fixed-length sequence of [`Interval`] elements.
///
/// Constructed once from interval data (taking ownership of the buffer: the
/// caller must not retain an alias) or synthesized from scalars via the
/// explicit [`Vector::exact`] / [`Vector::measured`] factories. The length is
/// immutable after construction; derived norms are computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Array1<Interval>,
}

impl Vector {
    /// Create a vector over an existing interval array, taking ownership.
    pub fn from_array(data: Array1<Interval>) -> Self {
        Self { data }
    }

    /// Create a vector from interval elements, taking ownership.
    pub fn from_intervals(data: Vec<Interval>) -> Self {
        Self {
            data: Array1::from_vec(data),
        }
    }

    /// Vector of exact zero points.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: Array1::from_elem(len, Interval::exact(0.0)),
        }
    }

    /// Synthesize from scalars treated as true mathematical points.
    pub fn exact(values: &[f64]) -> Self {
        Self {
            data: values.iter().map(|&v| Interval::exact(v)).collect(),
        }
    }

    /// Synthesize from scalars treated as measured (already-rounded) values,
    /// each padded by one ulp per side.
    pub fn measured(values: &[f64]) -> Self {
        Self {
            data: values.iter().map(|&v| Interval::measured(v)).collect(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at `index`. Panics when out of range.
    pub fn get(&self, index: usize) -> Interval {
        self.data[index]
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.data.iter()
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(RigorError::dimension_mismatch(
                vec![self.len()],
                vec![other.len()],
            ));
        }
        Ok(())
    }

    /// Element-wise sum. Fails on length mismatch.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.add_with(other, &ExecConfig::ambient())
    }

    /// Element-wise sum under an explicit dispatch configuration.
    pub fn add_with(&self, other: &Vector, config: &ExecConfig) -> Result<Vector> {
        self.check_len(other)?;
        let cells = fill(self.len(), self.len(), config, |i| {
            self.data[i] + other.data[i]
        });
        Ok(Vector::from_intervals(cells))
    }

    /// Element-wise difference. Fails on length mismatch.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.sub_with(other, &ExecConfig::ambient())
    }

    /// Element-wise difference under an explicit dispatch configuration.
    pub fn sub_with(&self, other: &Vector, config: &ExecConfig) -> Result<Vector> {
        self.check_len(other)?;
        let cells = fill(self.len(), self.len(), config, |i| {
            self.data[i] - other.data[i]
        });
        Ok(Vector::from_intervals(cells))
    }

    /// Scalar-times-vector: every element multiplied by `factor`.
    pub fn scale(&self, factor: Interval) -> Vector {
        self.scale_with(factor, &ExecConfig::ambient())
    }

    /// Scalar multiply under an explicit dispatch configuration.
    pub fn scale_with(&self, factor: Interval, config: &ExecConfig) -> Vector {
        let cells = fill(self.len(), self.len(), config, |i| self.data[i] * factor);
        Vector::from_intervals(cells)
    }

    /// Dot product, accumulated strictly in index order.
    ///
    /// Interval summation is not associative under outward rounding, so the
    /// accumulation order is part of the contract: it is always sequential,
    /// never parallelized, to keep results reproducible.
    pub fn dot(&self, other: &Vector) -> Result<Interval> {
        self.check_len(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(Interval::exact(0.0), |acc, (a, b)| acc + *a * *b))
    }

    /// Squared Euclidean norm: the self dot product.
    pub fn norm_squared(&self) -> Interval {
        self.data
            .iter()
            .fold(Interval::exact(0.0), |acc, a| acc + *a * *a)
    }

    /// Euclidean norm: square root of the squared norm.
    pub fn norm(&self) -> Interval {
        self.norm_squared().sqrt()
    }
}

impl Index<usize> for Vector {
    type Output = Interval;

    fn index(&self, index: usize) -> &Interval {
        &self.data[index]
    }
}

impl fmt::Display for Vector {
    /// Parenthesized comma list: `(a, b, c)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, cell) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, ")")
    }
}
