//! Core types for rigor validated numerics.
//!
//! This crate provides the scalar building block of validated computation:
//! the [`Interval`] type, whose arithmetic is outward-rounded so that every
//! result is guaranteed to contain the true mathematical value despite
//! finite-precision floating point. The rounding slack is derived from the
//! IEEE-754 bit layout by the [`ulp`] module.

use thiserror::Error;

pub mod functions;
pub mod interval;
pub mod ulp;

pub use interval::Interval;
pub use ulp::{step_down, step_up, ulp};

/// Error types for rigor operations.
#[derive(Debug, Error)]
pub enum RigorError {
    /// An interval was constructed with its lower bound above its upper bound.
    #[error("invalid bounds: lower {lower} > upper {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    /// A vector or matrix binary operation received incompatible shapes.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
}

impl RigorError {
    /// Create a DimensionMismatch error, panicking if shapes are identical
    /// (bug indicator in the calling code).
    #[track_caller]
    pub fn dimension_mismatch(expected: Vec<usize>, got: Vec<usize>) -> Self {
        if expected == got {
            let loc = std::panic::Location::caller();
            panic!(
                "BUG at {}:{}:{}: DimensionMismatch created with identical shapes: {:?}",
                loc.file(),
                loc.line(),
                loc.column(),
                expected
            );
        }
        RigorError::DimensionMismatch { expected, got }
    }
}

pub type Result<T> = std::result::Result<T, RigorError>;
