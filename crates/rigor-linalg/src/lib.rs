//! Interval vector and matrix algebra for rigor validated numerics.
//!
//! Containers in this crate hold [`Interval`] elements and reuse the
//! outward-rounded scalar arithmetic of `rigor-core` element-wise. Bulk
//! element-wise work is routed through a complexity-gated dispatcher
//! ([`exec`]) that picks a sequential loop or a blocking fork-join
//! parallel-for per call.

pub mod exec;
pub mod matrix;
pub mod vector;

pub use exec::{
    ambient_parallel, ambient_threshold, set_ambient_parallel, set_ambient_threshold, ExecConfig,
    DEFAULT_PARALLEL_THRESHOLD,
};
pub use matrix::Matrix;
pub use vector::Vector;

// Re-export the scalar layer for downstream use.
pub use rigor_core::{Interval, Result, RigorError};
