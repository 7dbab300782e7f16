//! Complexity-gated sequential/parallel dispatch for bulk element-wise work.
//!
//! Scheduling is fork-join only: an operation either runs as a plain
//! sequential loop or as a blocking rayon parallel-for; there is no
//! asynchronous mode, no cancellation, and no timeouts. A worker panic
//! propagates to the caller at the join point as one aggregate failure.
//!
//! The decision is made per call by comparing the operation's complexity
//! score against an [`ExecConfig`]. Operator-style entry points default to
//! [`ExecConfig::ambient`], which reads two process-wide settable values;
//! concurrent mutation of those values only affects which strategy is
//! picked, never the result of a per-cell-independent operation.

use rayon::prelude::*;
use rigor_core::Interval;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::trace;

/// Default complexity above which bulk operations run in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

static AMBIENT_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);
static AMBIENT_PARALLEL: AtomicBool = AtomicBool::new(true);

/// Set the process-wide parallel-execution complexity threshold.
pub fn set_ambient_threshold(threshold: usize) {
    AMBIENT_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Read the process-wide parallel-execution complexity threshold.
pub fn ambient_threshold() -> usize {
    AMBIENT_THRESHOLD.load(Ordering::Relaxed)
}

/// Enable or disable parallel execution process-wide.
pub fn set_ambient_parallel(enabled: bool) {
    AMBIENT_PARALLEL.store(enabled, Ordering::Relaxed);
}

/// Whether parallel execution is enabled process-wide.
pub fn ambient_parallel() -> bool {
    AMBIENT_PARALLEL.load(Ordering::Relaxed)
}

/// Configuration for the sequential/parallel dispatch decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    /// Complexity score above which an operation runs in parallel.
    pub parallel_threshold: usize,

    /// Master switch; when false every operation runs sequentially.
    pub parallel_enabled: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            parallel_enabled: true,
        }
    }
}

impl ExecConfig {
    /// Snapshot of the process-wide ambient configuration.
    ///
    /// Read fresh on every dispatch decision; the operator-style container
    /// entry points call this at the outermost boundary.
    pub fn ambient() -> Self {
        Self {
            parallel_threshold: ambient_threshold(),
            parallel_enabled: ambient_parallel(),
        }
    }

    /// A configuration that always runs sequentially.
    pub fn sequential() -> Self {
        Self {
            parallel_enabled: false,
            ..Self::default()
        }
    }

    /// A configuration that parallelizes any non-empty operation.
    pub fn always_parallel() -> Self {
        Self {
            parallel_threshold: 0,
            parallel_enabled: true,
        }
    }

    /// Whether an operation of the given complexity should run in parallel.
    #[inline]
    pub fn should_parallelize(&self, complexity: usize) -> bool {
        self.parallel_enabled && complexity > self.parallel_threshold
    }
}

/// Fill `len` result cells from an index-wise cell function, sequentially or
/// with a blocking parallel-for depending on `complexity`.
///
/// Each worker index writes only its own cell of the freshly-collected
/// result, so no synchronization is needed; reductions with a shared
/// accumulator do not go through here.
pub(crate) fn fill<F>(len: usize, complexity: usize, config: &ExecConfig, cell: F) -> Vec<Interval>
where
    F: Fn(usize) -> Interval + Sync + Send,
{
    if config.should_parallelize(complexity) {
        trace!(len, complexity, "element-wise fill: parallel");
        (0..len).into_par_iter().map(cell).collect()
    } else {
        trace!(len, complexity, "element-wise fill: sequential");
        (0..len).map(cell).collect()
    }
}

/// Serializes tests that mutate the ambient configuration, which is shared
/// process state while the test harness runs in parallel.
#[cfg(test)]
pub(crate) static AMBIENT_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
