//! The `OutputWriter` trait implemented by backend writers.

use crate::{CollisionRow, OutputResult, TimeStepRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error` once the run is over.
pub trait OutputWriter {
    fn write_collision(&mut self, row: &CollisionRow) -> OutputResult<()>;

    /// Write the summary of one drained time step.
    fn write_time_step(&mut self, row: &TimeStepRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
