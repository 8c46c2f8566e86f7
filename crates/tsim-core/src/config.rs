//! Run configuration.

use crate::{CoreError, CoreResult, SimTime};

/// Default collision detection cycle: every 100 ms of simulated time.
pub const DEFAULT_COLLISION_CYCLE_MS: i64 = 100;

/// Top-level configuration of one simulation run.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and handed to `tsim_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Absolute simulated time of the first schedule slot.
    pub start_time_ms: i64,

    /// Last simulated time that is still executed (inclusive).  The run ends
    /// as soon as the clock moves past it.
    pub end_time_ms: i64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Period of the collision detector in milliseconds.
    pub collision_cycle_ms: i64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_time_ms:      0,
            end_time_ms:        30_000,
            seed:               42,
            collision_cycle_ms: DEFAULT_COLLISION_CYCLE_MS,
        }
    }
}

impl RunConfig {
    #[inline]
    pub fn start_time(&self) -> SimTime {
        SimTime(self.start_time_ms)
    }

    #[inline]
    pub fn end_time(&self) -> SimTime {
        SimTime(self.end_time_ms)
    }

    /// Reject configurations the scheduler cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.end_time_ms < self.start_time_ms {
            return Err(CoreError::Config(format!(
                "end time {} ms lies before start time {} ms",
                self.end_time_ms, self.start_time_ms
            )));
        }
        if self.collision_cycle_ms <= 0 {
            return Err(CoreError::Config(format!(
                "collision cycle must be positive, got {} ms",
                self.collision_cycle_ms
            )));
        }
        Ok(())
    }
}
