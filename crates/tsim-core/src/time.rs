//! Simulation time model.
//!
//! # Design
//!
//! Time is an absolute millisecond counter wrapped in `SimTime`.  Durations
//! and relative offsets between schedule slots are plain `i64` milliseconds.
//! Integer milliseconds keep all schedule arithmetic exact: component cycle
//! times, offsets and response times are configured in whole milliseconds
//! and summing relative offsets never drifts.
//!
//! A signed representation is used so that a negative offset can be detected
//! and rejected instead of wrapping silently.

use std::fmt;

/// An absolute simulation time in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Milliseconds as a plain integer.
    #[inline]
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Seconds as a float, for physics formulas.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if `earlier`
    /// is in the future).
    #[inline]
    pub fn since(self, earlier: SimTime) -> i64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<i64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: i64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: SimTime) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
