//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Agents, components and schedule
//! items reference each other through these ids rather than through pointers;
//! liveness is always checked by looking the id up in its owning store.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// World-unique agent identifier, assigned by the agent factory in
    /// spawn order and never reused within a run.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a component inside its owning agent's pipeline.
    pub struct ComponentId(u16);
}

typed_id! {
    /// Local link number of a component's input or output slot.
    pub struct LinkId(u16);
}

typed_id! {
    /// Identifier of a static traffic object (barrier, parked vehicle, …).
    pub struct ObjectId(u32);
}

typed_id! {
    /// Index of a spawn point in the spawn point library.
    pub struct SpawnPointId(u16);
}

typed_id! {
    /// Handle of a schedule item in the scheduler's item pool.
    ///
    /// Task ids are handed out monotonically and never reused, so a stale
    /// handle can never alias a newer item.
    pub struct TaskId(u64);
}
