//! `tsim-schedule` — the time-indexed priority scheduler.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`item`]          | `ScheduleItem` (Spawn / Trigger / Update), `TaskPriority`, `ItemPool` |
//! | [`priority_list`] | `PriorityList` — items sharing one absolute time           |
//! | [`policy`]        | `SchedulePolicy` — the relative-offset timeline            |
//! | [`execute`]       | `SchedulePolicy::execute_task` — what each item does       |
//! | [`spawn`]         | `SpawnPoint` trait, `SpawnPointLibrary`, stock spawn points |
//! | [`run_result`]    | `RunResult`, `EndCondition`                                |
//! | [`error`]         | `ScheduleError`, `SpawnError`, `ScheduleResult<T>`         |
//!
//! # Timeline model (summary)
//!
//! ```text
//! now                    +100                 +120
//!  │ list(offset 0)       │ list(offset 100)   │ list(offset 20)
//!  │ [spawn, C1-T, C1-U]  │ [C1-T, C1-U]       │ [C2-U]
//! ```
//!
//! Each `PriorityList` stores its distance to the previous list, so the
//! absolute time of a slot is the prefix sum of offsets.  Inserting an item
//! `n` ms from now walks the chain, and either joins an existing slot,
//! splices a new one in between (shortening the next slot's offset by the
//! same amount), or appends.  Time only advances in
//! [`SchedulePolicy::time_step`], after the current slot is drained.
//!
//! # Driving loop
//!
//! ```rust,ignore
//! policy.init_schedule(start, end, &spawn_points)?;
//! loop {
//!     while let Some(task) = policy.get_task(&mut run_result) {
//!         policy.execute_task(task, &mut world, &mut spawn_points)?;
//!         policy.schedule_task(task)?;
//!     }
//!     if run_result.is_end_condition() || policy.time_step() == 0 {
//!         break;
//!     }
//! }
//! ```

pub mod error;
pub mod execute;
pub mod item;
pub mod policy;
pub mod priority_list;
pub mod run_result;
pub mod spawn;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult, SpawnError};
pub use item::{ItemKind, ItemPool, ScheduleItem, ScheduleItemType, TaskPriority};
pub use policy::SchedulePolicy;
pub use priority_list::PriorityList;
pub use run_result::{EndCondition, RunResult};
pub use spawn::{PeriodicSpawnPoint, ScenarioSpawnPoint, SpawnPoint, SpawnPointLibrary};
