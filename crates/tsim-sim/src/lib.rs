//! `tsim-sim` — run loop orchestrator for the tsim traffic simulation core.
//!
//! # Slot loop
//!
//! ```text
//! init_schedule(start, end)            one spawn item per spawn point
//! loop:
//!   ① Drain   — get_task → execute_task → schedule_task until the slot
//!               at the current time is empty (items added for "now"
//!               during the drain run in the same pass).
//!   ② End?    — time past end_time → EndCondition::TimeOver.
//!   ③ Collide — if now ≥ next detection boundary, run the detector.
//!   ④ Sync    — apply queued agent removals (World::sync_global_data).
//!   ⑤ Step    — time_step(); 0 → EndCondition::ScheduleExhausted.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tsim_core::RunConfig;
//! use tsim_schedule::ScenarioSpawnPoint;
//! use tsim_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(RunConfig::default())
//!     .spawn_point(ScenarioSpawnPoint::new(blueprint))
//!     .build()?;
//! let result = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
