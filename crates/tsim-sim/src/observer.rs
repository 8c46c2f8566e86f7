//! Simulation observer trait for progress reporting and data collection.

use tsim_collision::CollisionEvent;
use tsim_core::{AgentId, SimTime};
use tsim_schedule::RunResult;
use tsim_world::World;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// slot loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_slot_end(&mut self, time: SimTime, executed: usize, world: &World) {
///         println!("{time}: {executed} tasks, {} agents", world.agent_count());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once after the schedule is initialised.
    fn on_run_start(&mut self, _start: SimTime) {}

    /// Called for each collision event, right after the sweep that found it.
    fn on_collision(&mut self, _event: &CollisionEvent) {}

    /// Called after deferred removals were applied, if any agent left.
    fn on_agents_removed(&mut self, _time: SimTime, _removed: &[AgentId]) {}

    /// Called after each drained slot, with the world as it stands after
    /// collision detection and removal.
    ///
    /// `executed` is the number of tasks executed in the slot.
    fn on_slot_end(&mut self, _time: SimTime, _executed: usize, _world: &World) {}

    /// Called once when the run stops.
    fn on_run_end(&mut self, _time: SimTime, _result: &RunResult) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
