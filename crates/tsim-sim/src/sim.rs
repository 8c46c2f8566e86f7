//! The `Sim` struct and its slot loop.

use tracing::{debug, info};
use tsim_collision::{CollisionDetector, EventNetwork};
use tsim_core::{AgentId, RunConfig, SimTime};
use tsim_schedule::{EndCondition, RunResult, SchedulePolicy, SpawnPointLibrary};
use tsim_world::World;

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim` owns the world, the schedule and the collision detector, and
/// drives the slot loop:
///
/// 1. **Drain**: execute every task due at the current time, in priority
///    order, re-scheduling each one after it ran.
/// 2. **Collide**: on every collision cycle boundary, sweep all pairs.
/// 3. **Sync**: remove agents that were queued for removal this slot.
/// 4. **Step**: advance to the next populated slot.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration (start/end time, seed, collision cycle).
    pub config: RunConfig,

    /// Agents and static objects.
    pub world: World,

    /// The relative-offset timeline of schedule items.
    pub schedule: SchedulePolicy,

    /// Spawn points polled by the schedule's spawn items.
    pub spawn_points: SpawnPointLibrary,

    pub detector: CollisionDetector,

    /// Every collision event emitted so far, in emission order.
    pub events: EventNetwork,

    pub(crate) next_detection: SimTime,
    pub(crate) run_result:     RunResult,
    pub(crate) started:        bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the start time until the end time passes or the schedule
    /// runs dry.
    ///
    /// Calls observer hooks at every slot boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunResult> {
        while self.step(observer)? {}
        Ok(self.run_result.clone())
    }

    /// Process exactly one slot.  Returns `false` once the run has ended.
    ///
    /// The first call initialises the schedule.  Useful for tests and
    /// incremental stepping.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        if !self.started {
            self.start(observer)?;
        }
        if self.run_result.is_end_condition() {
            return Ok(false);
        }

        let now = self.schedule.time_current();
        let executed = self.drain_slot()?;
        if self.run_result.is_end_condition() {
            self.finish(observer);
            return Ok(false);
        }

        if now >= self.next_detection {
            self.detect_collisions(now, observer)?;
        }

        let removed = self.world.sync_global_data();
        if !removed.is_empty() {
            debug!(time = %now, count = removed.len(), "agents removed");
            observer.on_agents_removed(now, &removed);
        }
        observer.on_slot_end(now, executed, &self.world);

        if self.schedule.time_step() == 0 && self.schedule.is_exhausted() {
            self.run_result.set_end_condition(EndCondition::ScheduleExhausted);
            self.finish(observer);
            return Ok(false);
        }
        Ok(true)
    }

    /// Result so far; complete once [`run`][Self::run] returned.
    pub fn run_result(&self) -> &RunResult {
        &self.run_result
    }

    pub fn time_current(&self) -> SimTime {
        self.schedule.time_current()
    }

    // ── Slot processing ───────────────────────────────────────────────────

    fn start<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let (start, end) = (self.config.start_time(), self.config.end_time());
        self.schedule.init_schedule(start, end, &self.spawn_points)?;
        self.run_result = RunResult::new();
        self.next_detection = start;
        self.started = true;
        info!(%start, %end, seed = self.config.seed, spawn_points = self.spawn_points.len(), "run started");
        observer.on_run_start(start);
        Ok(())
    }

    /// Execute every task due now.  Returns the number executed.
    fn drain_slot(&mut self) -> SimResult<usize> {
        let mut executed = 0;
        while let Some(task) = self.schedule.get_task(&mut self.run_result) {
            self.schedule
                .execute_task(task, &mut self.world, &mut self.spawn_points)?;
            self.schedule.schedule_task(task)?;
            executed += 1;
        }
        Ok(executed)
    }

    fn detect_collisions<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        let events = self.detector.trigger(now, &mut self.world, &mut self.events)?;
        for event in &events {
            self.run_result.add_collision(AgentId(event.collision_agent_id));
            if event.collision_with_agent {
                self.run_result.add_collision(AgentId(event.collision_opponent_id));
            }
            observer.on_collision(event);
        }

        // Next multiple of the cycle after `now`, counted from the start.
        let cycle = self.detector.cycle_time();
        let elapsed = now.since(self.config.start_time());
        self.next_detection = self.config.start_time() + (elapsed / cycle + 1) * cycle;
        Ok(())
    }

    fn finish<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.schedule.time_current();
        info!(
            time = %now,
            end_condition = ?self.run_result.end_condition(),
            agents = self.world.agent_count(),
            collisions = self.events.len(),
            "run finished"
        );
        observer.on_run_end(now, &self.run_result);
    }
}
