//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;
use tsim_collision::CollisionEvent;
use tsim_core::{AgentId, SimTime};
use tsim_schedule::RunResult;
use tsim_sim::SimObserver;
use tsim_world::World;

use crate::row::{CollisionRow, TimeStepRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes collision events and time-step summaries to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:          W,
    slot_removed:    u64,
    slot_collisions: u64,
    last_error:      Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            slot_removed:    0,
            slot_collisions: 0,
            last_error:      None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_collision(&mut self, event: &CollisionEvent) {
        self.slot_collisions += 1;
        let result = self.writer.write_collision(&CollisionRow::from(event));
        self.store_err(result);
    }

    fn on_agents_removed(&mut self, _time: SimTime, removed: &[AgentId]) {
        self.slot_removed += removed.len() as u64;
    }

    fn on_slot_end(&mut self, time: SimTime, executed: usize, world: &World) {
        let row = TimeStepRow {
            time_ms:        time.millis(),
            executed_tasks: executed as u64,
            agents:         world.agent_count() as u64,
            removed_agents: std::mem::take(&mut self.slot_removed),
            collisions:     std::mem::take(&mut self.slot_collisions),
        };
        let result = self.writer.write_time_step(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _time: SimTime, _result: &RunResult) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
