//! `SchedulePolicy` — the relative-offset timeline.
//!
//! # Invariants
//!
//! - The front list's offset is measured from `current_time`; every later
//!   list's offset from the list before it.  All offsets are `>= 0`.
//! - Time only moves forward, and only in [`SchedulePolicy::time_step`].
//! - [`SchedulePolicy::get_task`] never returns an invalid item.  Invalid
//!   items are released from the pool as they are dequeued.

use std::collections::VecDeque;

use tracing::{debug, trace};
use tsim_core::{AgentId, SimTime, TaskId};
use tsim_world::Agent;

use crate::{
    EndCondition, ItemKind, ItemPool, PriorityList, RunResult, ScheduleError, ScheduleItem, ScheduleResult,
    SpawnPointLibrary,
};

#[derive(Debug, Default)]
pub struct SchedulePolicy {
    pub(crate) start_time:   SimTime,
    pub(crate) end_time:     SimTime,
    pub(crate) current_time: SimTime,
    pub(crate) lists:        VecDeque<PriorityList>,
    pub(crate) pool:         ItemPool,
}

impl SchedulePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Reset the timeline to `start` and queue one spawn item per spawn
    /// point in the library, all due immediately.
    pub fn init_schedule(
        &mut self,
        start: SimTime,
        end: SimTime,
        spawn_points: &SpawnPointLibrary,
    ) -> ScheduleResult<()> {
        self.clear_tasks();
        self.start_time = start;
        self.end_time = end;
        self.current_time = start;

        for point in spawn_points.ids() {
            if let Err(e) = self.enqueue(ScheduleItem::spawn(point), 0) {
                self.clear_tasks();
                return Err(e);
            }
        }
        debug!(%start, %end, spawn_points = spawn_points.len(), "schedule initialised");
        Ok(())
    }

    /// Queue a trigger and an update item for every component of `agent`.
    ///
    /// Init components trigger immediately.  Cyclic components trigger
    /// `elapsed mod cycle_time + offset_time` ms from now, where `elapsed`
    /// is the time since the run start; their update follows
    /// `response_time` later.
    pub fn spawn_agent(&mut self, agent: &Agent) -> ScheduleResult<()> {
        let elapsed = self.current_time.since(self.start_time);

        for component in agent.components() {
            let trigger_offset = if component.is_init() {
                0
            } else {
                let cycle = component.cycle_time();
                if cycle <= 0 {
                    return Err(ScheduleError::InvalidCycleTime {
                        agent:      agent.id(),
                        component:  component.id(),
                        cycle_time: cycle,
                    });
                }
                elapsed.rem_euclid(cycle) + component.offset_time()
            };
            let update_offset = trigger_offset + component.response_time();

            self.enqueue(ScheduleItem::trigger(agent.id(), agent.priority(), component), trigger_offset)?;
            self.enqueue(ScheduleItem::update(agent.id(), agent.priority(), component), update_offset)?;
        }
        debug!(agent = %agent.id(), components = agent.components().len(), "agent scheduled");
        Ok(())
    }

    /// Invalidate every queued item of `agent`.  The items are dropped
    /// lazily when they reach the front of the timeline.
    pub fn remove_from_schedule(&mut self, agent: AgentId) {
        let count = self.pool.invalidate_agent(agent);
        debug!(%agent, items = count, "agent removed from schedule");
    }

    pub fn clear_tasks(&mut self) {
        self.lists.clear();
        self.pool.clear();
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Next valid item due at `current_time`, if any.
    ///
    /// Sets [`EndCondition::TimeOver`] and returns `None` once the current
    /// time is past the end time.
    pub fn get_task(&mut self, run_result: &mut RunResult) -> Option<TaskId> {
        if self.current_time > self.end_time {
            run_result.set_end_condition(EndCondition::TimeOver);
            return None;
        }

        loop {
            let front = self.lists.front_mut()?;
            if front.relative_offset() != 0 {
                return None;
            }
            let task = front.remove_next_task().ok()?;
            if self.pool.get(task).is_some_and(ScheduleItem::is_valid) {
                trace!(%task, time = %self.current_time, "task dequeued");
                return Some(task);
            }
            self.pool.release(task);
        }
    }

    /// Re-queue `task` after execution, or release it if it is finished.
    pub fn schedule_task(&mut self, task: TaskId) -> ScheduleResult<()> {
        let item = self.pool.get_mut(task).ok_or(ScheduleError::UnknownTask(task))?;
        let next = if item.is_valid() { item.next_time() } else { -1 };
        let (valid, kind) = (item.is_valid(), item.kind());

        if !valid {
            self.pool.release(task);
            return Ok(());
        }
        if let (0, ItemKind::Spawn { point }) = (next, kind) {
            return Err(ScheduleError::ZeroRespawnDelay(point));
        }
        self.insert_schedule_item(task, next)
    }

    /// Drop the drained front list and advance `current_time` to the next
    /// populated slot.  Returns the number of ms advanced.
    ///
    /// Call only after [`get_task`][Self::get_task] returned `None`.  A
    /// front slot that still holds tasks is not advanced past and also
    /// yields `0`; use [`is_exhausted`][Self::is_exhausted] to tell that
    /// apart from an empty timeline.
    pub fn time_step(&mut self) -> i64 {
        while self.lists.front().is_some_and(PriorityList::is_empty) {
            self.lists.pop_front();
        }
        let Some(front) = self.lists.front_mut() else {
            return 0;
        };
        let delta = front.relative_offset();
        // Subtracting the list's own offset cannot underflow.
        let _ = front.subtract_relative_offset(delta);
        self.current_time += delta;
        trace!(time = %self.current_time, delta, "time step");
        delta
    }

    // ── Timeline insertion ────────────────────────────────────────────────

    /// Place `task` on the timeline `offset` ms after `current_time`.
    ///
    /// Joins the list already at that time, splices a new list in before
    /// the first list that lies further out, or appends a new list.
    pub fn insert_schedule_item(&mut self, task: TaskId, offset: i64) -> ScheduleResult<()> {
        if offset < 0 {
            return Err(ScheduleError::NegativeOffset { task, offset });
        }
        if self.pool.get(task).is_none() {
            return Err(ScheduleError::UnknownTask(task));
        }

        let mut remaining = offset;
        for index in 0..self.lists.len() {
            let list_offset = self.lists[index].relative_offset();
            if remaining == list_offset {
                return self.lists[index].insert_schedule_item(task, &self.pool);
            }
            if remaining < list_offset {
                self.lists[index].subtract_relative_offset(remaining)?;
                let mut list = PriorityList::new(remaining);
                list.insert_schedule_item(task, &self.pool)?;
                self.lists.insert(index, list);
                return Ok(());
            }
            remaining -= list_offset;
        }

        let mut list = PriorityList::new(remaining);
        list.insert_schedule_item(task, &self.pool)?;
        self.lists.push_back(list);
        Ok(())
    }

    /// Pool an item and place it on the timeline; the item is released
    /// again if placement fails.
    fn enqueue(&mut self, item: ScheduleItem, offset: i64) -> ScheduleResult<TaskId> {
        let task = self.pool.insert(item);
        if let Err(e) = self.insert_schedule_item(task, offset) {
            self.pool.release(task);
            return Err(e);
        }
        Ok(task)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn start_time(&self) -> SimTime {
        self.start_time
    }

    pub fn end_time(&self) -> SimTime {
        self.end_time
    }

    pub fn time_current(&self) -> SimTime {
        self.current_time
    }

    pub fn item(&self, task: TaskId) -> Option<&ScheduleItem> {
        self.pool.get(task)
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    /// Absolute time at which `task` is queued, if it is on the timeline.
    pub fn scheduled_time(&self, task: TaskId) -> Option<SimTime> {
        let mut time = self.current_time;
        for list in &self.lists {
            time += list.relative_offset();
            if list.contains(task) {
                return Some(time);
            }
        }
        None
    }

    /// Relative offsets of all lists, front to back.
    pub fn slot_offsets(&self) -> Vec<i64> {
        self.lists.iter().map(PriorityList::relative_offset).collect()
    }

    pub fn slot_count(&self) -> usize {
        self.lists.len()
    }

    /// `true` once no slot holds a task.
    pub fn is_exhausted(&self) -> bool {
        self.lists.iter().all(PriorityList::is_empty)
    }

    /// Queued tasks of the list at `slot`, in execution order.
    pub fn slot_tasks(&self, slot: usize) -> Vec<TaskId> {
        self.lists.get(slot).map(|l| l.tasks().collect()).unwrap_or_default()
    }

    /// Number of queued items, valid or not.
    pub fn pending_tasks(&self) -> usize {
        self.lists.iter().map(PriorityList::len).sum()
    }
}
