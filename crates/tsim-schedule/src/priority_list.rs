use std::cmp::Ordering;
use std::collections::VecDeque;

use tsim_core::TaskId;

use crate::{ItemPool, ScheduleError, ScheduleResult};

/// All items due at the same absolute time, in execution order.
///
/// `relative_offset` is the distance in ms to the previous list on the
/// timeline (or to the current time, for the front list).
#[derive(Debug, Clone, Default)]
pub struct PriorityList {
    relative_offset: i64,
    items:           VecDeque<TaskId>,
}

impl PriorityList {
    pub fn new(relative_offset: i64) -> Self {
        PriorityList { relative_offset, items: VecDeque::new() }
    }

    pub fn relative_offset(&self) -> i64 {
        self.relative_offset
    }

    /// Insert `task` before the first queued item it outranks, or at the
    /// back.  Items of equal priority keep insertion order.
    pub fn insert_schedule_item(&mut self, task: TaskId, pool: &ItemPool) -> ScheduleResult<()> {
        let item = pool.get(task).ok_or(ScheduleError::UnknownTask(task))?;
        let position = self.items.iter().position(|queued| {
            pool.get(*queued)
                .is_some_and(|other| item.compare_priority(other) == Ordering::Less)
        });
        match position {
            Some(index) => self.items.insert(index, task),
            None => self.items.push_back(task),
        }
        Ok(())
    }

    pub fn remove_next_task(&mut self) -> ScheduleResult<TaskId> {
        self.items.pop_front().ok_or(ScheduleError::EmptyList)
    }

    pub fn subtract_relative_offset(&mut self, amount: i64) -> ScheduleResult<()> {
        if amount > self.relative_offset {
            return Err(ScheduleError::OffsetUnderflow { offset: self.relative_offset, amount });
        }
        self.relative_offset -= amount;
        Ok(())
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.items.contains(&task)
    }

    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
