use std::collections::BTreeSet;

use tsim_core::AgentId;

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndCondition {
    /// Current time passed the configured end time.
    TimeOver,
    /// Nothing left on the timeline.
    ScheduleExhausted,
}

/// Outcome of a run, filled in while it executes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    end_condition:    Option<EndCondition>,
    collision_agents: BTreeSet<AgentId>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the end condition.  The first one set wins.
    pub fn set_end_condition(&mut self, condition: EndCondition) {
        self.end_condition.get_or_insert(condition);
    }

    pub fn end_condition(&self) -> Option<EndCondition> {
        self.end_condition
    }

    pub fn is_end_condition(&self) -> bool {
        self.end_condition.is_some()
    }

    pub fn add_collision(&mut self, agent: AgentId) {
        self.collision_agents.insert(agent);
    }

    pub fn has_collision(&self) -> bool {
        !self.collision_agents.is_empty()
    }

    /// Agents involved in at least one collision, ascending.
    pub fn collision_agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.collision_agents.iter().copied()
    }
}
