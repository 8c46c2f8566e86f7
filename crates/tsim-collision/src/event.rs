use std::fmt;
use std::sync::Arc;

use tsim_core::SimTime;

use crate::ContactPoint;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    Collision,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Collision => "Collision",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected collision.  Created once per pair and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionEvent {
    pub time:                  SimTime,
    pub source:                String,
    pub sequence_name:         String,
    pub event_type:            EventType,
    /// `false` when the opponent is a static traffic object.
    pub collision_with_agent:  bool,
    pub collision_agent_id:    u32,
    /// An `AgentId` or an `ObjectId`, depending on `collision_with_agent`.
    pub collision_opponent_id: u32,
    pub contact:               ContactPoint,
}

/// Sink for events produced during a run, in emission order.
#[derive(Debug, Default)]
pub struct EventNetwork {
    events: Vec<Arc<CollisionEvent>>,
}

impl EventNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_event(&mut self, event: Arc<CollisionEvent>) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Arc<CollisionEvent>] {
        &self.events
    }

    /// Events emitted at or after `time`.
    pub fn events_since(&self, time: SimTime) -> impl Iterator<Item = &Arc<CollisionEvent>> + '_ {
        self.events.iter().filter(move |e| e.time >= time)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
