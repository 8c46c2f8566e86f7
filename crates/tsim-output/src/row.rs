//! Plain data row types written by output backends.

use tsim_collision::CollisionEvent;

/// One collision event, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionRow {
    pub time_ms:                  i64,
    pub source:                   String,
    pub sequence_name:            String,
    pub event_type:               &'static str,
    pub with_agent:               bool,
    pub agent_id:                 u32,
    /// Agent id if `with_agent`, else traffic object id.
    pub opponent_id:              u32,
    pub contact_x:                f64,
    pub contact_y:                f64,
    pub agent_border_distance:    f64,
    pub opponent_border_distance: f64,
}

impl From<&CollisionEvent> for CollisionRow {
    fn from(event: &CollisionEvent) -> Self {
        CollisionRow {
            time_ms:                  event.time.millis(),
            source:                   event.source.clone(),
            sequence_name:            event.sequence_name.clone(),
            event_type:               event.event_type.as_str(),
            with_agent:               event.collision_with_agent,
            agent_id:                 event.collision_agent_id,
            opponent_id:              event.collision_opponent_id,
            contact_x:                event.contact.position.x,
            contact_y:                event.contact.position.y,
            agent_border_distance:    event.contact.agent_border_distance,
            opponent_border_distance: event.contact.opponent_border_distance,
        }
    }
}

/// Summary of one drained time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStepRow {
    pub time_ms:        i64,
    pub executed_tasks: u64,
    /// Agents in the world after removals were applied.
    pub agents:         u64,
    pub removed_agents: u64,
    pub collisions:     u64,
}
