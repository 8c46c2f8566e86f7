//! `CollisionDetector` — periodic all-pairs collision sweep.
//!
//! # Order of checks
//!
//! Agent pairs `(a, b)` with `a < b` in ascending id order, then every agent
//! against every static object in ascending object id order.  All geometry
//! is evaluated against the world as it stands at the start of the sweep;
//! partner records and events are applied afterwards in the same order.
//!
//! Agents marked for removal but not yet synced out of the world still take
//! part: they occupy space until `World::sync_global_data` runs.
//!
//! Each pair is reported at most once per run: once two bodies are
//! recorded as collision partners the pair is skipped for good.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tsim_core::config::DEFAULT_COLLISION_CYCLE_MS;
use tsim_core::{AgentId, SimTime};
use tsim_world::{Agent, CollisionPartner, World, WorldObject};

use crate::geometry::broad_phase_reject;
use crate::{
    calculate_point_of_contact, detect_intersection, CollisionError, CollisionEvent, CollisionResult,
    ContactPoint, EventNetwork, EventType, OrientedRect,
};

#[derive(Clone, Debug)]
pub struct CollisionDetector {
    cycle_time:    i64,
    source:        String,
    sequence_name: String,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_COLLISION_CYCLE_MS)
    }
}

/// A pair found colliding during the geometry pass.
struct Detection {
    agent:    AgentId,
    opponent: CollisionPartner,
    contact:  ContactPoint,
}

impl CollisionDetector {
    pub fn new(cycle_time: i64) -> Self {
        CollisionDetector {
            cycle_time,
            source:        "CollisionDetector".to_string(),
            sequence_name: "Collision".to_string(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = name.into();
        self
    }

    pub fn cycle_time(&self) -> i64 {
        self.cycle_time
    }

    /// Run one sweep at `time`.
    ///
    /// Newly colliding pairs are recorded as partners on both agents, and
    /// an event per pair is pushed into `events`.  Returns the new events.
    pub fn trigger(
        &self,
        time: SimTime,
        world: &mut World,
        events: &mut EventNetwork,
    ) -> CollisionResult<Vec<Arc<CollisionEvent>>> {
        let detections = self.detect(world)?;

        let mut emitted = Vec::with_capacity(detections.len());
        for detection in detections {
            let (with_agent, opponent_id) = match detection.opponent {
                CollisionPartner::Agent(other) => {
                    let (a, b) = world
                        .agent_pair_mut(detection.agent, other)
                        .ok_or(CollisionError::AgentNotFound(other))?;
                    a.add_collision_partner(CollisionPartner::Agent(other));
                    b.add_collision_partner(CollisionPartner::Agent(detection.agent));
                    (true, other.0)
                }
                CollisionPartner::Object(object) => {
                    world
                        .agent_mut(detection.agent)
                        .ok_or(CollisionError::AgentNotFound(detection.agent))?
                        .add_collision_partner(CollisionPartner::Object(object));
                    (false, object.0)
                }
            };

            info!(
                %time,
                agent = %detection.agent,
                opponent = ?detection.opponent,
                x = detection.contact.position.x,
                y = detection.contact.position.y,
                "collision detected"
            );
            let event = Arc::new(CollisionEvent {
                time,
                source: self.source.clone(),
                sequence_name: self.sequence_name.clone(),
                event_type: EventType::Collision,
                collision_with_agent: with_agent,
                collision_agent_id: detection.agent.0,
                collision_opponent_id: opponent_id,
                contact: detection.contact,
            });
            events.insert_event(Arc::clone(&event));
            emitted.push(event);
        }
        Ok(emitted)
    }

    /// Geometry pass: every new colliding pair, in reporting order.
    fn detect(&self, world: &World) -> CollisionResult<Vec<Detection>> {
        let agents: Vec<(&Agent, OrientedRect)> = world
            .agents()
            .map(|a| (a, OrientedRect::from_object(a.state())))
            .collect();

        let mut detections = Vec::new();
        for (i, (agent, rect)) in agents.iter().enumerate() {
            for (other, other_rect) in &agents[i + 1..] {
                let partner = CollisionPartner::Agent(other.id());
                if agent.has_collision_partner(partner) {
                    continue;
                }
                if let Some(contact) = check_pair(agent, rect, other.state(), other_rect) {
                    detections.push(Detection { agent: agent.id(), opponent: partner, contact });
                }
            }
        }

        for (agent, rect) in &agents {
            for object_id in world.traffic_object_ids() {
                let object = world
                    .traffic_object(object_id)
                    .ok_or(CollisionError::InvalidWorldObject(object_id))?;
                let partner = CollisionPartner::Object(object_id);
                if agent.has_collision_partner(partner) {
                    continue;
                }
                let object_rect = OrientedRect::from_object(object);
                if let Some(contact) = check_pair(agent, rect, object, &object_rect) {
                    detections.push(Detection { agent: agent.id(), opponent: partner, contact });
                }
            }
        }
        debug!(pairs = detections.len(), "collision sweep done");
        Ok(detections)
    }
}

/// Broad phase, SAT and point of contact for one pair.  `None` if the pair
/// does not collide or the contact cannot be reconstructed this cycle.
fn check_pair(
    agent: &Agent,
    rect: &OrientedRect,
    other: &dyn WorldObject,
    other_rect: &OrientedRect,
) -> Option<ContactPoint> {
    if broad_phase_reject(rect, other_rect) || !detect_intersection(rect, other_rect).colliding {
        return None;
    }
    match calculate_point_of_contact(agent.state(), other) {
        Ok(contact) => Some(contact),
        Err(e) => {
            warn!(agent = %agent.id(), error = %e, "collision without point of contact, skipped");
            None
        }
    }
}

