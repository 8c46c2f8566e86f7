//! A simulated traffic participant and its physical state.

use tsim_core::{AgentId, ComponentId, ObjectId, Vector2d};

use crate::{Component, WorldObject};

// ── AgentState ────────────────────────────────────────────────────────────────

/// Physical state of an agent: the part components read and write.
///
/// `valid` turns false when the agent asks to leave the simulation (drove
/// off the network, reached its target, …).  Invalid agents keep their
/// state readable until the world removes them at the next sync point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub position:     Vector2d,
    /// Heading in radians, counter-clockwise from +x.
    pub yaw:          f64,
    /// Longitudinal speed along `yaw` (m/s).
    pub velocity:     f64,
    /// Longitudinal acceleration (m/s²).
    pub acceleration: f64,
    pub length:       f64,
    pub width:        f64,
    pub distance_reference_point_to_leading_edge: f64,
    valid:            bool,
}

impl AgentState {
    /// A valid state whose reference point is the geometric centre.
    pub fn new(position: Vector2d, yaw: f64, velocity: f64, length: f64, width: f64) -> Self {
        Self {
            position,
            yaw,
            velocity,
            acceleration: 0.0,
            length,
            width,
            distance_reference_point_to_leading_edge: length / 2.0,
            valid: true,
        }
    }

    /// Move the reference point: `distance` metres behind the front bumper.
    pub fn with_leading_edge(mut self, distance: f64) -> Self {
        self.distance_reference_point_to_leading_edge = distance;
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Request removal of the agent.  Its remaining schedule items are
    /// dropped the next time one of them comes due.
    pub fn mark_for_removal(&mut self) {
        self.valid = false;
    }
}

impl WorldObject for AgentState {
    fn position(&self) -> Vector2d {
        self.position
    }

    fn yaw(&self) -> f64 {
        self.yaw
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn distance_reference_point_to_leading_edge(&self) -> f64 {
        self.distance_reference_point_to_leading_edge
    }

    fn velocity_vector(&self) -> Vector2d {
        Vector2d::from_yaw(self.yaw) * self.velocity
    }
}

// ── CollisionPartner ──────────────────────────────────────────────────────────

/// Something an agent has already collided with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionPartner {
    Agent(AgentId),
    Object(ObjectId),
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A vehicle or other participant: a physical state plus its component
/// pipeline.  Created by [`World::add_agent`][crate::World::add_agent].
#[derive(Debug)]
pub struct Agent {
    id:                 AgentId,
    priority:           i32,
    state:              AgentState,
    components:         Vec<Component>,
    collision_partners: Vec<CollisionPartner>,
}

impl Agent {
    pub(crate) fn new(
        id:         AgentId,
        priority:   i32,
        state:      AgentState,
        components: Vec<Component>,
    ) -> Self {
        Self {
            id,
            priority,
            state,
            components,
            collision_partners: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Agent-level scheduling priority; lower numbers run first.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AgentState {
        &mut self.state
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index())
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.index())
    }

    /// Split borrow: one component mutably together with the agent state, so
    /// the component's compute step can write the state it belongs to.
    pub fn component_and_state_mut(
        &mut self,
        id: ComponentId,
    ) -> Option<(&mut Component, &mut AgentState)> {
        let component = self.components.get_mut(id.index())?;
        Some((component, &mut self.state))
    }

    pub fn collision_partners(&self) -> &[CollisionPartner] {
        &self.collision_partners
    }

    pub fn has_collision_partner(&self, partner: CollisionPartner) -> bool {
        self.collision_partners.contains(&partner)
    }

    /// Record `partner`; repeated calls for the same partner are ignored.
    pub fn add_collision_partner(&mut self, partner: CollisionPartner) {
        if !self.has_collision_partner(partner) {
            self.collision_partners.push(partner);
        }
    }
}
