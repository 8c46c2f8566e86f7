//! The `World` — owner of all agents and static objects.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
use tsim_core::{AgentId, ComponentId, ObjectId};

use crate::{
    Agent, AgentBlueprint, ChannelTarget, Component, TrafficObject, WorldError, WorldResult,
};

/// Agent arena, static object registry and deferred removal queue.
///
/// Agents are kept in a `BTreeMap` so every iteration (collision pairs,
/// output snapshots) visits them in ascending `AgentId` order, which keeps
/// runs reproducible.
#[derive(Debug, Default)]
pub struct World {
    agents:         BTreeMap<AgentId, Agent>,
    objects:        BTreeMap<ObjectId, TrafficObject>,
    next_agent_id:  u32,
    next_object_id: u32,
    removal_queue:  BTreeSet<AgentId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Agent factory ─────────────────────────────────────────────────────

    /// Instantiate an agent from `blueprint` and return its new id.
    ///
    /// Validates the channel table: every output link must be registered
    /// once per component and every target must name a component of the
    /// same agent.
    pub fn add_agent(&mut self, blueprint: AgentBlueprint) -> WorldResult<AgentId> {
        let count = blueprint.components.len();
        if ComponentId::try_from(count).is_err() {
            return Err(WorldError::TooManyComponents(count));
        }

        let mut components = Vec::with_capacity(count);
        for (index, spec) in blueprint.components.into_iter().enumerate() {
            // `count` fits a ComponentId, so every smaller index does too.
            let id = ComponentId(index as u16);
            let mut links: BTreeMap<_, Vec<ChannelTarget>> = BTreeMap::new();
            for (link, targets) in &spec.outputs {
                if links.contains_key(link) {
                    return Err(WorldError::DuplicateOutputLink { component: id, link: *link });
                }
                if let Some(bad) = targets.iter().find(|t| t.component.index() >= count) {
                    return Err(WorldError::UnknownTarget {
                        component: id,
                        link:      *link,
                        target:    bad.component,
                    });
                }
                links.insert(*link, targets.clone());
            }
            components.push(Component::new(id, spec, links));
        }

        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        self.agents
            .insert(id, Agent::new(id, blueprint.priority, blueprint.state, components));
        debug!(agent = %id, components = count, "agent added");
        Ok(id)
    }

    // ── Agent queries ─────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// All agents in ascending id order, including agents marked invalid
    /// but not yet removed.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Mutable access to two distinct agents at once.
    ///
    /// Returns `None` if `a == b` or either id is unknown.
    pub fn agent_pair_mut(&mut self, a: AgentId, b: AgentId) -> Option<(&mut Agent, &mut Agent)> {
        if a == b {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut range = self.agents.range_mut(lo..=hi);
        let first = range.next().filter(|(id, _)| **id == lo)?.1;
        let last = range.next_back().filter(|(id, _)| **id == hi)?.1;
        if a < b { Some((first, last)) } else { Some((last, first)) }
    }

    // ── Static objects ────────────────────────────────────────────────────

    /// Register a static object and return its id.
    pub fn add_traffic_object(&mut self, mut object: TrafficObject) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        object.id = id;
        self.objects.insert(id, object);
        id
    }

    pub fn traffic_object(&self, id: ObjectId) -> Option<&TrafficObject> {
        self.objects.get(&id)
    }

    pub fn traffic_objects(&self) -> impl Iterator<Item = &TrafficObject> + '_ {
        self.objects.values()
    }

    pub fn traffic_object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    // ── Deferred removal ──────────────────────────────────────────────────

    /// Request removal of `agent` at the next [`sync_global_data`][Self::sync_global_data].
    ///
    /// Safe to call repeatedly for the same agent.
    pub fn queue_agent_remove(&mut self, agent: AgentId) {
        if self.removal_queue.insert(agent) {
            debug!(%agent, "agent queued for removal");
        }
    }

    pub fn pending_removals(&self) -> usize {
        self.removal_queue.len()
    }

    /// Apply queued removals.  Returns the ids actually removed, ascending.
    pub fn sync_global_data(&mut self) -> Vec<AgentId> {
        let queued = std::mem::take(&mut self.removal_queue);
        queued
            .into_iter()
            .filter(|id| self.agents.remove(id).is_some())
            .collect()
    }
}
