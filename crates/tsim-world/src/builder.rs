//! Fluent description of a new agent, consumed by the agent factory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tsim_core::{ComponentId, LinkId, Vector2d};
//! use tsim_world::{AgentBlueprint, AgentState, ChannelTarget, ComponentSpec, World};
//!
//! let blueprint = AgentBlueprint::new(AgentState::new(Vector2d::ZERO, 0.0, 20.0, 4.5, 1.8))
//!     .priority(0)
//!     .component(
//!         ComponentSpec::new("sensor", Sensor::default())
//!             .priority(1)
//!             .output(LinkId(0), vec![ChannelTarget::new(ComponentId(1), LinkId(0))]),
//!     )
//!     .component(ComponentSpec::new("driver", Driver::default()).priority(2));
//!
//! let id = world.add_agent(blueprint)?;
//! ```
//!
//! Components are numbered in the order they are added: the first is
//! `ComponentId(0)`.  Channel targets refer to those numbers.

use crate::{AgentState, ComponentSpec};

/// Everything the agent factory needs to instantiate one agent.
pub struct AgentBlueprint {
    pub(crate) priority:   i32,
    pub(crate) state:      AgentState,
    pub(crate) components: Vec<ComponentSpec>,
}

impl AgentBlueprint {
    /// An agent with priority 0 and no components.
    pub fn new(state: AgentState) -> Self {
        Self {
            priority: 0,
            state,
            components: Vec::new(),
        }
    }

    /// Agent-level scheduling priority; lower numbers run first when two
    /// agents' components share a component priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Append a pipeline stage.
    pub fn component(mut self, spec: ComponentSpec) -> Self {
        self.components.push(spec);
        self
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
