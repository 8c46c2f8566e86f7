//! `tsim-world` — agents, component pipelines, and static objects.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`component`] | `Component`, `ComponentModel` trait, `Signal`, `ChannelTarget`, `ComponentSpec` |
//! | [`agent`]     | `Agent`, `AgentState` (the agent adapter), `CollisionPartner`   |
//! | [`object`]    | `WorldObject` query trait, `TrafficObject`                      |
//! | [`builder`]   | `AgentBlueprint` — input to the agent factory                   |
//! | [`world`]     | `World` — agent arena, object registry, deferred removal queue  |
//! | [`error`]     | `WorldError`, `ComponentError`                                  |
//!
//! # Ownership model
//!
//! The `World` owns every `Agent` in a `BTreeMap<AgentId, Agent>`; each agent
//! owns its components in a `Vec` indexed by `ComponentId`.  Everything else
//! (schedule items, collision events) refers to agents and components by id
//! and looks them up on use, so a removed agent can never be reached through a
//! dangling reference.
//!
//! Removal is two-phase.  [`World::queue_agent_remove`] only records the
//! request; [`World::sync_global_data`] applies it at the end of the current
//! time slot, so every observer in the slot sees the same set of agents.

pub mod agent;
pub mod builder;
pub mod component;
pub mod error;
pub mod object;
pub mod world;


pub use agent::{Agent, AgentState, CollisionPartner};
pub use builder::AgentBlueprint;
pub use component::{
    downcast_signal, ChannelTarget, Component, ComponentModel, ComponentSpec, Signal, SignalData,
};
pub use error::{ComponentError, ComponentResult, WorldError, WorldResult};
pub use object::{TrafficObject, WorldObject};
pub use world::World;
