//! `tsim-core` — foundational types for the `tsim` traffic simulation core.
//!
//! This crate is a dependency of every other `tsim-*` crate.  It has no
//! `tsim-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ComponentId`, `LinkId`, `ObjectId`, `SpawnPointId`, `TaskId` |
//! | [`geometry`]    | `Vector2d` (rotate / translate / dot / length)              |
//! | [`time`]        | `SimTime` (milliseconds)                                    |
//! | [`config`]      | `RunConfig`                                                 |
//! | [`rng`]         | `SimRng`                                                    |
//! | [`error`]       | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use error::{CoreError, CoreResult};
pub use geometry::Vector2d;
pub use ids::{AgentId, ComponentId, LinkId, ObjectId, SpawnPointId, TaskId};
pub use rng::SimRng;
pub use time::SimTime;
