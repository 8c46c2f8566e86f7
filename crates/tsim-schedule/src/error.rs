use thiserror::Error;
use tsim_core::{AgentId, ComponentId, SpawnPointId, TaskId};
use tsim_world::{ComponentError, WorldError};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("task {0} is not in the item pool")]
    UnknownTask(TaskId),

    #[error("cannot schedule task {task} at negative offset {offset} ms")]
    NegativeOffset { task: TaskId, offset: i64 },

    #[error("subtracting {amount} ms from relative offset {offset} ms would make it negative")]
    OffsetUnderflow { offset: i64, amount: i64 },

    #[error("priority list is empty")]
    EmptyList,

    #[error("agent {agent} component {component} has non-positive cycle time {cycle_time} ms")]
    InvalidCycleTime {
        agent:      AgentId,
        component:  ComponentId,
        cycle_time: i64,
    },

    #[error("spawn point {0} re-spawns with zero delay")]
    ZeroRespawnDelay(SpawnPointId),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {agent} has no component {component}")]
    UnknownComponent {
        agent:     AgentId,
        component: ComponentId,
    },

    #[error("{0} spawn points exceed what a SpawnPointId can address")]
    TooManySpawnPoints(usize),

    #[error("spawn point {0} is not in the library")]
    UnknownSpawnPoint(SpawnPointId),

    #[error("agent {agent} component {component} failed: {source}")]
    Execution {
        agent:     AgentId,
        component: ComponentId,
        #[source]
        source:    ComponentError,
    },

    #[error("spawn point {point} failed: {source}")]
    Spawn {
        point:  SpawnPointId,
        #[source]
        source: SpawnError,
    },

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Failure reported by a [`SpawnPoint`][crate::SpawnPoint] while sampling.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("sampling failed: {0}")]
    Sampling(String),
}
