use thiserror::Error;
use tsim_core::{AgentId, ObjectId};

#[derive(Debug, Error)]
pub enum CollisionError {
    /// Both bodies move with the same velocity; there is no sweep direction.
    #[error("relative velocity is zero, cannot calculate point of contact")]
    ZeroRelativeVelocity,

    #[error("no corner/edge intersection found along the relative velocity")]
    NoContact,

    #[error("invalid world object {0}")]
    InvalidWorldObject(ObjectId),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),
}

pub type CollisionResult<T> = Result<T, CollisionError>;
