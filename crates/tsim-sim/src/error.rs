use thiserror::Error;
use tsim_collision::CollisionError;
use tsim_core::CoreError;
use tsim_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("collision detection error: {0}")]
    Collision(#[from] CollisionError),
}

pub type SimResult<T> = Result<T, SimError>;
