use thiserror::Error;
use tsim_core::{AgentId, ComponentId, LinkId};

/// Errors raised while building or querying the world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("component {component} registers output link {link} twice")]
    DuplicateOutputLink {
        component: ComponentId,
        link:      LinkId,
    },

    #[error("component {component} link {link} targets unknown component {target}")]
    UnknownTarget {
        component: ComponentId,
        link:      LinkId,
        target:    ComponentId,
    },

    #[error("agent has {0} components, more than a ComponentId can address")]
    TooManyComponents(usize),
}

pub type WorldResult<T> = Result<T, WorldError>;

/// Errors a component reports from its compute step or its link handlers.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("component failed: {0}")]
    Failed(String),

    #[error("unknown link {0}")]
    UnknownLink(LinkId),

    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    #[error("signal on link {link} is not a {expected}")]
    UnexpectedSignal {
        link:     LinkId,
        expected: &'static str,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;
