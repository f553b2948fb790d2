use rand::distributions::WeightedError;
use thiserror::Error;

/// Errors produced by the agent and its exploration policy
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    /// The episode index was `0`, so the decayed exploration rate `1 / i_episode` is undefined
    #[error("division by zero: `i_episode` must be at least 1")]
    DivisionByZero,

    #[error("action {action} is out of range for an action space of size {n_actions}")]
    ActionOutOfRange { action: usize, n_actions: usize },

    #[error("the action space must contain at least one action")]
    NoActions,

    #[error("invalid action probabilities: {0}")]
    InvalidWeights(#[from] WeightedError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
