/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

mod util;

pub use error::{AgentError, Result};
pub use util::argmax;
