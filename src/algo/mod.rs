pub mod tabular;

pub use tabular::{ExpectedSarsaAgent, ExpectedSarsaAgentConfig, QTable};
