pub mod expected_sarsa;
pub mod table;

pub use expected_sarsa::{ExpectedSarsaAgent, ExpectedSarsaAgentConfig};
pub use table::QTable;

/// A trait for state types that can be used as keys in a [`HashMap`](std::collections::HashMap)
pub trait Hashable: Clone + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Clone + Eq + std::hash::Hash {}
