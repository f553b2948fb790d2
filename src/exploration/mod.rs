mod epsilon_greedy;

pub use epsilon_greedy::{action_probabilities, epsilon_greedy_weights, EpsilonGreedy};
