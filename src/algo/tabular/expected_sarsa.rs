use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    decay,
    error::{AgentError, Result},
    exploration::{epsilon_greedy_weights, EpsilonGreedy},
    util::argmax,
};

use super::{Hashable, QTable};

/// Configuration for the [`ExpectedSarsaAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedSarsaAgentConfig {
    /// Size of the action space
    ///
    /// **Default**: `6`
    pub n_actions: usize,
    /// Base exploration rate used for the non-greedy mass of the target policy in
    /// [`step`](ExpectedSarsaAgent::step). Action selection ignores it and decays as `1 / i_episode`.
    ///
    /// **Default**: `0.004`
    pub epsilon: f32,
    /// Learning rate, should be in `(0, 1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// Discount factor, should be in `[0, 1]`
    ///
    /// **Default**: `1.0`
    pub gamma: f32,
    /// Accepted for compatibility with existing training scripts, never read
    ///
    /// **Default**: `400`
    pub divisor: u32,
    /// Use the decayed rate `1 / i_episode` for the whole target policy in
    /// [`step`](ExpectedSarsaAgent::step) instead of mixing it with `epsilon`
    ///
    /// **Default**: `false`
    pub consistent_epsilon: bool,
    /// Drop the discounted next-state value when a transition is terminal
    ///
    /// **Default**: `false`
    pub terminal_cutoff: bool,
    /// Put the greedy mass of the target policy in [`step`](ExpectedSarsaAgent::step) on the best
    /// action of `next_state` rather than on the best action of the state being updated
    ///
    /// **Default**: `false`
    pub next_state_greedy: bool,
}

impl Default for ExpectedSarsaAgentConfig {
    fn default() -> Self {
        Self {
            n_actions: 6,
            epsilon: 0.004,
            alpha: 0.1,
            gamma: 1.0,
            divisor: 400,
            consistent_epsilon: false,
            terminal_cutoff: false,
            next_state_greedy: false,
        }
    }
}

/// A tabular Expected-SARSA agent with an epsilon greedy behaviour policy
///
/// The training loop is owned by the caller: per time step it asks for an action with
/// [`select_action`](Self::select_action), applies it to its environment and reports the
/// transition back through [`step`](Self::step). Episodes are counted from `1`.
///
/// ### Generics
/// - `S` - The state type, used as a key in the Q table
#[derive(Debug, Clone)]
pub struct ExpectedSarsaAgent<S: Hashable> {
    q_table: QTable<S>,
    exploration: EpsilonGreedy<decay::Reciprocal>,
    config: ExpectedSarsaAgentConfig,
    rng: StdRng,
}

impl<S: Hashable> ExpectedSarsaAgent<S> {
    /// Initialize a new agent with an entropy-seeded random number generator
    ///
    /// **Errors** if `n_actions` is zero
    pub fn new(config: ExpectedSarsaAgentConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Initialize a new agent whose action sampling is reproducible for a given `seed`
    ///
    /// **Errors** if `n_actions` is zero
    pub fn with_seed(config: ExpectedSarsaAgentConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ExpectedSarsaAgentConfig, rng: StdRng) -> Result<Self> {
        if config.n_actions == 0 {
            return Err(AgentError::NoActions);
        }
        Ok(Self::build(config, rng))
    }

    fn build(config: ExpectedSarsaAgentConfig, rng: StdRng) -> Self {
        debug!(
            "expected sarsa agent: n_actions={} epsilon={} alpha={} gamma={}",
            config.n_actions, config.epsilon, config.alpha, config.gamma
        );
        Self {
            q_table: QTable::new(config.n_actions),
            exploration: EpsilonGreedy::new(decay::Reciprocal::new()),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &ExpectedSarsaAgentConfig {
        &self.config
    }

    pub fn n_actions(&self) -> usize {
        self.q_table.n_actions()
    }

    pub fn q_table(&self) -> &QTable<S> {
        &self.q_table
    }

    /// Action values for `state`, or `None` if it has never been referenced
    pub fn q_values(&self, state: &S) -> Option<&[f32]> {
        self.q_table.get(state)
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        self.q_table.clear();
    }

    /// The distribution [`select_action`](Self::select_action) samples from in episode `i_episode`
    pub fn policy(&mut self, state: &S, i_episode: u32) -> Result<Vec<f32>> {
        let t = episode_time(i_episode)?;
        let q_values = self.q_table.get_or_insert(state);
        Ok(self.exploration.probabilities(t, q_values))
    }

    /// Best known action for `state`, without exploration
    pub fn greedy_action(&mut self, state: &S) -> usize {
        argmax(self.q_table.get_or_insert(state))
    }

    /// Sample an action for `state` from an epsilon greedy policy with `ε = 1 / i_episode`
    ///
    /// **Errors** with [`AgentError::DivisionByZero`] if `i_episode` is `0`
    pub fn select_action(&mut self, state: &S, i_episode: u32) -> Result<usize> {
        let t = episode_time(i_episode)?;
        let q_values = self.q_table.get_or_insert(state);
        let action = self.exploration.choose(t, q_values, &mut self.rng)?;
        trace!("episode {i_episode}: selected action {action}");
        Ok(action)
    }

    /// Learn from a single transition
    ///
    /// The target is `reward + γ · Σ π(a') Q(s', a')`. Every slot of π gets `epsilon / n`; the
    /// slot of the best action in `state` (not `next_state`) is then set to `1 - ε + ε / n` with
    /// `ε = 1 / i_episode`. The config flags `consistent_epsilon`, `next_state_greedy` and
    /// `terminal_cutoff` switch to the textbook target; `done` is ignored otherwise.
    ///
    /// **Errors** if `i_episode` is `0` or `action` is outside the action space. Nothing is
    /// modified on error.
    pub fn step(
        &mut self,
        state: &S,
        action: usize,
        reward: f32,
        next_state: &S,
        done: bool,
        i_episode: u32,
    ) -> Result<()> {
        let t = episode_time(i_episode)?;
        let n_actions = self.n_actions();
        if action >= n_actions {
            return Err(AgentError::ActionOutOfRange { action, n_actions });
        }

        let greedy_epsilon = self.exploration.epsilon(t);
        let base_epsilon = if self.config.consistent_epsilon {
            greedy_epsilon
        } else {
            self.config.epsilon
        };

        let state_greedy = argmax(self.q_table.get_or_insert(state));
        let next_q_values = self.q_table.get_or_insert(next_state);
        let greedy = if self.config.next_state_greedy {
            argmax(next_q_values)
        } else {
            state_greedy
        };
        let next_policy =
            epsilon_greedy_weights(n_actions, greedy, base_epsilon, greedy_epsilon);
        let expected: f32 = next_q_values
            .iter()
            .zip(&next_policy)
            .map(|(q, p)| q * p)
            .sum();

        let continuation = if done && self.config.terminal_cutoff {
            0.0
        } else {
            self.config.gamma * expected
        };
        let target = reward + continuation;

        let alpha = self.config.alpha;
        let q_value = &mut self.q_table.get_or_insert(state)[action];
        let old = *q_value;
        *q_value += alpha * (target - old);
        trace!(
            "episode {i_episode}: q[{action}] {old} -> {} (target {target})",
            *q_value
        );

        Ok(())
    }
}

impl<S: Hashable> Default for ExpectedSarsaAgent<S> {
    fn default() -> Self {
        Self::build(ExpectedSarsaAgentConfig::default(), StdRng::from_entropy())
    }
}

fn episode_time(i_episode: u32) -> Result<f32> {
    match i_episode {
        0 => Err(AgentError::DivisionByZero),
        i => Ok(i as f32),
    }
}
