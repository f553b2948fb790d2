use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};

use crate::{decay::Decay, error::Result, util::argmax};

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
///
/// Unlike a coin-flip formulation, this policy exposes the full action distribution so that
/// it can be reused as the target policy of an expected update.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Exploration rate at time `t`
    pub fn epsilon(&self, t: f32) -> f32 {
        self.epsilon.evaluate(t)
    }

    /// Action probabilities at time `t` for the provided Q values
    ///
    /// Every action receives `ε / n` and the greedy action receives an extra `1 - ε`.
    pub fn probabilities(&self, t: f32, q_values: &[f32]) -> Vec<f32> {
        let epsilon = self.epsilon(t);
        action_probabilities(q_values, epsilon, epsilon)
    }

    /// Sample an action index at time `t` from [`probabilities`](Self::probabilities)
    pub fn choose<R: Rng + ?Sized>(&self, t: f32, q_values: &[f32], rng: &mut R) -> Result<usize> {
        let dist = WeightedIndex::new(self.probabilities(t, q_values))?;
        Ok(dist.sample(rng))
    }
}

/// Build an epsilon greedy distribution where the non-greedy mass and the greedy bonus may
/// come from different exploration rates
///
/// Every slot gets `base_epsilon / n`. The greedy slot (first maximum on ties) is then
/// overwritten with `1 - greedy_epsilon + greedy_epsilon / n`. With equal rates this is the
/// ordinary epsilon greedy distribution and sums to one; otherwise it generally does not.
pub fn action_probabilities(q_values: &[f32], base_epsilon: f32, greedy_epsilon: f32) -> Vec<f32> {
    epsilon_greedy_weights(q_values.len(), argmax(q_values), base_epsilon, greedy_epsilon)
}

/// Same as [`action_probabilities`] with the greedy slot given explicitly
///
/// A `greedy` index outside `0..n_actions` leaves only the base mass.
pub fn epsilon_greedy_weights(
    n_actions: usize,
    greedy: usize,
    base_epsilon: f32,
    greedy_epsilon: f32,
) -> Vec<f32> {
    let n = n_actions as f32;
    let mut probs = vec![base_epsilon / n; n_actions];
    if let Some(p) = probs.get_mut(greedy) {
        *p = 1.0 - greedy_epsilon + greedy_epsilon / n;
    }
    probs
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::{Constant, Reciprocal};

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn probabilities_favor_greedy_action() {
        let policy = EpsilonGreedy::new(Reciprocal::new());
        let probs = policy.probabilities(4.0, &[0.0, 2.0, 1.0]);

        let eps = 0.25;
        assert!((probs[1] - (1.0 - eps + eps / 3.0)).abs() < TOLERANCE);
        assert!((probs[0] - eps / 3.0).abs() < TOLERANCE);
        assert!((probs[2] - eps / 3.0).abs() < TOLERANCE);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let policy = EpsilonGreedy::new(Reciprocal::new());
        for n in 1..=8 {
            let q_values: Vec<f32> = (0..n).map(|i| (i * 7 % 5) as f32).collect();
            for t in [1.0, 2.0, 3.0, 100.0] {
                let sum: f32 = policy.probabilities(t, &q_values).iter().sum();
                assert!((sum - 1.0).abs() < 1e-5, "n = {n}, t = {t}, sum = {sum}");
            }
        }
    }

    #[test]
    fn ties_break_to_first_index() {
        let probs = action_probabilities(&[1.0, 3.0, 3.0, 0.0], 0.2, 0.2);
        assert!(probs[1] > probs[2]);
        assert_eq!(probs[2], probs[0]);
    }

    #[test]
    fn mixed_rates() {
        let probs = action_probabilities(&[0.0, 0.0], 0.004, 1.0);
        assert!((probs[0] - 0.5).abs() < TOLERANCE);
        assert!((probs[1] - 0.002).abs() < TOLERANCE);
    }

    #[test]
    fn explicit_greedy_slot() {
        let probs = epsilon_greedy_weights(3, 2, 0.3, 1.0);
        assert!((probs[0] - 0.1).abs() < TOLERANCE);
        assert!((probs[1] - 0.1).abs() < TOLERANCE);
        assert!((probs[2] - 1.0 / 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn greedy_when_epsilon_is_zero() {
        let policy = EpsilonGreedy::new(Constant::new(0.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let action = policy.choose(1.0, &[0.1, -1.0, 0.5, 0.2], &mut rng).unwrap();
            assert_eq!(action, 2);
        }
    }

    #[test]
    fn choose_respects_weights() {
        // ε = 0.5 over 2 actions: greedy 0.75, other 0.25
        let policy = EpsilonGreedy::new(Reciprocal::new());
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 20_000;
        let greedy = (0..trials)
            .filter(|_| policy.choose(2.0, &[0.0, 1.0], &mut rng).unwrap() == 1)
            .count();
        let freq = greedy as f32 / trials as f32;
        assert!((freq - 0.75).abs() < 0.02, "greedy frequency was {freq}");
    }
}
