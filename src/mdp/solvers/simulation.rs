//! Monte-Carlo estimation of a policy's expected return.

use crate::error::{Error, Result};
use crate::mdp::{Policy, SimulationConfig, Solver, StateId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Solver<'_> {
    /// Average discounted return of `config.trials` independent rollouts of
    /// `policy` from `start`, each cut off after `config.max_depth` steps.
    ///
    /// This is a statistical estimate; [`evaluate_policy`](Self::evaluate_policy)
    /// gives the exact value. Every trial draws from its own generator derived
    /// from the seed and the trial number, so a seeded estimate does not
    /// depend on how trials are spread over threads.
    pub fn estimate_expected_utility(
        &self,
        start: StateId,
        policy: &Policy,
        config: &SimulationConfig,
    ) -> Result<f64> {
        self.process.require(start)?;
        if config.trials == 0 {
            return Err(Error::InvalidSimulation(
                "at least one trial is required".to_string(),
            ));
        }

        let base_seed = config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        let trial = |index: usize| {
            let mut rng = ChaCha20Rng::seed_from_u64(base_seed);
            rng.set_stream(index as u64);
            self.simulate_policy(start, policy, config.max_depth, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let total: f64 = (0..config.trials).into_par_iter().map(trial).sum();
        #[cfg(not(feature = "parallel"))]
        let total: f64 = (0..config.trials).map(trial).sum();

        let estimate = total / config.trials as f64;
        log::debug!(
            "estimated utility {estimate} from {} trials of depth {} starting at {start}",
            config.trials,
            config.max_depth
        );
        Ok(estimate)
    }

    /// One rollout: follow `policy` from `start`, sampling a transition at
    /// every step, and return the discounted sum of rewards.
    ///
    /// The rollout ends early when it reaches a state the policy has no
    /// action for. An unknown `start` yields 0.
    pub fn simulate_policy<R: Rng + ?Sized>(
        &self,
        start: StateId,
        policy: &Policy,
        max_depth: usize,
        rng: &mut R,
    ) -> f64 {
        let mut path = Vec::new();
        let mut state = start;
        while path.len() < max_depth {
            let Some(action) = self.process.chosen_action(policy, state) else {
                break;
            };
            let transition = action.sample_transition(rng);
            state = transition.destination();
            path.push(transition);
        }

        // r0 + d * (r1 + d * (r2 + ...)), innermost first
        let discount = self.reward_discount();
        path.iter()
            .rev()
            .fold(0.0, |rest, t| t.discounted_return(discount, rest))
    }
}
