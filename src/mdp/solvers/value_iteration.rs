//! Value iteration: repeated synchronous Bellman backups until the utilities
//! stop moving, followed by a greedy policy extraction.

use crate::error::{Error, Result};
use crate::mdp::{Policy, Solution, Solver, Utilities};

impl Solver<'_> {
    /// Solves the process by value iteration, starting from all-zero
    /// utilities.
    ///
    /// Sweeps stop once the largest change is at most
    /// `max_error * (1 - discount) / discount`, which keeps the greedy policy
    /// within `max_error` of optimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdp_solver::{ProcessBuilder, Transition};
    ///
    /// // Staying in state 1 earns 2 per step, state 0 only 1.
    /// let mut builder = ProcessBuilder::new();
    /// let s0 = builder.add_state("s0").unwrap();
    /// let s1 = builder.add_state("s1").unwrap();
    /// builder.add_action(s0, "stay", vec![Transition::new(s0, 1.0, 1.0)]).unwrap();
    /// builder.add_action(s0, "move", vec![Transition::new(s1, 1.0, 0.0)]).unwrap();
    /// builder.add_action(s1, "stay", vec![Transition::new(s1, 1.0, 2.0)]).unwrap();
    /// builder.add_action(s1, "move", vec![Transition::new(s0, 1.0, 0.0)]).unwrap();
    /// let process = builder.build(0.9).unwrap();
    ///
    /// let solution = process.solver().value_iteration(1e-6).unwrap();
    /// assert!((solution.utilities.get(s1) - 20.0).abs() < 1e-5);
    /// assert_eq!(process.chosen_action(&solution.policy, s0).unwrap().name(), "move");
    /// ```
    pub fn value_iteration(&self, max_error: f64) -> Result<Solution> {
        self.value_iteration_from(max_error, Utilities::zeros(self.process.len()))
    }

    /// Like [`value_iteration`](Self::value_iteration) but seeded with
    /// `initial`; states it does not cover start at 0.
    pub fn value_iteration_from(&self, max_error: f64, initial: Utilities) -> Result<Solution> {
        if !(max_error > 0.0 && max_error.is_finite()) {
            return Err(Error::InvalidMaxError(max_error));
        }
        let discount = self.reward_discount();
        let max_difference = max_error * (1.0 - discount) / discount;

        let mut utilities = initial.resized(self.process.len());
        let mut residuals = Vec::new();
        let mut limit = self.config.max_iterations.unwrap_or(usize::MAX);
        loop {
            if residuals.len() >= limit {
                log::warn!(
                    "value iteration stopped after {} sweeps, last change {:?}",
                    residuals.len(),
                    residuals.last()
                );
                return Err(Error::NonConvergence {
                    algorithm: "value iteration",
                    iterations: residuals.len(),
                });
            }
            self.diagnostics.increment_iteration_count();

            let updated = self.bellman_backup(&utilities);
            let delta = updated.max_difference(&utilities);
            utilities = updated;
            residuals.push(delta);
            log::debug!("value iteration sweep {}: change {delta:e}", residuals.len());

            if delta <= max_difference {
                break;
            }
            if residuals.len() == 1 {
                limit = self.sweep_limit(delta, max_difference);
            }
        }

        log::info!("value iteration converged after {} sweeps", residuals.len());
        Ok(Solution {
            policy: self.greedy_policy(&utilities),
            utilities,
            iterations: residuals.len(),
            residuals,
        })
    }

    /// One synchronous sweep: every new value is computed from `utilities`
    /// only. Terminal states get 0.
    pub fn bellman_backup(&self, utilities: &Utilities) -> Utilities {
        let discount = self.reward_discount();
        let states = self.process.states();
        Utilities::from_fn(states.len(), |i| {
            states[i].best_utility(utilities, discount, self.diagnostics)
        })
    }

    /// The best action in every non-terminal state against `utilities`,
    /// recorded together with its utility.
    pub fn greedy_policy(&self, utilities: &Utilities) -> Policy {
        let discount = self.reward_discount();
        let mut policy = Policy::new();
        for state in self.process.states() {
            if let Some(best) = state.best_action(utilities, discount, self.diagnostics) {
                policy.insert(state.id(), best.into());
            }
        }
        policy
    }
}
