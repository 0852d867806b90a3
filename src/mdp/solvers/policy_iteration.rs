//! Policy iteration: alternate exact policy evaluation and greedy improvement
//! until no state changes its action.

use crate::error::{Error, Result};
use crate::mdp::{ActionId, Decision, EvaluatedAction, Policy, Solution, Solver, Utilities};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

impl Solver<'_> {
    /// Solves the process by policy iteration from a random initial policy.
    ///
    /// Each outer iteration evaluates the current policy to a fixed point
    /// (within `evaluation_tolerance`, warm-started from the previous
    /// evaluation) and then improves it. A state only switches action when
    /// another one beats the current choice by more than
    /// `improvement_tolerance`, so ties never cause the loop to oscillate.
    pub fn policy_iteration(&self) -> Result<Solution> {
        let mut rng = Self::rng(self.config.seed);
        let mut policy = self.random_policy(&mut rng);
        let mut utilities = Utilities::zeros(self.process.len());
        let mut residuals = Vec::new();
        let limit = self.improvement_limit();

        for iteration in 1..=limit {
            self.diagnostics.increment_iteration_count();

            let evaluated = self.evaluate_policy_from(&policy, utilities.clone())?;
            residuals.push(evaluated.max_difference(&utilities));
            utilities = evaluated;

            let (improved, changed) = self.improve_policy(&policy, &utilities);
            policy = improved;
            log::debug!("policy iteration {iteration}: {changed} states changed action");

            if changed == 0 {
                log::info!("policy iteration reached a fixed point after {iteration} iterations");
                return Ok(Solution {
                    policy,
                    utilities,
                    iterations: iteration,
                    residuals,
                });
            }
        }

        log::warn!("policy iteration still changing after {limit} iterations");
        Err(Error::NonConvergence {
            algorithm: "policy iteration",
            iterations: limit,
        })
    }

    /// Utilities of following `policy` forever, computed by repeated
    /// synchronous sweeps from zero.
    pub fn evaluate_policy(&self, policy: &Policy) -> Result<Utilities> {
        self.evaluate_policy_from(policy, Utilities::zeros(self.process.len()))
    }

    fn evaluate_policy_from(&self, policy: &Policy, initial: Utilities) -> Result<Utilities> {
        let discount = self.reward_discount();
        let states = self.process.states();
        let tolerance = self.config.evaluation_tolerance;
        let mut utilities = initial.resized(states.len());
        let mut limit = self.config.max_iterations.unwrap_or(usize::MAX);

        let mut sweeps = 0;
        while sweeps < limit {
            let updated = Utilities::from_fn(states.len(), |i| {
                states[i].utility_under_policy(policy, &utilities, discount, self.diagnostics)
            });
            let delta = updated.max_difference(&utilities);
            utilities = updated;
            sweeps += 1;
            if delta <= tolerance {
                return Ok(utilities);
            }
            if sweeps == 1 {
                limit = self.sweep_limit(delta, tolerance);
            }
        }

        log::warn!("policy evaluation did not settle within {limit} sweeps");
        Err(Error::NonConvergence {
            algorithm: "policy evaluation",
            iterations: limit,
        })
    }

    /// Greedy improvement of `policy` against `utilities`.
    ///
    /// Returns the new policy, with every decision carrying its utility, and
    /// the number of states whose action changed.
    pub fn improve_policy(&self, policy: &Policy, utilities: &Utilities) -> (Policy, usize) {
        let discount = self.reward_discount();
        let mut improved = Policy::new();
        let mut changed = 0;

        for state in self.process.states() {
            let Some(best) = state.best_action(utilities, discount, self.diagnostics) else {
                continue;
            };
            let current = policy.action(state.id()).and_then(|id| {
                state
                    .action(id)
                    .map(|a| (id, a.expected_utility(discount, utilities, self.diagnostics)))
            });

            match current {
                Some((id, utility))
                    if best.action == id
                        || best.utility <= utility + self.config.improvement_tolerance =>
                {
                    let kept = EvaluatedAction {
                        action: id,
                        utility,
                    };
                    improved.insert(state.id(), kept.into());
                }
                _ => {
                    log::trace!(
                        "state {} switches to action {}",
                        state.name(),
                        state.action(best.action).map_or("?", |a| a.name())
                    );
                    improved.insert(state.id(), best.into());
                    changed += 1;
                }
            }
        }

        (improved, changed)
    }

    fn random_policy(&self, rng: &mut ChaCha20Rng) -> Policy {
        let mut policy = Policy::new();
        for state in self.process.states() {
            let count = state.actions().len();
            if count > 0 {
                let action = ActionId::new(rng.gen_range(0..count));
                policy.insert(state.id(), Decision::new(action));
            }
        }
        policy
    }
}
