use crate::error::{Error, Result};
use crate::mdp::{Action, Policy, SimulationConfig, Solver, State, StateId};
use std::collections::HashMap;

/// Maximum error used by [`Process::calculate_optimal_policy`].
pub const DEFAULT_MAX_ERROR: f64 = 1e-5;

/// A finite Markov decision process: an immutable graph of states, actions and
/// transitions together with the reward discount.
///
/// Built with [`ProcessBuilder`](crate::ProcessBuilder).
#[derive(Debug, Clone)]
pub struct Process {
    states: Vec<State>,
    names: HashMap<String, StateId>,
    reward_discount: f64,
}

impl Process {
    pub(crate) fn new(
        states: Vec<State>,
        names: HashMap<String, StateId>,
        reward_discount: f64,
    ) -> Self {
        Self {
            states,
            names,
            reward_discount,
        }
    }

    pub fn reward_discount(&self) -> f64 {
        self.reward_discount
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// The action `policy` takes in `state`.
    pub fn chosen_action(&self, policy: &Policy, state: StateId) -> Option<&Action> {
        self.state(state)?.policy_action(policy)
    }

    /// Builds a policy from `(state, action name)` pairs.
    pub fn policy_from(&self, choices: &[(StateId, &str)]) -> Result<Policy> {
        let mut policy = Policy::new();
        for (state, action) in choices {
            policy.choose(self, *state, action)?;
        }
        Ok(policy)
    }

    /// A solver with default settings and no diagnostics.
    pub fn solver(&self) -> Solver<'_> {
        Solver::new(self)
    }

    /// Greedy policy whose value is within `max_error` of optimal.
    pub fn solve_by_value_iteration(&self, max_error: f64) -> Result<Policy> {
        Ok(self.solver().value_iteration(max_error)?.policy)
    }

    pub fn solve_by_policy_iteration(&self) -> Result<Policy> {
        Ok(self.solver().policy_iteration()?.policy)
    }

    pub fn calculate_optimal_policy(&self) -> Result<Policy> {
        self.solve_by_value_iteration(DEFAULT_MAX_ERROR)
    }

    /// Mean discounted return of 1000 rollouts of at most 40 steps.
    pub fn estimate_expected_utility(&self, start: StateId, policy: &Policy) -> Result<f64> {
        self.solver()
            .estimate_expected_utility(start, policy, &SimulationConfig::default())
    }

    pub(crate) fn require(&self, id: StateId) -> Result<&State> {
        self.state(id).ok_or(Error::UnknownState(id))
    }
}
