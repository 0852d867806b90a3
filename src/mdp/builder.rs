//! Assembles a [`Process`] and checks it before any solver sees it.

use crate::error::{Error, Result};
use crate::mdp::{Action, ActionId, Process, State, StateId, Transition};
use approx::abs_diff_eq;
use std::collections::HashMap;

/// Slack allowed when checking that transition probabilities sum to 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Mutable construction stage of a [`Process`].
///
/// States are added first, then actions whose transitions refer to those
/// states. [`build`](ProcessBuilder::build) freezes the graph.
#[derive(Debug, Default)]
pub struct ProcessBuilder {
    states: Vec<State>,
    names: HashMap<String, StateId>,
}

impl ProcessBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, name: impl Into<String>) -> Result<StateId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(Error::DuplicateState(name));
        }
        let id = StateId::new(self.states.len());
        self.names.insert(name.clone(), id);
        self.states.push(State::new(id, name));
        Ok(id)
    }

    /// Attaches an action to `state`.
    ///
    /// Every transition must lead to a state already added, carry a finite
    /// reward and a probability in `[0, 1]`, and the probabilities must sum
    /// to 1 within [`PROBABILITY_TOLERANCE`].
    pub fn add_action(
        &mut self,
        state: StateId,
        name: impl Into<String>,
        transitions: Vec<Transition>,
    ) -> Result<ActionId> {
        let name = name.into();
        let state_count = self.states.len();
        let owner = self
            .states
            .get_mut(state.index())
            .ok_or(Error::UnknownState(state))?;

        if owner.action_by_name(&name).is_some() {
            return Err(Error::DuplicateAction {
                state: owner.name().to_string(),
                action: name,
            });
        }
        if transitions.is_empty() {
            return Err(Error::EmptyAction {
                state: owner.name().to_string(),
                action: name,
            });
        }

        for t in &transitions {
            if t.destination().index() >= state_count {
                return Err(Error::UnknownState(t.destination()));
            }
            if !(0.0..=1.0).contains(&t.probability()) {
                return Err(Error::InvalidProbability {
                    state: owner.name().to_string(),
                    action: name,
                    probability: t.probability(),
                });
            }
            if !t.reward().is_finite() {
                return Err(Error::NonFiniteReward {
                    state: owner.name().to_string(),
                    action: name,
                    reward: t.reward(),
                });
            }
        }

        let sum: f64 = transitions.iter().map(Transition::probability).sum();
        if !abs_diff_eq!(sum, 1.0, epsilon = PROBABILITY_TOLERANCE) {
            return Err(Error::UnnormalizedDistribution {
                state: owner.name().to_string(),
                action: name,
                sum,
            });
        }

        Ok(owner.push_action(Action::new(name, transitions)))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Freezes the graph. `reward_discount` must lie strictly between 0 and 1.
    pub fn build(self, reward_discount: f64) -> Result<Process> {
        if !(reward_discount > 0.0 && reward_discount < 1.0) {
            return Err(Error::InvalidDiscount(reward_discount));
        }
        log::debug!(
            "built process with {} states and {} actions",
            self.states.len(),
            self.states.iter().map(|s| s.actions().len()).sum::<usize>()
        );
        Ok(Process::new(self.states, self.names, reward_discount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_states() -> (ProcessBuilder, StateId, StateId) {
        let mut builder = ProcessBuilder::new();
        let a = builder.add_state("A").unwrap();
        let b = builder.add_state("B").unwrap();
        (builder, a, b)
    }

    #[test]
    fn test_build_valid_process() {
        let (mut builder, a, b) = two_states();
        let go = builder
            .add_action(
                a,
                "go",
                vec![Transition::new(b, 0.8, 1.0), Transition::new(a, 0.2, 0.0)],
            )
            .unwrap();
        assert_eq!(go, ActionId::new(0));
        assert_eq!(builder.state_count(), 2);
        assert_eq!(builder.state_by_name("B"), Some(b));

        let process = builder.build(0.9).unwrap();
        assert_eq!(process.len(), 2);
        assert!(process.state(b).unwrap().is_terminal());
    }

    #[test]
    fn test_duplicate_names() {
        let (mut builder, a, b) = two_states();
        assert_eq!(
            builder.add_state("A").unwrap_err(),
            Error::DuplicateState("A".to_string())
        );

        builder
            .add_action(a, "go", vec![Transition::new(b, 1.0, 0.0)])
            .unwrap();
        assert!(matches!(
            builder.add_action(a, "go", vec![Transition::new(a, 1.0, 0.0)]),
            Err(Error::DuplicateAction { .. })
        ));
        // the same name in another state is fine
        assert!(builder
            .add_action(b, "go", vec![Transition::new(a, 1.0, 0.0)])
            .is_ok());
    }

    #[test]
    fn test_rejects_unnormalized_distribution() {
        let (mut builder, a, b) = two_states();
        let err = builder
            .add_action(a, "go", vec![Transition::new(b, 0.5, 10.0)])
            .unwrap_err();
        assert!(matches!(err, Error::UnnormalizedDistribution { sum, .. } if sum == 0.5));
    }

    #[test]
    fn test_accepts_rounding_drift() {
        let (mut builder, a, b) = two_states();
        let third = 1.0 / 3.0;
        assert!(builder
            .add_action(
                a,
                "split",
                vec![
                    Transition::new(a, third, 0.0),
                    Transition::new(b, third, 0.0),
                    Transition::new(b, third - 1e-9, 0.0),
                ],
            )
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_transitions() {
        let (mut builder, a, b) = two_states();
        assert!(matches!(
            builder.add_action(
                a,
                "neg",
                vec![Transition::new(b, 1.5, 0.0), Transition::new(a, -0.5, 0.0)]
            ),
            Err(Error::InvalidProbability { probability, .. }) if probability == 1.5
        ));
        assert!(matches!(
            builder.add_action(a, "inf", vec![Transition::new(b, 1.0, f64::INFINITY)]),
            Err(Error::NonFiniteReward { .. })
        ));
        assert!(matches!(
            builder.add_action(a, "none", vec![]),
            Err(Error::EmptyAction { .. })
        ));
        assert_eq!(
            builder
                .add_action(a, "far", vec![Transition::new(StateId::new(5), 1.0, 0.0)])
                .unwrap_err(),
            Error::UnknownState(StateId::new(5))
        );
        assert_eq!(
            builder
                .add_action(StateId::new(5), "x", vec![Transition::new(a, 1.0, 0.0)])
                .unwrap_err(),
            Error::UnknownState(StateId::new(5))
        );
    }

    #[test]
    fn test_rejects_bad_discount() {
        for discount in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let (builder, _, _) = two_states();
            assert!(matches!(
                builder.build(discount),
                Err(Error::InvalidDiscount(_))
            ));
        }
    }
}
