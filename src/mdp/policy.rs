use crate::error::{Error, Result};
use crate::mdp::{ActionId, EvaluatedAction, Process, StateId};
use std::collections::BTreeMap;

/// The action a policy takes in one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    action: ActionId,
    utility: Option<f64>,
}

impl Decision {
    /// A decision made without evaluating it, e.g. written by hand.
    pub fn new(action: ActionId) -> Self {
        Self {
            action,
            utility: None,
        }
    }

    pub fn action(&self) -> ActionId {
        self.action
    }

    /// Utility the action had when a solver selected it.
    pub fn utility(&self) -> Option<f64> {
        self.utility
    }
}

impl From<EvaluatedAction> for Decision {
    fn from(evaluated: EvaluatedAction) -> Self {
        Self {
            action: evaluated.action,
            utility: Some(evaluated.utility),
        }
    }
}

/// Maps states to at most one action each. States without a decision, such as
/// terminal states, are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Policy {
    decisions: BTreeMap<StateId, Decision>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the action called `action_name` for `state`, checking both exist
    /// in `process`.
    pub fn choose(
        &mut self,
        process: &Process,
        state: StateId,
        action_name: &str,
    ) -> Result<&mut Self> {
        let owner = process.state(state).ok_or(Error::UnknownState(state))?;
        let id = owner
            .action_by_name(action_name)
            .ok_or_else(|| Error::UnknownAction {
                state: owner.name().to_string(),
                action: action_name.to_string(),
            })?;
        self.decisions.insert(state, Decision::new(id));
        Ok(self)
    }

    pub(crate) fn insert(&mut self, state: StateId, decision: Decision) {
        self.decisions.insert(state, decision);
    }

    /// Drops the decision for `state`, which then counts as terminal.
    pub fn remove(&mut self, state: StateId) -> Option<Decision> {
        self.decisions.remove(&state)
    }

    pub fn decision(&self, state: StateId) -> Option<&Decision> {
        self.decisions.get(&state)
    }

    pub fn action(&self, state: StateId) -> Option<ActionId> {
        self.decisions.get(&state).map(Decision::action)
    }

    pub fn utility(&self, state: StateId) -> Option<f64> {
        self.decisions.get(&state).and_then(Decision::utility)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Decisions in state order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &Decision)> {
        self.decisions.iter().map(|(state, decision)| (*state, decision))
    }

    /// Whether both policies pick the same action everywhere, ignoring the
    /// recorded utilities.
    pub fn same_actions(&self, other: &Policy) -> bool {
        self.decisions.len() == other.decisions.len()
            && self
                .iter()
                .all(|(state, decision)| other.action(state) == Some(decision.action()))
    }
}
