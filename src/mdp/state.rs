use crate::mdp::{Action, Policy, Utilities};
use crate::monitor::Diagnostics;
use std::fmt;

/// Handle of a state inside its [`Process`](crate::Process).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of an action within its owning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl ActionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// An action together with the utility that got it selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedAction {
    pub action: ActionId,
    pub utility: f64,
}

/// A node of the decision graph. A state without actions is terminal.
#[derive(Debug, Clone)]
pub struct State {
    id: StateId,
    name: String,
    actions: Vec<Action>,
}

impl State {
    pub(crate) fn new(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            actions: Vec::new(),
        }
    }

    pub(crate) fn push_action(&mut self, action: Action) -> ActionId {
        self.actions.push(action);
        ActionId(self.actions.len() - 1)
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.0)
    }

    pub fn action_by_name(&self, name: &str) -> Option<ActionId> {
        self.actions
            .iter()
            .position(|a| a.name() == name)
            .map(ActionId)
    }

    pub fn is_terminal(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action with the highest expected utility, or `None` for a terminal
    /// state. Ties go to the action added first.
    pub fn best_action(
        &self,
        utilities: &Utilities,
        reward_discount: f64,
        diagnostics: &dyn Diagnostics,
    ) -> Option<EvaluatedAction> {
        let mut best: Option<EvaluatedAction> = None;
        for (index, action) in self.actions.iter().enumerate() {
            let utility = action.expected_utility(reward_discount, utilities, diagnostics);
            if best.map_or(true, |b| utility > b.utility) {
                best = Some(EvaluatedAction {
                    action: ActionId(index),
                    utility,
                });
            }
        }
        best
    }

    /// Bellman backup for this state; 0 when terminal.
    pub fn best_utility(
        &self,
        utilities: &Utilities,
        reward_discount: f64,
        diagnostics: &dyn Diagnostics,
    ) -> f64 {
        self.best_action(utilities, reward_discount, diagnostics)
            .map_or(0.0, |best| best.utility)
    }

    /// The action `policy` picks here, if it picks one that exists.
    pub fn policy_action(&self, policy: &Policy) -> Option<&Action> {
        policy.action(self.id).and_then(|id| self.action(id))
    }

    /// Expected utility of following `policy` for one step; 0 when the policy
    /// has nothing for this state.
    pub fn utility_under_policy(
        &self,
        policy: &Policy,
        utilities: &Utilities,
        reward_discount: f64,
        diagnostics: &dyn Diagnostics,
    ) -> f64 {
        self.policy_action(policy).map_or(0.0, |action| {
            action.expected_utility(reward_discount, utilities, diagnostics)
        })
    }
}
