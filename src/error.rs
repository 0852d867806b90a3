use crate::mdp::StateId;
use thiserror::Error;

/// Errors reported while building or solving a process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("reward discount must lie strictly between 0 and 1, got {0}")]
    InvalidDiscount(f64),

    #[error("maximum error must be positive and finite, got {0}")]
    InvalidMaxError(f64),

    #[error("a state named `{0}` already exists")]
    DuplicateState(String),

    #[error("state {0} does not belong to this process")]
    UnknownState(StateId),

    #[error("state `{state}` already has an action named `{action}`")]
    DuplicateAction { state: String, action: String },

    #[error("state `{state}` has no action named `{action}`")]
    UnknownAction { state: String, action: String },

    #[error("action `{action}` of state `{state}` has no transitions")]
    EmptyAction { state: String, action: String },

    #[error("action `{action}` of state `{state}` has invalid transition probability {probability}")]
    InvalidProbability {
        state: String,
        action: String,
        probability: f64,
    },

    #[error("transition probabilities of action `{action}` in state `{state}` sum to {sum}, expected 1")]
    UnnormalizedDistribution {
        state: String,
        action: String,
        sum: f64,
    },

    #[error("action `{action}` of state `{state}` has non-finite reward {reward}")]
    NonFiniteReward {
        state: String,
        action: String,
        reward: f64,
    },

    #[error("{algorithm} did not converge within {iterations} iterations")]
    NonConvergence {
        algorithm: &'static str,
        iterations: usize,
    },

    #[error("invalid simulation settings: {0}")]
    InvalidSimulation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
