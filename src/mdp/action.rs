use crate::mdp::{Transition, Utilities};
use crate::monitor::Diagnostics;
use rand::Rng;

/// A named choice available in a state, inducing a distribution over
/// transitions.
///
/// The transition probabilities are expected to be non-negative and to sum to
/// 1; [`ProcessBuilder`](crate::ProcessBuilder) rejects actions that are not.
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    transitions: Vec<Transition>,
    // Running sum of the transition probabilities, same order as `transitions`.
    cumulative: Vec<f64>,
}

impl Action {
    pub(crate) fn new(name: impl Into<String>, transitions: Vec<Transition>) -> Self {
        let cumulative = transitions
            .iter()
            .scan(0.0, |sum, t| {
                *sum += t.probability();
                Some(*sum)
            })
            .collect();

        Self {
            name: name.into(),
            transitions,
            cumulative,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Expected discounted return of taking this action once and then
    /// collecting `utilities` at the successor.
    pub fn expected_utility(
        &self,
        reward_discount: f64,
        utilities: &Utilities,
        diagnostics: &dyn Diagnostics,
    ) -> f64 {
        self.transitions
            .iter()
            .map(|t| t.expected_contribution(reward_discount, utilities, diagnostics))
            .sum()
    }

    /// Draws a transition according to the transition probabilities.
    ///
    /// The last transition absorbs whatever probability mass rounding leaves
    /// uncovered, so a draw close to 1 always lands somewhere.
    pub fn sample_transition<R: Rng + ?Sized>(&self, rng: &mut R) -> &Transition {
        let p: f64 = rng.gen();
        let index = self.cumulative.partition_point(|&c| c <= p);
        &self.transitions[index.min(self.transitions.len() - 1)]
    }
}
