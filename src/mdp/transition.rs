use crate::mdp::{StateId, Utilities};
use crate::monitor::Diagnostics;

/// One possible outcome of an action: the successor state, how likely it is,
/// and the reward collected on the way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    destination: StateId,
    probability: f64,
    reward: f64,
}

impl Transition {
    pub fn new(destination: StateId, probability: f64, reward: f64) -> Self {
        Self {
            destination,
            probability,
            reward,
        }
    }

    pub fn destination(&self) -> StateId {
        self.destination
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// `p * (r + discount * U(destination))`, where an unknown destination
    /// counts as utility 0.
    pub fn expected_contribution(
        &self,
        reward_discount: f64,
        utilities: &Utilities,
        diagnostics: &dyn Diagnostics,
    ) -> f64 {
        diagnostics.increment_calculation_count();
        self.probability * (self.reward + reward_discount * utilities.get(self.destination))
    }

    /// Return of taking this transition when `continuation` is what the
    /// destination yields afterwards.
    pub fn discounted_return(&self, reward_discount: f64, continuation: f64) -> f64 {
        self.reward + reward_discount * continuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{Monitor, NoDiagnostics};
    use approx::assert_relative_eq;

    #[test]
    fn test_expected_contribution() {
        let t = Transition::new(StateId::new(1), 0.8, -0.04);
        let utilities = Utilities::from_vec(vec![0.0, 2.0]);

        let value = t.expected_contribution(0.9, &utilities, &NoDiagnostics);
        assert_relative_eq!(value, 0.8 * (-0.04 + 0.9 * 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_missing_destination_counts_as_zero() {
        let t = Transition::new(StateId::new(7), 0.5, 1.0);
        let utilities = Utilities::from_vec(vec![3.0]);

        let value = t.expected_contribution(0.9, &utilities, &NoDiagnostics);
        assert_relative_eq!(value, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_counts_one_calculation_per_call() {
        let monitor = Monitor::new();
        let t = Transition::new(StateId::new(0), 1.0, 1.0);
        let utilities = Utilities::zeros(1);

        t.expected_contribution(0.5, &utilities, &monitor);
        t.expected_contribution(0.5, &utilities, &monitor);
        assert_eq!(monitor.calculations(), 2);
        assert_eq!(monitor.iterations(), 0);
    }

    #[test]
    fn test_discounted_return() {
        let t = Transition::new(StateId::new(0), 1.0, 2.0);
        assert_relative_eq!(t.discounted_return(0.5, 4.0), 4.0);
    }
}
