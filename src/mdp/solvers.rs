//! Value iteration, policy iteration and Monte-Carlo policy evaluation.
//!
//! All three entry points live on [`Solver`], which borrows a
//! [`Process`] and never changes it.

pub mod policy_iteration;
pub mod simulation;
pub mod value_iteration;

use crate::mdp::{Policy, Process, Utilities};
use crate::monitor::{Diagnostics, NoDiagnostics};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

static NO_DIAGNOSTICS: NoDiagnostics = NoDiagnostics;

/// Extra room on a derived sweep cap for rounding in the residuals.
const SWEEP_HEADROOM: f64 = 1.1;
const MIN_SWEEPS: usize = 10;

/// Limits and tolerances shared by the iterative solvers.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Cap on sweeps (value iteration, each policy evaluation) and on outer
    /// policy iteration loops. Hitting it is reported as non-convergence.
    ///
    /// `None` derives the cap from the reward discount, so a discount close
    /// to 1 gets as many sweeps as the contraction needs.
    pub max_iterations: Option<usize>,
    /// Policy evaluation stops once no state's utility moves more than this.
    pub evaluation_tolerance: f64,
    /// Policy improvement only switches to an action that beats the current
    /// one by more than this.
    pub improvement_tolerance: f64,
    /// Seed for the random initial policy of policy iteration.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            evaluation_tolerance: 1e-10,
            improvement_tolerance: 1e-9,
            seed: None,
        }
    }
}

/// Settings for Monte-Carlo policy evaluation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Steps after which a rollout is cut off.
    pub max_depth: usize,
    /// Makes estimates reproducible when set.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_depth: 40,
            seed: None,
        }
    }
}

/// Outcome of value iteration or policy iteration.
#[derive(Debug, Clone)]
pub struct Solution {
    pub policy: Policy,
    /// Utilities the policy was derived from.
    pub utilities: Utilities,
    /// Number of outer loop iterations performed.
    pub iterations: usize,
    /// Max-norm change between successive utility estimates, one per
    /// iteration.
    pub residuals: Vec<f64>,
}

/// Runs the solvers against one process.
#[derive(Clone)]
pub struct Solver<'a> {
    process: &'a Process,
    config: SolverConfig,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Solver<'a> {
    pub fn new(process: &'a Process) -> Self {
        Self {
            process,
            config: SolverConfig::default(),
            diagnostics: &NO_DIAGNOSTICS,
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Reports iteration and calculation counts to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn process(&self) -> &'a Process {
        self.process
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn reward_discount(&self) -> f64 {
        self.process.reward_discount()
    }

    /// Cap for a sweep loop that stops once the change is at most
    /// `threshold`, given the change made by its first sweep.
    ///
    /// Each sweep shrinks the change by at least the discount, so after `k`
    /// more sweeps it is below `discount^k * first_change`.
    fn sweep_limit(&self, first_change: f64, threshold: f64) -> usize {
        if let Some(limit) = self.config.max_iterations {
            return limit;
        }
        if first_change <= threshold {
            return MIN_SWEEPS;
        }
        let discount = self.reward_discount();
        let sweeps = 1.0 + ((threshold / first_change).ln() / discount.ln()).ceil();
        // float to int casts saturate, so a zero threshold means no cap
        ((sweeps * SWEEP_HEADROOM) as usize).saturating_add(MIN_SWEEPS)
    }

    /// Cap on improvement rounds of policy iteration.
    ///
    /// Policy iteration needs O(m / (1 - d) * log(n / (1 - d))) rounds for
    /// `n` states, `m` actions and discount `d` (Hansen, Miltersen and Zwick,
    /// 2013).
    fn improvement_limit(&self) -> usize {
        if let Some(limit) = self.config.max_iterations {
            return limit;
        }
        let actions: usize = self.process.states().iter().map(|s| s.actions().len()).sum();
        let horizon = 1.0 / (1.0 - self.reward_discount());
        let states = self.process.len().max(1) as f64;
        let rounds = actions.max(1) as f64 * horizon * (states * horizon).ln().max(1.0);
        (rounds.ceil() as usize).saturating_add(MIN_SWEEPS)
    }

    fn rng(seed: Option<u64>) -> ChaCha20Rng {
        match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::seed_from_u64(rand::thread_rng().gen()),
        }
    }
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("states", &self.process.len())
            .field("reward_discount", &self.process.reward_discount())
            .field("config", &self.config)
            .finish()
    }
}
