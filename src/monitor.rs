//! Counters for observing how much work the solvers do.
//!
//! Counting has no effect on results. A [`Monitor`] is owned by the caller and
//! lent to a [`Solver`](crate::Solver); solvers built without one use
//! [`NoDiagnostics`].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives counting events from the solvers.
pub trait Diagnostics: Sync {
    /// Called once per outer solver loop iteration.
    fn increment_iteration_count(&self);

    /// Called once per transition utility calculation.
    fn increment_calculation_count(&self);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn increment_iteration_count(&self) {}

    fn increment_calculation_count(&self) {}
}

/// Iteration and calculation counters.
#[derive(Debug, Default)]
pub struct Monitor {
    iterations: AtomicUsize,
    calculations: AtomicUsize,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(&self) -> usize {
        self.iterations.load(Ordering::Relaxed)
    }

    pub fn calculations(&self) -> usize {
        self.calculations.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.iterations.store(0, Ordering::Relaxed);
        self.calculations.store(0, Ordering::Relaxed);
    }

    /// Logs the current counts at info level.
    pub fn report(&self) {
        log::info!("{self}");
    }
}

impl Diagnostics for Monitor {
    fn increment_iteration_count(&self) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_calculation_count(&self) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations, {} calculations",
            self.iterations(),
            self.calculations()
        )
    }
}
