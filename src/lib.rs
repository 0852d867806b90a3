//! Solvers for finite Markov decision processes.
//!
//! A [`Process`] is assembled once through a [`ProcessBuilder`] and is read-only
//! afterwards. It can then be solved by value iteration or policy iteration, and
//! any [`Policy`] can be evaluated by Monte-Carlo rollouts.
//!
//! ```
//! use mdp_solver::{ProcessBuilder, Transition};
//!
//! let mut builder = ProcessBuilder::new();
//! let start = builder.add_state("start").unwrap();
//! let goal = builder.add_state("goal").unwrap();
//! builder
//!     .add_action(start, "go", vec![Transition::new(goal, 1.0, 1.0)])
//!     .unwrap();
//! builder
//!     .add_action(start, "wait", vec![Transition::new(start, 1.0, -0.1)])
//!     .unwrap();
//!
//! let process = builder.build(0.9).unwrap();
//! let policy = process.solve_by_value_iteration(1e-6).unwrap();
//!
//! assert_eq!(process.chosen_action(&policy, start).unwrap().name(), "go");
//! assert!(policy.action(goal).is_none());
//! ```

pub mod error;
pub mod mdp;
pub mod monitor;

pub use error::{Error, Result};
pub use mdp::*;
pub use monitor::{Diagnostics, Monitor, NoDiagnostics};
