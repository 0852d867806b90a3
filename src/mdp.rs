pub mod action;
pub mod builder;
pub mod policy;
pub mod process;
pub mod solvers;
pub mod state;
pub mod transition;
pub mod utilities;

pub use action::Action;
pub use builder::ProcessBuilder;
pub use policy::{Decision, Policy};
pub use process::Process;
pub use solvers::{SimulationConfig, Solution, Solver, SolverConfig};
pub use state::{ActionId, EvaluatedAction, State, StateId};
pub use transition::Transition;
pub use utilities::Utilities;
