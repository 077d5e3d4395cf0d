pub(crate) mod operation;
mod runner;
mod scenario;

pub use operation::Outcome;
pub use runner::{Report, RunnerError, ScenarioRunner};
pub use scenario::{ConfigOverrides, Scenario, ScenarioError};
