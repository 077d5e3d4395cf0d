use dirtree::filesystem::FileSystemConfig;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::printer::Printer;
use crate::scenario::{RunnerError, Scenario, ScenarioError, ScenarioRunner};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let scenario = Scenario::read(&runtime_config.scenario)
            .await
            .context(ScenarioSnafu)?;
        debug!("Loaded scenario: {:?}", scenario);

        // Command-line flags win over the scenario's own settings.
        let config = runtime_config
            .overrides
            .apply_to(scenario.overrides.apply_to(FileSystemConfig::default()));
        let stop_on_error = runtime_config.stop_on_error || scenario.stop_on_error;

        let printer = Printer::new(runtime_config.color);
        let mut runner = ScenarioRunner::new(config, stop_on_error);
        let summary = runner
            .run(&scenario.operations, |report| printer.print_report(report))
            .context(RunSnafu)?;
        debug!("Final tree:\n{}", runner.file_system());
        info!(
            "Scenario finished: {} applied, {} failed",
            summary.applied, summary.failed
        );

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the scenario"))]
    ScenarioError { source: ScenarioError },
    #[snafu(display("Scenario aborted"))]
    RunError { source: RunnerError },
}
