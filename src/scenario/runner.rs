use dirtree::filesystem::{FileSystem, FileSystemConfig, FileSystemError};
use snafu::Snafu;
use tracing::{debug, info, warn};

use super::operation::{Operation, Outcome};

/// The result of applying one operation, handed to the caller as it happens.
#[derive(Debug)]
pub struct Report<'a> {
    pub index: usize,
    pub operation: &'a Operation,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub failed: usize,
}

/// Applies operations in order to a single file system it owns.
pub struct ScenarioRunner {
    file_system: FileSystem,
    stop_on_error: bool,
}

impl ScenarioRunner {
    pub fn new(config: FileSystemConfig, stop_on_error: bool) -> Self {
        debug!("Creating file system with {:?}", config);
        Self {
            file_system: FileSystem::with_config(config),
            stop_on_error,
        }
    }

    pub fn file_system(&self) -> &FileSystem {
        &self.file_system
    }

    /// Applies every operation, reporting each outcome to `on_report`.
    /// Failed operations are counted and the run carries on, unless the
    /// runner was built to stop on the first error.
    pub fn run(
        &mut self,
        operations: &[Operation],
        mut on_report: impl FnMut(&Report<'_>),
    ) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::default();

        for (index, operation) in operations.iter().enumerate() {
            debug!("Applying operation #{}: {}", index + 1, operation);
            let report = Report {
                index,
                operation,
                outcome: operation.apply(&mut self.file_system),
            };
            on_report(&report);
            summary.applied += 1;

            if let Outcome::Failed(error) = report.outcome {
                summary.failed += 1;
                warn!("Operation #{} ({}) failed: {}", index + 1, operation, error);
                if self.stop_on_error {
                    return Err(RunnerError::OperationFailed {
                        index: index + 1,
                        operation: operation.to_string(),
                        source: error,
                    });
                }
            }
        }

        info!(
            "Applied {} operations, {} failed",
            summary.applied, summary.failed
        );
        Ok(summary)
    }
}

#[derive(Debug, Snafu)]
pub enum RunnerError {
    #[snafu(display("Operation #{} ({}) failed", index, operation))]
    OperationFailed {
        index: usize,
        operation: String,
        source: FileSystemError,
    },
}
