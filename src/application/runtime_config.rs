use std::path::PathBuf;

use crate::cli::Cli;
use crate::scenario::ConfigOverrides;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scenario: PathBuf,
    pub overrides: ConfigOverrides,
    pub stop_on_error: bool,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            scenario: cli.scenario,
            overrides: ConfigOverrides {
                separator: cli.separator,
                delete_match: cli.delete_match,
                name_scope: cli.name_scope,
            },
            stop_on_error: cli.stop_on_error,
            color: !cli.no_color,
        }
    }
}
