use std::path::PathBuf;

use clap::Parser;
use dirtree::filesystem::{DeleteMatch, NameScope};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Apply a YAML scenario to an in-memory file system")]
pub struct Cli {
    /// Scenario file listing the operations to apply
    pub scenario: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Path separator, overriding the scenario's setting
    #[clap(long)]
    pub separator: Option<char>,
    #[clap(long, value_enum)]
    pub delete_match: Option<DeleteMatch>,
    #[clap(long, value_enum)]
    pub name_scope: Option<NameScope>,

    /// Abort on the first failing operation
    #[clap(long)]
    pub stop_on_error: bool,
    #[clap(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_to_the_scenario() {
        let cli = Cli::try_parse_from(["dirtree", "scenario.yaml"]).unwrap();
        assert_eq!(cli.scenario, PathBuf::from("scenario.yaml"));
        assert!(matches!(cli.log_level, LogLevel::Warn));
        assert_eq!(cli.separator, None);
        assert_eq!(cli.delete_match, None);
        assert!(!cli.stop_on_error);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "dirtree",
            "s.yaml",
            "--separator",
            "/",
            "--delete-match",
            "all-subtrees",
            "--name-scope",
            "global",
            "-l",
            "debug",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.separator, Some('/'));
        assert_eq!(cli.delete_match, Some(DeleteMatch::AllSubtrees));
        assert_eq!(cli.name_scope, Some(NameScope::Global));
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert!(cli.no_color);
    }

    #[test]
    fn rejects_multi_character_separator() {
        assert!(Cli::try_parse_from(["dirtree", "s.yaml", "--separator", "::"]).is_err());
    }
}
