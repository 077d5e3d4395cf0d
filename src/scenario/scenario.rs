use std::path::Path;
use std::string::FromUtf8Error;

use clap::ValueEnum;
use compio::fs;
use dirtree::filesystem::{DeleteMatch, FileSystemConfig, NameScope};
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use super::operation::{Operation, field, scalar_string};

const CONFIG_KEY: &str = "config";
const OPERATIONS_KEY: &str = "operations";
const STOP_ON_ERROR_KEY: &str = "stop_on_error";

/// Settings layered over [`FileSystemConfig`], from a scenario file or the
/// command line. Unset fields leave the underlying value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub separator: Option<char>,
    pub delete_match: Option<DeleteMatch>,
    pub name_scope: Option<NameScope>,
}

impl ConfigOverrides {
    pub fn apply_to(&self, mut config: FileSystemConfig) -> FileSystemConfig {
        if let Some(separator) = self.separator {
            config = config.with_separator(separator);
        }
        if let Some(delete_match) = self.delete_match {
            config = config.with_delete_match(delete_match);
        }
        if let Some(name_scope) = self.name_scope {
            config = config.with_name_scope(name_scope);
        }
        config
    }

    fn from_yaml<'input>(
        config: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    ) -> Result<Self, ScenarioError> {
        let separator = match setting(config, "separator")? {
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(separator), None) => Some(separator),
                    _ => return InvalidSettingSnafu { key: "separator", value }.fail(),
                }
            }
            None => None,
        };

        Ok(Self {
            separator,
            delete_match: value_enum_setting(config, "delete_match")?,
            name_scope: value_enum_setting(config, "name_scope")?,
        })
    }
}

/// A parsed scenario file: optional settings plus the operations to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    pub overrides: ConfigOverrides,
    pub stop_on_error: bool,
    pub operations: Vec<Operation>,
}

impl Scenario {
    pub async fn read(path: &Path) -> Result<Self, ScenarioError> {
        debug!("Opening scenario file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read scenario file: {} bytes", contents.len());

        contents.as_str().try_into()
    }

    fn parse_operations<'input>(
        top_level: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    ) -> Result<Vec<Operation>, ScenarioError> {
        let Some(operations) = field(top_level, OPERATIONS_KEY) else {
            return Ok(Vec::new());
        };

        let operations = operations
            .as_sequence()
            .context(OperationsNotSequenceSnafu)?
            .iter()
            .filter_map(Operation::from_yaml)
            .collect::<Vec<_>>();

        Ok(operations)
    }

    fn parse_stop_on_error<'input>(
        top_level: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    ) -> Result<bool, ScenarioError> {
        match field(top_level, STOP_ON_ERROR_KEY) {
            None | Some(Yaml::Value(Scalar::Null)) => Ok(false),
            Some(Yaml::Value(Scalar::Boolean(stop))) => Ok(*stop),
            Some(other) => InvalidSettingSnafu {
                key: STOP_ON_ERROR_KEY,
                value: format!("{:?}", other),
            }
            .fail(),
        }
    }
}

impl TryFrom<&str> for Scenario {
    type Error = ScenarioError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedScenarioSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let overrides = match field(top_level, CONFIG_KEY) {
            Some(config) => {
                ConfigOverrides::from_yaml(config.as_mapping().context(ConfigNotMapSnafu)?)?
            }
            None => ConfigOverrides::default(),
        };
        let stop_on_error = Self::parse_stop_on_error(top_level)?;
        let operations = Self::parse_operations(top_level)?;
        debug!("Parsed {} operations", operations.len());

        Ok(Scenario {
            overrides,
            stop_on_error,
            operations,
        })
    }
}

fn setting<'input>(
    config: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &'static str,
) -> Result<Option<String>, ScenarioError> {
    match field(config, key) {
        None | Some(Yaml::Value(Scalar::Null)) => Ok(None),
        Some(value) => scalar_string(value).map(Some).context(InvalidSettingSnafu {
            key,
            value: format!("{:?}", value),
        }),
    }
}

fn value_enum_setting<'input, T: ValueEnum>(
    config: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &'static str,
) -> Result<Option<T>, ScenarioError> {
    match setting(config, key)? {
        Some(value) => match T::from_str(&value, true) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => InvalidSettingSnafu { key, value }.fail(),
        },
        None => Ok(None),
    }
}

#[derive(Debug, Snafu)]
pub enum ScenarioError {
    #[snafu(display("Failed to read the scenario file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Scenario file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the scenario file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted scenario file"))]
    MalformedScenario,
    #[snafu(display("Top level of the scenario should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config section should be a map"))]
    ConfigNotMap,
    #[snafu(display("Operations section should be a sequence"))]
    OperationsNotSequence,
    #[snafu(display("Invalid value for '{}': {}", key, value))]
    InvalidSetting { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[compio::test]
    async fn scenario_returns_error_on_nonexistent_file() {
        let result = Scenario::read(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(ScenarioError::ReadError { .. })));
    }

    #[compio::test]
    async fn scenario_is_read_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "operations:\n  - {{ op: add_dir, name: root }}\n  - {{ op: show }}"
        )
        .expect("Failed to write to temp file");

        let scenario = Scenario::read(file.path()).await.unwrap();
        assert_eq!(scenario.operations.len(), 2);
        assert_eq!(scenario.operations[1], Operation::Show);
    }

    #[compio::test]
    async fn scenario_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&[0xff, 0xfe, 0x00])
            .expect("Failed to write to temp file");

        let result = Scenario::read(file.path()).await;
        assert!(matches!(result, Err(ScenarioError::EncodingError { .. })));
    }

    #[test]
    fn scenario_returns_error_on_invalid_yaml() {
        let result: Result<Scenario, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(ScenarioError::ParseError { .. })));
    }

    #[test]
    fn scenario_returns_error_on_empty_file() {
        let result: Result<Scenario, _> = "".try_into();
        assert!(matches!(result, Err(ScenarioError::MalformedScenario)));
    }

    #[test]
    fn scenario_returns_error_when_top_level_is_not_map() {
        let result: Result<Scenario, _> = "- item1\n- item2".try_into();
        assert!(matches!(result, Err(ScenarioError::TopLevelNotMap)));
    }

    #[test]
    fn scenario_returns_error_when_operations_is_not_sequence() {
        let result: Result<Scenario, _> = "operations:\n  op: show".try_into();
        assert!(matches!(result, Err(ScenarioError::OperationsNotSequence)));
    }

    #[test]
    fn scenario_returns_error_when_config_is_not_map() {
        let result: Result<Scenario, _> = "config: [1, 2]".try_into();
        assert!(matches!(result, Err(ScenarioError::ConfigNotMap)));
    }

    #[test]
    fn scenario_handles_missing_operations_section() {
        let scenario: Scenario = "other: value".try_into().unwrap();
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn scenario_skips_invalid_operations() {
        let source = r#"
operations:
  - { op: add_dir, name: root }
  - { op: teleport, name: root }
  - "not a mapping"
  - { op: add_file, parent: root, name: a.txt, size: 5 }
"#;
        let scenario: Scenario = source.try_into().unwrap();
        assert_eq!(
            scenario.operations,
            vec![
                Operation::AddDirectory {
                    parent: "".into(),
                    name: "root".into()
                },
                Operation::AddFile {
                    parent: "root".into(),
                    name: "a.txt".into(),
                    size: 5
                },
            ]
        );
    }

    #[test]
    fn scenario_reads_config_and_stop_on_error() {
        let source = r#"
config:
  separator: "/"
  delete_match: all-subtrees
  name_scope: global
stop_on_error: true
"#;
        let scenario: Scenario = source.try_into().unwrap();
        assert!(scenario.stop_on_error);
        assert_eq!(
            scenario.overrides,
            ConfigOverrides {
                separator: Some('/'),
                delete_match: Some(DeleteMatch::AllSubtrees),
                name_scope: Some(NameScope::Global),
            }
        );
    }

    #[test]
    fn scenario_rejects_unknown_setting_values() {
        let result: Result<Scenario, _> = "config:\n  name_scope: galaxy".try_into();
        assert!(matches!(
            result,
            Err(ScenarioError::InvalidSetting { ref key, .. }) if key == "name_scope"
        ));

        let result: Result<Scenario, _> = "config:\n  separator: '::'".try_into();
        assert!(matches!(result, Err(ScenarioError::InvalidSetting { .. })));

        let result: Result<Scenario, _> = "stop_on_error: sometimes".try_into();
        assert!(matches!(result, Err(ScenarioError::InvalidSetting { .. })));
    }

    #[test]
    fn overrides_only_touch_set_fields() {
        let overrides = ConfigOverrides {
            separator: Some('/'),
            ..ConfigOverrides::default()
        };
        let config = overrides.apply_to(
            FileSystemConfig::default().with_name_scope(NameScope::Global),
        );

        assert_eq!(config.separator, '/');
        assert_eq!(config.name_scope, NameScope::Global);
        assert_eq!(config.delete_match, DeleteMatch::FirstSubtree);
    }
}
