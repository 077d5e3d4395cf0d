use std::borrow::Cow;
use std::fmt;

use dirtree::filesystem::{FileSystem, FileSystemError, Listing};
use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};
use tracing::{debug, warn};

/// A single step of a scenario, applied to a [`FileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddFile {
        parent: String,
        name: String,
        size: i64,
    },
    AddDirectory {
        parent: String,
        name: String,
    },
    FindDirectory {
        path: String,
    },
    FileSize {
        name: String,
    },
    BiggestFile,
    Delete {
        name: String,
    },
    Show,
}

impl Operation {
    /// Parses one entry of the `operations` sequence. Entries that cannot be
    /// understood are skipped with a warning.
    pub fn from_yaml(node: &Yaml) -> Option<Self> {
        let Some(fields) = node.as_mapping() else {
            warn!("Skipping operation that is not a mapping: {:?}", node);
            return None;
        };
        let Some(op) = string_field(fields, "op") else {
            warn!("Skipping operation without an 'op' key: {:?}", fields);
            return None;
        };
        debug!("Parsing operation '{}'", op);

        match op.as_str() {
            "add_file" => Some(Operation::AddFile {
                parent: string_field(fields, "parent").unwrap_or_default(),
                name: required(fields, "name", &op)?,
                size: integer_field(fields, "size").or_else(|| {
                    warn!("Operation '{}' needs an integer 'size'. Skipping.", op);
                    None
                })?,
            }),
            "add_dir" | "add_directory" => Some(Operation::AddDirectory {
                parent: string_field(fields, "parent").unwrap_or_default(),
                name: required(fields, "name", &op)?,
            }),
            "find" => Some(Operation::FindDirectory {
                path: required(fields, "path", &op)?,
            }),
            "size" => Some(Operation::FileSize {
                name: required(fields, "name", &op)?,
            }),
            "biggest" => Some(Operation::BiggestFile),
            "delete" => Some(Operation::Delete {
                name: required(fields, "name", &op)?,
            }),
            "show" => Some(Operation::Show),
            _ => {
                warn!("Unknown operation '{}'. Skipping.", op);
                None
            }
        }
    }

    pub fn apply(&self, file_system: &mut FileSystem) -> Outcome {
        let result = match self {
            Operation::AddFile { parent, name, size } => file_system
                .add_file(parent, name, *size)
                .map(|()| Outcome::Done),
            Operation::AddDirectory { parent, name } => file_system
                .add_directory(parent, name)
                .map(|()| Outcome::Done),
            Operation::FindDirectory { path } => Ok(Outcome::Directory {
                path: path.clone(),
                found: file_system.find_directory(path).is_some(),
            }),
            Operation::FileSize { name } => {
                file_system.get_file_size(name).map(|size| Outcome::Size {
                    name: name.clone(),
                    size,
                })
            }
            Operation::BiggestFile => Ok(Outcome::Biggest(
                file_system.biggest_file_name().map(str::to_string),
            )),
            Operation::Delete { name } => file_system.delete(name).map(|()| Outcome::Done),
            Operation::Show => Ok(Outcome::Listing(file_system.render())),
        };
        result.unwrap_or_else(Outcome::Failed)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddFile { parent, name, size } => {
                write!(f, "add_file '{}' ({} bytes) in '{}'", name, size, parent)
            }
            Operation::AddDirectory { parent, name } => {
                write!(f, "add_dir '{}' in '{}'", name, parent)
            }
            Operation::FindDirectory { path } => write!(f, "find '{}'", path),
            Operation::FileSize { name } => write!(f, "size '{}'", name),
            Operation::BiggestFile => f.write_str("biggest"),
            Operation::Delete { name } => write!(f, "delete '{}'", name),
            Operation::Show => f.write_str("show"),
        }
    }
}

/// What applying an operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Directory { path: String, found: bool },
    Size { name: String, size: u64 },
    Biggest(Option<String>),
    Listing(Listing),
    Failed(FileSystemError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => f.write_str("ok"),
            Outcome::Directory { path, found: true } => write!(f, "found '{}'", path),
            Outcome::Directory { path, found: false } => write!(f, "no directory at '{}'", path),
            Outcome::Size { name, size } => write!(f, "'{}' is {} bytes", name, size),
            Outcome::Biggest(Some(name)) => write!(f, "biggest file is '{}'", name),
            Outcome::Biggest(None) => f.write_str("no files"),
            Outcome::Listing(listing) => write!(f, "{}", listing),
            Outcome::Failed(error) => write!(f, "error: {}", error),
        }
    }
}

pub(crate) fn field<'a, 'input>(
    fields: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &str,
) -> Option<&'a Yaml<'input>> {
    fields.get(&Yaml::Value(Scalar::String(Cow::Owned(key.to_owned()))))
}

/// Reads a scalar as text. Numbers are accepted so names like `2024` work
/// unquoted; `null` reads as absent.
pub(crate) fn scalar_string(node: &Yaml<'_>) -> Option<String> {
    match node {
        Yaml::Value(Scalar::String(value)) => Some(value.to_string()),
        Yaml::Value(Scalar::Integer(value)) => Some(value.to_string()),
        _ => None,
    }
}

fn string_field<'input>(
    fields: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &str,
) -> Option<String> {
    field(fields, key).and_then(scalar_string)
}

fn integer_field<'input>(
    fields: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &str,
) -> Option<i64> {
    match field(fields, key)? {
        Yaml::Value(Scalar::Integer(value)) => Some(*value),
        _ => None,
    }
}

fn required<'input>(
    fields: &LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    key: &str,
    op: &str,
) -> Option<String> {
    let value = string_field(fields, key);
    if value.is_none() {
        warn!("Operation '{}' needs a '{}'. Skipping.", op, key);
    }
    value
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use saphyr::LoadableYamlNode;

    use super::*;

    fn parse(source: &str) -> Option<Operation> {
        let documents = Yaml::load_from_str(source).unwrap();
        Operation::from_yaml(&documents[0])
    }

    #[rstest]
    #[case(
        "{ op: add_file, parent: root, name: a.txt, size: 100 }",
        Operation::AddFile { parent: "root".into(), name: "a.txt".into(), size: 100 }
    )]
    #[case(
        "{ op: add_file, name: top.txt, size: 1 }",
        Operation::AddFile { parent: "".into(), name: "top.txt".into(), size: 1 }
    )]
    #[case(
        "{ op: add_dir, parent: \"\", name: root }",
        Operation::AddDirectory { parent: "".into(), name: "root".into() }
    )]
    #[case(
        "{ op: add_directory, parent: root, name: 2024 }",
        Operation::AddDirectory { parent: "root".into(), name: "2024".into() }
    )]
    #[case("{ op: find, path: 'root\\docs' }", Operation::FindDirectory { path: "root\\docs".into() })]
    #[case("{ op: size, name: a.txt }", Operation::FileSize { name: "a.txt".into() })]
    #[case("{ op: biggest }", Operation::BiggestFile)]
    #[case("{ op: delete, name: a.txt }", Operation::Delete { name: "a.txt".into() })]
    #[case("{ op: show }", Operation::Show)]
    fn parses_known_operations(#[case] source: &str, #[case] expected: Operation) {
        assert_eq!(parse(source), Some(expected));
    }

    #[rstest]
    #[case("{ op: format_disk }")]
    #[case("{ name: a.txt }")]
    #[case("{ op: add_file, name: a.txt }")]
    #[case("{ op: add_file, name: a.txt, size: big }")]
    #[case("{ op: delete }")]
    #[case("just a string")]
    #[case("[1, 2]")]
    fn skips_malformed_operations(#[case] source: &str) {
        assert_eq!(parse(source), None);
    }

    #[test]
    fn apply_reports_values_and_failures() {
        let mut file_system = FileSystem::new();

        let add = Operation::AddFile {
            parent: "".into(),
            name: "a.txt".into(),
            size: 10,
        };
        assert_eq!(add.apply(&mut file_system), Outcome::Done);

        let size = Operation::FileSize {
            name: "a.txt".into(),
        };
        assert_eq!(
            size.apply(&mut file_system),
            Outcome::Size {
                name: "a.txt".into(),
                size: 10
            }
        );

        assert_eq!(
            Operation::BiggestFile.apply(&mut file_system),
            Outcome::Biggest(Some("a.txt".into()))
        );

        let missing = Operation::Delete {
            name: "nope".into(),
        };
        let outcome = missing.apply(&mut file_system);
        assert!(outcome.is_failure());
        assert_eq!(outcome.to_string(), "error: No file or directory named 'nope'");
    }

    #[test]
    fn find_reports_presence() {
        let mut file_system = FileSystem::new();
        file_system.add_directory("", "root").unwrap();

        let found = Operation::FindDirectory {
            path: "root".into(),
        };
        let missing = Operation::FindDirectory {
            path: "root\\docs".into(),
        };
        assert_eq!(found.apply(&mut file_system).to_string(), "found 'root'");
        assert_eq!(
            missing.apply(&mut file_system).to_string(),
            "no directory at 'root\\docs'"
        );
    }
}
