use derive_more::Display;
use snafu::Snafu;

/// The two kinds of entity a directory can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntityKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FileSystemError {
    #[snafu(display("Name '{}' is longer than {} characters", name, max))]
    NameTooLong { name: String, max: usize },
    #[snafu(display("File size must be positive, got {}", size))]
    InvalidSize { size: i64 },
    #[snafu(display("Invalid argument: {}", reason))]
    InvalidArgument { reason: String },
    #[snafu(display("A {} named '{}' already exists", kind, name))]
    DuplicateName { name: String, kind: EntityKind },
    #[snafu(display("Parent directory '{}' not found", path))]
    ParentNotFound { path: String },
    #[snafu(display("No file or directory named '{}'", name))]
    NotFound { name: String },
}

pub type Result<T, E = FileSystemError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_value() {
        let too_long = FileSystemError::NameTooLong {
            name: "x".repeat(33),
            max: 32,
        };
        let duplicate = FileSystemError::DuplicateName {
            name: "docs".into(),
            kind: EntityKind::Directory,
        };
        let missing_parent = FileSystemError::ParentNotFound {
            path: "root\\missing".into(),
        };

        assert!(too_long.to_string().contains("longer than 32"));
        assert_eq!(
            duplicate.to_string(),
            "A directory named 'docs' already exists"
        );
        assert!(missing_parent.to_string().contains("root\\missing"));
    }
}
