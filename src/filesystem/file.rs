use snafu::ensure;

use super::entity::{Entity, Metadata};
use super::error::{InvalidSizeSnafu, Result};
use super::render::{Listing, RenderedEntry};

/// A leaf entity with a fixed, positive size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    metadata: Metadata,
    size: u64,
}

impl File {
    pub fn new(name: impl Into<String>, size: i64) -> Result<Self> {
        let metadata = Metadata::new(name)?;
        ensure!(size > 0, InvalidSizeSnafu { size });

        Ok(Self {
            metadata,
            size: size.unsigned_abs(),
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Entity for File {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn render_into(&self, depth: usize, listing: &mut Listing) {
        listing.push(
            depth,
            RenderedEntry::File {
                name: self.name().clone(),
                size: self.size,
                created: self.creation_time(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::filesystem::error::FileSystemError;

    #[test]
    fn file_creation() {
        let file = File::new("file.txt", 100).unwrap();
        assert_eq!(file.name().as_str(), "file.txt");
        assert_eq!(file.size(), 100);
    }

    #[test]
    fn file_creation_with_long_name() {
        let result = File::new("a".repeat(33), 100);
        assert!(matches!(result, Err(FileSystemError::NameTooLong { .. })));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn file_creation_with_non_positive_size(#[case] size: i64) {
        let result = File::new("file.txt", size);
        assert_eq!(result, Err(FileSystemError::InvalidSize { size }));
    }

    #[test]
    fn name_is_validated_before_size() {
        let result = File::new("a".repeat(40), -5);
        assert!(matches!(result, Err(FileSystemError::NameTooLong { .. })));
    }

    #[test]
    fn renders_as_a_single_line() {
        let file = File::new("notes.md", 42).unwrap();
        let listing = file.render(2);

        assert_eq!(listing.lines().len(), 1);
        let text = listing.to_string();
        assert!(text.starts_with("\t\tFile: notes.md, Size: 42, Created: "));
    }
}
