use super::entity::{Entity, EntityName};
use super::file::File;

/// Cached name and size of the largest file in the tree.
///
/// Grows greedily on insertion and is rebuilt from scratch only when a
/// delete removes the file it points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiggestFile {
    current: Option<(EntityName, u64)>,
}

impl BiggestFile {
    /// Builds the cache from files in traversal order. On ties the first
    /// file seen is kept.
    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a File>) -> Self {
        let mut biggest = Self::default();
        for file in files {
            biggest.observe(file);
        }
        biggest
    }

    /// Takes `file` as the new maximum if it is strictly larger. Returns
    /// whether the cache changed.
    pub fn observe(&mut self, file: &File) -> bool {
        if file.size() > self.size() {
            self.current = Some((file.name().clone(), file.size()));
            true
        } else {
            false
        }
    }

    pub fn name(&self) -> Option<&EntityName> {
        self.current.as_ref().map(|(name, _)| name)
    }

    /// Size of the cached file, or zero when there is none.
    pub fn size(&self) -> u64 {
        self.current.as_ref().map_or(0, |(_, size)| *size)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name().is_some_and(|current| current.as_str() == name)
    }
}
