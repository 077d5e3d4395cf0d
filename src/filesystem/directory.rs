use hashlink::LinkedHashMap;
use snafu::ensure;

use super::entity::{Entity, EntityName, Metadata};
use super::error::{DuplicateNameSnafu, EntityKind, Result};
use super::file::File;
use super::render::{Listing, RenderedEntry};

/// A composite entity owning its files and subdirectories outright.
///
/// Files and subdirectories live in separate maps, so a file and a
/// subdirectory may share a name. Both maps keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    metadata: Metadata,
    subdirectories: LinkedHashMap<EntityName, Directory>,
    files: LinkedHashMap<EntityName, File>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            metadata: Metadata::new(name)?,
            subdirectories: LinkedHashMap::new(),
            files: LinkedHashMap::new(),
        })
    }

    pub fn add_file(&mut self, name: &str, size: i64) -> Result<&File> {
        ensure!(
            !self.files.contains_key(name),
            DuplicateNameSnafu {
                name,
                kind: EntityKind::File,
            }
        );
        self.insert_file(File::new(name, size)?)
    }

    pub fn add_subdirectory(&mut self, name: &str) -> Result<&mut Directory> {
        ensure!(
            !self.subdirectories.contains_key(name),
            DuplicateNameSnafu {
                name,
                kind: EntityKind::Directory,
            }
        );
        self.insert_subdirectory(Directory::new(name)?)
    }

    /// Stores an already constructed file, failing if the name is taken.
    pub fn insert_file(&mut self, file: File) -> Result<&File> {
        let name = file.name().clone();
        ensure!(
            !self.files.contains_key(&name),
            DuplicateNameSnafu {
                name: name.as_str(),
                kind: EntityKind::File,
            }
        );
        Ok(&*self.files.entry(name).or_insert(file))
    }

    /// Stores an already constructed directory, failing if the name is taken.
    pub fn insert_subdirectory(&mut self, directory: Directory) -> Result<&mut Directory> {
        let name = directory.name().clone();
        ensure!(
            !self.subdirectories.contains_key(&name),
            DuplicateNameSnafu {
                name: name.as_str(),
                kind: EntityKind::Directory,
            }
        );
        Ok(self.subdirectories.entry(name).or_insert(directory))
    }

    /// Removes a direct child file. Absent names are a no-op.
    pub fn remove_file(&mut self, name: &str) -> Option<File> {
        self.files.remove(name)
    }

    /// Removes a direct subdirectory and everything below it. Absent names
    /// are a no-op.
    pub fn remove_subdirectory(&mut self, name: &str) -> Option<Directory> {
        self.subdirectories.remove(name)
    }

    pub fn get_file(&self, name: &str) -> Option<&File> {
        self.files.get(name)
    }

    pub fn get_subdirectory(&self, name: &str) -> Option<&Directory> {
        self.subdirectories.get(name)
    }

    pub fn get_subdirectory_mut(&mut self, name: &str) -> Option<&mut Directory> {
        self.subdirectories.get_mut(name)
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn subdirectories(&self) -> impl Iterator<Item = &Directory> {
        self.subdirectories.values()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Depth-first search by name over this directory's subtree. Files of a
    /// directory are checked before descending into its subdirectories.
    pub fn find_file(&self, name: &str) -> Option<&File> {
        self.files.get(name).or_else(|| {
            self.subdirectories
                .values()
                .find_map(|directory| directory.find_file(name))
        })
    }

    /// Whether any file or directory below this one is called `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.files.contains_key(name)
            || self.subdirectories.contains_key(name)
            || self
                .subdirectories
                .values()
                .any(|directory| directory.contains_name(name))
    }

    /// Visits every file in the subtree in traversal order.
    pub fn for_each_file<'a>(&'a self, visit: &mut impl FnMut(&'a File)) {
        for file in self.files.values() {
            visit(file);
        }
        for directory in self.subdirectories.values() {
            directory.for_each_file(visit);
        }
    }

    /// Removes every file and subdirectory named `name` at any depth below
    /// this directory. Matches at this level are removed before descending,
    /// and descent continues into every remaining subdirectory.
    pub(crate) fn remove_matching(&mut self, name: &str, removed: &mut Removed) -> bool {
        let mut found = false;
        if let Some(file) = self.files.remove(name) {
            removed.record_file(&file);
            found = true;
        }
        if let Some(directory) = self.subdirectories.remove(name) {
            removed.record_directory(&directory);
            found = true;
        }
        for directory in self.subdirectories.values_mut() {
            if directory.remove_matching(name, removed) {
                found = true;
            }
        }
        found
    }
}

impl Entity for Directory {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn render_into(&self, depth: usize, listing: &mut Listing) {
        listing.push(
            depth,
            RenderedEntry::Directory {
                name: self.name().clone(),
                created: self.creation_time(),
            },
        );
        for file in self.files.values() {
            file.render_into(depth + 1, listing);
        }
        for directory in self.subdirectories.values() {
            directory.render_into(depth + 1, listing);
        }
    }
}

/// What a delete took out of the tree, cascaded subtrees included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removed {
    entities: usize,
    files: Vec<EntityName>,
}

impl Removed {
    pub fn record_file(&mut self, file: &File) {
        self.entities += 1;
        self.files.push(file.name().clone());
    }

    pub fn record_directory(&mut self, directory: &Directory) {
        self.entities += 1;
        for subdirectory in directory.subdirectories() {
            self.record_directory(subdirectory);
        }
        for file in directory.files() {
            self.record_file(file);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities == 0
    }

    pub fn entities(&self) -> usize {
        self.entities
    }

    pub fn contains_file(&self, name: &str) -> bool {
        self.files.iter().any(|file_name| file_name.as_str() == name)
    }
}
