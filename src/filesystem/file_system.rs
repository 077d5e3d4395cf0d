use std::fmt;

use hashlink::LinkedHashMap;
use snafu::{OptionExt, ensure};
use tracing::debug;

use super::biggest_file::BiggestFile;
use super::config::{DeleteMatch, FileSystemConfig, NameScope};
use super::directory::{Directory, Removed};
use super::entity::{Entity, EntityName};
use super::error::{
    DuplicateNameSnafu, EntityKind, InvalidArgumentSnafu, NotFoundSnafu, ParentNotFoundSnafu,
    Result,
};
use super::file::File;
use super::path;
use super::render::Listing;

/// Root of the tree: top-level files and directories plus a cache of the
/// largest file anywhere below.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    config: FileSystemConfig,
    directories: LinkedHashMap<EntityName, Directory>,
    files: LinkedHashMap<EntityName, File>,
    biggest: BiggestFile,
}

impl FileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FileSystemConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &FileSystemConfig {
        &self.config
    }

    /// Adds a file under `parent_path`, or at the top level when the path is
    /// empty.
    pub fn add_file(&mut self, parent_path: &str, file_name: &str, file_size: i64) -> Result<()> {
        ensure!(
            !file_name.is_empty(),
            InvalidArgumentSnafu {
                reason: "file name cannot be empty",
            }
        );
        ensure!(
            file_size > 0,
            InvalidArgumentSnafu {
                reason: format!("file size must be positive, got {}", file_size),
            }
        );

        let file = File::new(file_name, file_size)?;
        self.ensure_parent_exists(parent_path)?;
        self.ensure_name_available(file_name, EntityKind::File)?;

        let stored: &File = if parent_path.is_empty() {
            ensure!(
                !self.files.contains_key(file_name),
                DuplicateNameSnafu {
                    name: file_name,
                    kind: EntityKind::File,
                }
            );
            &*self.files.entry(file.name().clone()).or_insert(file)
        } else {
            resolve_mut(&mut self.directories, parent_path, self.config.separator)
                .context(ParentNotFoundSnafu { path: parent_path })?
                .insert_file(file)?
        };
        debug!(
            "Added file '{}' ({} bytes) under '{}'",
            file_name, file_size, parent_path
        );

        if self.biggest.observe(stored) {
            debug!("'{}' is now the biggest file", file_name);
        }
        Ok(())
    }

    /// Adds an empty directory under `parent_path`, or at the top level when
    /// the path is empty.
    pub fn add_directory(&mut self, parent_path: &str, dir_name: &str) -> Result<()> {
        ensure!(
            !dir_name.is_empty(),
            InvalidArgumentSnafu {
                reason: "directory name cannot be empty",
            }
        );

        let directory = Directory::new(dir_name)?;
        self.ensure_parent_exists(parent_path)?;
        self.ensure_name_available(dir_name, EntityKind::Directory)?;

        if parent_path.is_empty() {
            ensure!(
                !self.directories.contains_key(dir_name),
                DuplicateNameSnafu {
                    name: dir_name,
                    kind: EntityKind::Directory,
                }
            );
            self.directories
                .insert(directory.name().clone(), directory);
        } else {
            resolve_mut(&mut self.directories, parent_path, self.config.separator)
                .context(ParentNotFoundSnafu { path: parent_path })?
                .insert_subdirectory(directory)?;
        }
        debug!("Added directory '{}' under '{}'", dir_name, parent_path);
        Ok(())
    }

    /// Walks `path` segment by segment from the top level.
    pub fn find_directory(&self, path: &str) -> Option<&Directory> {
        let segments = path::segments(path, self.config.separator)?;
        let (first, rest) = segments.split_first()?;
        let mut current = self.directories.get(*first)?;
        for segment in rest {
            current = current.get_subdirectory(segment)?;
        }
        Some(current)
    }

    /// Looks a file up by name anywhere in the tree: top-level files first,
    /// then each top-level directory depth-first. The first match wins.
    pub fn get_file_size(&self, file_name: &str) -> Result<u64> {
        self.files
            .get(file_name)
            .or_else(|| {
                self.directories
                    .values()
                    .find_map(|directory| directory.find_file(file_name))
            })
            .map(File::size)
            .context(NotFoundSnafu { name: file_name })
    }

    pub fn biggest_file_name(&self) -> Option<&str> {
        self.biggest.name().map(EntityName::as_str)
    }

    pub fn max_file_size(&self) -> Option<u64> {
        (!self.biggest.is_empty()).then(|| self.biggest.size())
    }

    /// Deletes every file or directory called `name`.
    ///
    /// Top-level files are checked first, then the subtrees of the top-level
    /// directories (how many depends on [`DeleteMatch`]), then the top-level
    /// directories themselves. Deleting a directory takes its whole subtree
    /// with it.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let mut removed = Removed::default();

        if let Some(file) = self.files.remove(name) {
            removed.record_file(&file);
        }
        for directory in self.directories.values_mut() {
            if directory.remove_matching(name, &mut removed)
                && self.config.delete_match == DeleteMatch::FirstSubtree
            {
                break;
            }
        }
        if let Some(directory) = self.directories.remove(name) {
            removed.record_directory(&directory);
        }

        ensure!(!removed.is_empty(), NotFoundSnafu { name });
        debug!("Deleted {} entities named '{}'", removed.entities(), name);

        let invalidated = self.biggest.is_named(name)
            || self
                .biggest
                .name()
                .is_some_and(|biggest| removed.contains_file(biggest));
        if invalidated {
            self.recompute_biggest();
        }
        Ok(())
    }

    /// Every file in the tree: top-level files, then each top-level
    /// directory depth-first.
    pub fn all_files(&self) -> Vec<&File> {
        let mut files: Vec<&File> = self.files.values().collect();
        for directory in self.directories.values() {
            directory.for_each_file(&mut |file| files.push(file));
        }
        files
    }

    /// Top-level files first, then each top-level directory with its subtree.
    pub fn render(&self) -> Listing {
        let mut listing = Listing::default();
        for file in self.files.values() {
            file.render_into(0, &mut listing);
        }
        for directory in self.directories.values() {
            directory.render_into(0, &mut listing);
        }
        listing
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.values()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    fn contains_name(&self, name: &str) -> bool {
        self.files.contains_key(name)
            || self.directories.contains_key(name)
            || self
                .directories
                .values()
                .any(|directory| directory.contains_name(name))
    }

    fn ensure_parent_exists(&self, parent_path: &str) -> Result<()> {
        if !parent_path.is_empty() {
            self.find_directory(parent_path)
                .context(ParentNotFoundSnafu { path: parent_path })?;
        }
        Ok(())
    }

    fn ensure_name_available(&self, name: &str, kind: EntityKind) -> Result<()> {
        if self.config.name_scope == NameScope::Global {
            ensure!(!self.contains_name(name), DuplicateNameSnafu { name, kind });
        }
        Ok(())
    }

    fn recompute_biggest(&mut self) {
        self.biggest = BiggestFile::from_files(self.all_files());
        match self.biggest.name() {
            Some(name) => debug!(
                "Recomputed biggest file: '{}' ({} bytes)",
                name,
                self.biggest.size()
            ),
            None => debug!("No files left, biggest file cleared"),
        }
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

fn resolve_mut<'a>(
    directories: &'a mut LinkedHashMap<EntityName, Directory>,
    path: &str,
    separator: char,
) -> Option<&'a mut Directory> {
    let segments = path::segments(path, separator)?;
    let (first, rest) = segments.split_first()?;
    let mut current = directories.get_mut(*first)?;
    for segment in rest {
        current = current.get_subdirectory_mut(segment)?;
    }
    Some(current)
}
