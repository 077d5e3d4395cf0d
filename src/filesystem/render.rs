//! Plain-data rendering of a tree, so listings can be inspected in tests and
//! printed by whoever owns the output stream.

use std::fmt;
use std::time::SystemTime;

use super::entity::EntityName;
use crate::ext::SystemTimeExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedEntry {
    File {
        name: EntityName,
        size: u64,
        created: SystemTime,
    },
    Directory {
        name: EntityName,
        created: SystemTime,
    },
}

impl RenderedEntry {
    pub fn name(&self) -> &EntityName {
        match self {
            RenderedEntry::File { name, .. } | RenderedEntry::Directory { name, .. } => name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, RenderedEntry::Directory { .. })
    }
}

impl fmt::Display for RenderedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedEntry::File {
                name,
                size,
                created,
            } => write!(
                f,
                "File: {}, Size: {}, Created: {}",
                name,
                size,
                created.to_display_string()
            ),
            RenderedEntry::Directory { name, created } => write!(
                f,
                "Directory: {}, Created: {}",
                name,
                created.to_display_string()
            ),
        }
    }
}

/// One line of a listing: an entry and how deeply it is nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub depth: usize,
    pub entry: RenderedEntry,
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str("\t")?;
        }
        write!(f, "{}", self.entry)
    }
}

/// Ordered lines produced by rendering a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    lines: Vec<RenderLine>,
}

impl Listing {
    pub fn push(&mut self, depth: usize, entry: RenderedEntry) {
        self.lines.push(RenderLine { depth, entry });
    }

    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderLine> {
        self.lines.iter()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
