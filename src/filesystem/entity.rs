use std::borrow::Borrow;
use std::time::SystemTime;

use derive_more::{Deref, Display};
use snafu::ensure;

use super::error::{InvalidArgumentSnafu, NameTooLongSnafu, Result};
use super::render::Listing;

/// Longest name, in characters, a file or directory may carry.
pub const MAX_NAME_LENGTH: usize = 32;

/// A validated entity name: non-empty and at most [`MAX_NAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Deref)]
pub struct EntityName(String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        ensure!(
            !name.is_empty(),
            InvalidArgumentSnafu {
                reason: "name cannot be empty",
            }
        );
        ensure!(
            name.chars().count() <= MAX_NAME_LENGTH,
            NameTooLongSnafu {
                name: name.as_str(),
                max: MAX_NAME_LENGTH,
            }
        );
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EntityName {
    type Error = super::error::FileSystemError;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

/// Name and creation time shared by every entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    name: EntityName,
    creation_time: SystemTime,
}

impl Metadata {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: EntityName::new(name)?,
            creation_time: SystemTime::now(),
        })
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn creation_time(&self) -> SystemTime {
        self.creation_time
    }
}

/// Capabilities common to files and directories.
pub trait Entity {
    fn metadata(&self) -> &Metadata;

    /// Appends this entity, and anything below it, to `listing` at `depth`.
    fn render_into(&self, depth: usize, listing: &mut Listing);

    fn name(&self) -> &EntityName {
        self.metadata().name()
    }

    fn creation_time(&self) -> SystemTime {
        self.metadata().creation_time()
    }

    fn render(&self, depth: usize) -> Listing {
        let mut listing = Listing::default();
        self.render_into(depth, &mut listing);
        listing
    }
}
