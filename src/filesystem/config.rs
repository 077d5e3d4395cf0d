use clap::ValueEnum;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '\\';

/// How far a delete searches once a top-level directory's subtree has
/// yielded a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DeleteMatch {
    /// Stop after the first top-level directory whose subtree had a match.
    /// Inside that subtree every match at every depth is removed.
    #[default]
    FirstSubtree,
    /// Search and prune every top-level directory's subtree.
    AllSubtrees,
}

/// Where names have to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NameScope {
    /// Only among direct siblings of the same kind.
    #[default]
    Siblings,
    /// Across every file and directory in the tree.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSystemConfig {
    pub separator: char,
    pub delete_match: DeleteMatch,
    pub name_scope: NameScope,
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            delete_match: DeleteMatch::default(),
            name_scope: NameScope::default(),
        }
    }
}

impl FileSystemConfig {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_delete_match(mut self, delete_match: DeleteMatch) -> Self {
        self.delete_match = delete_match;
        self
    }

    pub fn with_name_scope(mut self, name_scope: NameScope) -> Self {
        self.name_scope = name_scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backslash_paths_and_sibling_names() {
        let config = FileSystemConfig::default();
        assert_eq!(config.separator, '\\');
        assert_eq!(config.delete_match, DeleteMatch::FirstSubtree);
        assert_eq!(config.name_scope, NameScope::Siblings);
    }

    #[test]
    fn value_names_are_kebab_case() {
        assert_eq!(
            DeleteMatch::from_str("all-subtrees", true),
            Ok(DeleteMatch::AllSubtrees)
        );
        assert_eq!(NameScope::from_str("GLOBAL", true), Ok(NameScope::Global));
        assert!(NameScope::from_str("everywhere", true).is_err());
    }
}
