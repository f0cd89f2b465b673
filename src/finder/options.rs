//! Search configuration
//!
//! This module provides the immutable configuration a single search runs with.

use std::path::{Path, PathBuf};

/// Which kinds of entries are tested against the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    /// Files and directories alike
    #[default]
    Any,
    /// Everything that is not a directory
    FilesOnly,
    /// Directories only
    DirsOnly,
}

/// Configuration for one search
///
/// File-only and directory-only are one enum, so they can never both be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Root of the tree to walk
    pub root: PathBuf,

    /// Glob pattern matched against base names
    pub pattern: String,

    /// Entry type filter
    pub entry_type: EntryType,

    /// Whether matching is case-sensitive
    pub case_sensitive: bool,

    /// Explicit matcher thread count (None picks one from the CPU count)
    pub threads: Option<usize>,
}

impl SearchConfig {
    /// Create a case-insensitive, untyped search for `pattern` under `root`
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
            entry_type: EntryType::Any,
            case_sensitive: false,
            threads: None,
        }
    }

    /// Set the entry type filter
    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Set whether matching is case-sensitive
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Pin the number of matcher threads
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
