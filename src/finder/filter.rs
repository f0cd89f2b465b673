//! Entry filtering functionality
//!
//! This module provides the two filters a search applies to every visited
//! entry: the type filter (on the walking thread) and the name filter
//! (on the matcher pool).

use glob::Pattern;
use log::debug;
use walkdir::DirEntry;

use super::options::{EntryType, SearchConfig};

/// Trait for entry filters
pub trait FileFilter: Send + Sync {
    /// Check if the entry matches the filter
    fn matches(&self, entry: &DirEntry) -> bool;

    /// Get the filter description
    fn description(&self) -> String;
}

/// Filter for matching base names against a glob pattern
///
/// A pattern that does not compile never matches anything.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: Option<Pattern>,
    original_pattern: String,
    ignore_case: bool,
}

impl NameFilter {
    /// Create a case-sensitive NameFilter
    pub fn new(pattern: &str) -> Self {
        Self::build(pattern, false)
    }

    /// Create a case-insensitive NameFilter
    pub fn new_ignore_case(pattern: &str) -> Self {
        Self::build(pattern, true)
    }

    /// Create the NameFilter a search configuration asks for
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::build(&config.pattern, !config.case_sensitive)
    }

    fn build(pattern: &str, ignore_case: bool) -> Self {
        // Lowered once here instead of per entry
        let source = if ignore_case {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };

        let compiled = match Pattern::new(&source) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                debug!("Pattern '{}' is malformed ({}), nothing will match", pattern, e);
                None
            }
        };

        Self {
            pattern: compiled,
            original_pattern: pattern.to_string(),
            ignore_case,
        }
    }

    /// Whether the pattern compiled
    pub fn is_valid(&self) -> bool {
        self.pattern.is_some()
    }

    /// Test a single base name
    pub fn matches_name(&self, name: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return false;
        };

        if self.ignore_case {
            pattern.matches(&name.to_lowercase())
        } else {
            pattern.matches(name)
        }
    }
}

impl FileFilter for NameFilter {
    fn matches(&self, entry: &DirEntry) -> bool {
        self.matches_name(&entry.file_name().to_string_lossy())
    }

    fn description(&self) -> String {
        if self.ignore_case {
            format!("name (ignore case) matches '{}'", self.original_pattern)
        } else {
            format!("name matches '{}'", self.original_pattern)
        }
    }
}

/// Filter for entry types
///
/// Only decides which entries get a name test. It never stops the walk from
/// descending into a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilter {
    entry_type: EntryType,
}

impl TypeFilter {
    pub fn new(entry_type: EntryType) -> Self {
        Self { entry_type }
    }
}

impl From<&SearchConfig> for TypeFilter {
    fn from(config: &SearchConfig) -> Self {
        Self::new(config.entry_type)
    }
}

impl FileFilter for TypeFilter {
    fn matches(&self, entry: &DirEntry) -> bool {
        let is_dir = entry.file_type().is_dir();
        match self.entry_type {
            EntryType::Any => true,
            EntryType::FilesOnly => !is_dir,
            EntryType::DirsOnly => is_dir,
        }
    }

    fn description(&self) -> String {
        match self.entry_type {
            EntryType::Any => "any entry".to_string(),
            EntryType::FilesOnly => "is not a directory".to_string(),
            EntryType::DirsOnly => "is a directory".to_string(),
        }
    }
}
