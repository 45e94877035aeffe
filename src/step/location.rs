//! Source location tracking for steps and hooks.
//!
//! Locations name the feature-file position of a step, or the file where a
//! hook or step definition is registered. They render as `path:line`, the
//! form embedded into report `match` nodes.

use std::sync::Arc;

use derive_more::with_trait::Display;

/// Location of a step, hook registration or step definition.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}")]
pub struct Location {
    /// Path of the file the location points into.
    pub path: Arc<str>,

    /// 1-based line number inside that file.
    pub line: u32,
}

impl Location {
    /// Creates a new [`Location`] with the given path and line.
    #[must_use]
    pub fn new(path: impl Into<Arc<str>>, line: u32) -> Self {
        Self { path: path.into(), line }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_file_colon_line() {
        let location = Location::new("features/reporting.feature", 12);
        assert_eq!(location.to_string(), "features/reporting.feature:12");
    }

    #[test]
    fn clones_share_the_path() {
        let location = Location::new("features/shared.feature", 3);
        let cloned = location.clone();
        assert_eq!(location, cloned);
        assert!(Arc::ptr_eq(&location.path, &cloned.path));
    }

    #[test]
    fn ordering_is_by_path_then_line() {
        let a = Location::new("a.feature", 9);
        let b = Location::new("b.feature", 1);
        let later = Location::new("a.feature", 10);
        assert!(a < b);
        assert!(a < later);
    }
}
