//! The PATH-string engine: parsing, transforming, and serializing the
//! semicolon-delimited PATH value.
//!
//! Additions compare by exact entry text; removal compares by filesystem
//! identity, so an entry is found even when it spells the same directory
//! differently (symlink, relative segments, stray separators).

use std::path::Path;

use crate::error::{ErrorKind, Fallible};
use crate::scope::Scope;

/// Separator between entries in the serialized PATH value.
pub const DELIMITER: char = ';';

/// An ordered list of PATH entries.
///
/// Entries keep the exact textual form they had in the persisted value.
/// Duplicates are detected, never prevented.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathList {
    entries: Vec<String>,
}

impl PathList {
    /// Parses a raw delimited PATH value. Empty segments, including the one
    /// produced by a trailing delimiter, are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            entries: raw
                .split(DELIMITER)
                .filter(|entry| !entry.trim().is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Exact string comparison against the resolved target, deliberately
    /// stricter than identity matching so that near-duplicate entries
    /// naming different directories are not masked.
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.entries.iter().any(|entry| entry == target)
    }

    /// Appends `target` as the last entry.
    pub fn append(&mut self, target: &str) {
        self.entries.push(target.to_owned());
    }

    /// Prepends `target`, giving it priority in shell search order.
    pub fn prepend(&mut self, target: &str) {
        self.entries.insert(0, target.to_owned());
    }

    /// Removes every entry referring to the same directory as `target` and
    /// returns the removed entries in their original order.
    ///
    /// # Errors
    ///
    /// Returns a `NotOnPath` error when nothing matches; the list is left
    /// unchanged in that case.
    pub fn remove(&mut self, target: &Path, scope: Scope) -> Fallible<Vec<String>> {
        let (removed, kept): (Vec<String>, Vec<String>) = self
            .entries
            .drain(..)
            .partition(|entry| same_location(Path::new(entry), target));
        self.entries = kept;

        if removed.is_empty() {
            return Err(ErrorKind::NotOnPath {
                target: target.to_owned(),
                scope,
            }
            .into());
        }
        Ok(removed)
    }

    /// Serializes back to the delimited form, stripping one trailing
    /// delimiter and one trailing directory-separator artifact.
    #[must_use]
    pub fn serialize(&self) -> String {
        let joined = self.entries.join(";");
        let trimmed = joined.trim_end();
        let trimmed = trimmed.strip_suffix(DELIMITER).unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('\\').unwrap_or(trimmed);
        trimmed.to_owned()
    }
}

/// Do two textual paths refer to the same directory on disk?
///
/// Canonicalizes both sides when possible, resolving symlinks and relative
/// segments. When either side cannot be canonicalized (most commonly a
/// directory that no longer exists) the comparison intentionally falls
/// back to normalized text instead of propagating the failure.
#[must_use]
pub fn same_location(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => normalized(a) == normalized(b),
    }
}

/// Lexical normalization for the fallback comparison: trailing separators
/// stripped, separators unified and text case-folded on Windows.
fn normalized(path: &Path) -> String {
    let text = path.to_string_lossy();
    let text = text.trim_end_matches(['\\', '/']);
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            text.replace('/', "\\").to_lowercase()
        } else {
            text.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::path::Path;

    use super::{PathList, same_location};
    use crate::error::ErrorKind;
    use crate::scope::Scope;

    #[test]
    fn append_keeps_order_and_places_target_last() {
        let mut list = PathList::parse("C:\\A;C:\\B;");
        list.append("C:\\C");

        assert!(list.contains("C:\\C"));
        assert_eq!(list.serialize(), "C:\\A;C:\\B;C:\\C");
    }

    #[test]
    fn prepend_places_target_first() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        list.prepend("C:\\C");

        assert_eq!(list.serialize(), "C:\\C;C:\\A;C:\\B");
    }

    #[test]
    fn parse_drops_empty_segments() {
        let list = PathList::parse("C:\\A;;C:\\B;");
        assert_eq!(list.entries(), &["C:\\A".to_owned(), "C:\\B".to_owned()]);
    }

    #[test]
    fn parse_ignores_a_trailing_delimiter() {
        assert_eq!(PathList::parse("C:\\A;C:\\B"), PathList::parse("C:\\A;C:\\B;"));
    }

    #[test]
    fn parse_serialize_round_trip_is_stable() {
        let raw = "C:\\A;C:\\B;C:\\A";
        let parsed = PathList::parse(raw);
        assert_eq!(PathList::parse(&parsed.serialize()), parsed);
    }

    #[test]
    fn serialize_strips_trailing_backslash_artifact() {
        let list = PathList::parse("C:\\A;C:\\B\\");
        assert_eq!(list.serialize(), "C:\\A;C:\\B");
    }

    #[test]
    fn remove_strips_every_duplicate_and_reports_each() {
        let mut list = PathList::parse("C:\\A;C:\\B;C:\\A");
        let removed = list
            .remove(Path::new("C:\\A"), Scope::User)
            .expect("Entries should have been removed");

        assert_eq!(removed, vec!["C:\\A".to_owned(), "C:\\A".to_owned()]);
        assert_eq!(list.serialize(), "C:\\B");
    }

    #[test]
    fn remove_without_a_match_fails_and_leaves_the_list_unchanged() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        let err = list
            .remove(Path::new("C:\\Z"), Scope::User)
            .expect_err("Nothing should have matched");

        assert!(matches!(err.kind(), ErrorKind::NotOnPath { .. }));
        assert_eq!(list.entries(), &["C:\\A".to_owned(), "C:\\B".to_owned()]);
    }

    #[test]
    fn remove_matches_by_filesystem_identity() {
        let root = tempfile::tempdir().expect("Could not create temporary directory");
        let dir = root.path().join("tools");
        create_dir(&dir).expect("Could not create directory");

        // same directory spelled through a redundant `.` segment
        let spelled = root.path().join(".").join("tools");
        let raw = format!("{};C:\\Unrelated", spelled.display());

        let mut list = PathList::parse(&raw);
        let removed = list
            .remove(&dir, Scope::User)
            .expect("Identity match should have been found");

        assert_eq!(removed, vec![spelled.display().to_string()]);
        assert_eq!(list.entries(), &["C:\\Unrelated".to_owned()]);
    }

    #[cfg(unix)]
    #[test]
    fn remove_matches_through_symlinks() {
        let root = tempfile::tempdir().expect("Could not create temporary directory");
        let real = root.path().join("real");
        create_dir(&real).expect("Could not create directory");
        let link = root.path().join("link");
        std::os::unix::fs::symlink(&real, &link).expect("Could not create symlink");

        let mut list = PathList::parse(&link.display().to_string());
        let removed = list
            .remove(&real, Scope::User)
            .expect("Symlinked entry should have matched");

        assert_eq!(removed, vec![link.display().to_string()]);
        assert!(list.entries().is_empty());
    }

    #[test]
    fn missing_paths_fall_back_to_normalized_comparison() {
        // neither side exists, so identity resolution cannot succeed
        assert!(same_location(
            Path::new("/nonexistent/tools/"),
            Path::new("/nonexistent/tools")
        ));
        assert!(!same_location(
            Path::new("/nonexistent/tools"),
            Path::new("/nonexistent/other")
        ));
    }
}
