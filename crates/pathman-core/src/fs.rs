//! Small filesystem helpers.

use std::fs::create_dir_all;
use std::path::Path;

use crate::error::{Context, ErrorKind, Fallible};

/// Creates the containing directory of `path` if it does not already exist.
///
/// # Errors
///
/// Returns an error if the path has no parent or the directory cannot be
/// created.
pub fn ensure_containing_dir_exists<P: AsRef<Path>>(path: &P) -> Fallible<()> {
    let dir = path.as_ref().parent().ok_or_else(|| ErrorKind::ContainingDir {
        path: path.as_ref().to_owned(),
    })?;
    create_dir_all(dir).with_context(|| ErrorKind::CreateDir { dir: dir.to_owned() })
}
