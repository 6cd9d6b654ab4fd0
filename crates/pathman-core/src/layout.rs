//! Filesystem layout for pathman's own data (error logs).

use std::env;
use std::path::PathBuf;

use crate::error::{ErrorKind, Fallible};

/// Environment variable that overrides the pathman data directory.
pub const PATHMAN_HOME: &str = "PATHMAN_HOME";

/// The directory pathman may write its own files into.
///
/// Honors a `PATHMAN_HOME` override, falling back to the platform's local
/// application-data directory.
///
/// # Errors
///
/// Returns an error if no data directory can be determined.
pub fn pathman_home() -> Fallible<PathBuf> {
    match env::var_os(PATHMAN_HOME) {
        Some(home) => Ok(PathBuf::from(home)),
        None => default_home_dir(),
    }
}

fn default_home_dir() -> Fallible<PathBuf> {
    let mut home = dirs::data_local_dir().ok_or(ErrorKind::NoLocalDataDir)?;
    home.push("pathman");
    Ok(home)
}

/// The directory error logs are written into.
///
/// # Errors
///
/// Returns an error if the pathman home directory cannot be determined.
pub fn log_dir() -> Fallible<PathBuf> {
    Ok(pathman_home()?.join("log"))
}
