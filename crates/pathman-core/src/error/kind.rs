use std::fmt;
use std::path::PathBuf;

use crate::scope::Scope;

const FORCE_CTA: &str = "Re-run with the '--force' flag if you still wish to add it.";

const PERMISSIONS_CTA: &str = "Please ensure you have correct permissions to the target directory.";

const POWERSHELL_CTA: &str = "Please ensure Powershell is available and working on this machine.";

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum ErrorKind {
    /// Thrown when adding a location that is already on the PATH without `--force`
    AlreadyOnPath { target: PathBuf },

    /// Thrown when the file-to-directory substitution cannot determine a parent
    ContainingDir { path: PathBuf },

    /// Thrown when the completions output file already exists or cannot be written
    CompletionsOutFile { path: PathBuf },

    /// Thrown when the current directory could not be determined
    CurrentDir,

    /// Thrown when creating a directory fails
    CreateDir { dir: PathBuf },

    /// Thrown when adding a location that does not exist on disk without `--force`
    LocationNotFound { target: PathBuf },

    /// Thrown when the home directory could not be determined
    NoHomeDir,

    /// Thrown when the local application-data directory is not available
    NoLocalDataDir,

    /// Thrown when removing a location that is not on the PATH
    NotOnPath { target: PathBuf, scope: Scope },

    /// Thrown when no PowerShell executable could be located
    PowershellNotFound,

    /// Thrown when the PowerShell call reading the persisted PATH fails
    ReadPath { scope: Scope },

    /// Thrown when the refresh script already exists and may not be overwritten
    ScriptAlreadyExists { path: PathBuf },

    /// Thrown when a supplied location cannot be parsed into a path
    UnparseablePath { raw: String },

    /// Thrown when the PowerShell call persisting the new PATH fails
    WritePath { scope: Scope },

    /// Thrown when the refresh script cannot be written
    WriteRefreshScript { path: PathBuf },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyOnPath { target } => write!(
                f,
                "'{}' is already on the PATH.

{FORCE_CTA}",
                target.display()
            ),
            Self::ContainingDir { path } => write!(
                f,
                "Could not determine the directory containing {}",
                path.display()
            ),
            Self::CompletionsOutFile { path } => write!(
                f,
                "Completions file `{}` already exists.

Please remove the file or pass `-f` or `--force` to overwrite it.",
                path.display()
            ),
            Self::CurrentDir => write!(
                f,
                "Could not determine current directory

Please ensure that you have the correct permissions."
            ),
            Self::CreateDir { dir } => write!(
                f,
                "Could not create directory {}

Please ensure that you have the correct permissions.",
                dir.display()
            ),
            Self::LocationNotFound { target } => write!(
                f,
                "Location '{}' does not exist.

{FORCE_CTA}",
                target.display()
            ),
            Self::NoHomeDir => write!(
                f,
                "Could not determine home directory.

Please ensure your home directory is available and try again."
            ),
            Self::NoLocalDataDir => write!(
                f,
                "Could not determine local application data directory.

Please ensure the directory is available."
            ),
            Self::NotOnPath { target, scope } => {
                write!(f, "'{}' was not found on the {scope} PATH.", target.display())
            }
            Self::PowershellNotFound => write!(
                f,
                "Could not locate a Powershell executable.

Please ensure 'pwsh' or 'powershell' is available on your PATH."
            ),
            Self::ReadPath { scope } => write!(
                f,
                "Could not read the {scope} PATH from the environment.

{POWERSHELL_CTA}"
            ),
            Self::ScriptAlreadyExists { path } => write!(
                f,
                "Refresh script '{}' already exists and will not be overwritten.

Delete the existing script, or re-run with '--quiet' to reuse it.",
                path.display()
            ),
            Self::UnparseablePath { raw } => write!(
                f,
                "Could not parse the supplied location, probably due to a bug in CMD or Powershell 5.

You can fix this by:
 a) Removing the trailing backslash from your path
 b) Upgrading to a newer version of Powershell, such as Powershell 7

This is the argument that was received; note the stray quotation mark:

    {raw}"
            ),
            Self::WritePath { scope } => match scope {
                Scope::Machine => write!(
                    f,
                    "Could not update the system PATH.

Are you in an elevated shell? You need administrator permissions to change the system PATH."
                ),
                Scope::User => write!(
                    f,
                    "Could not update the user PATH.

{POWERSHELL_CTA}"
                ),
            },
            Self::WriteRefreshScript { path } => write!(
                f,
                "Could not write refresh script {}

{PERMISSIONS_CTA}",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ErrorKind;
    use crate::scope::Scope;

    #[test]
    fn machine_write_failure_mentions_elevation() {
        let message = ErrorKind::WritePath {
            scope: Scope::Machine,
        }
        .to_string();
        assert!(message.contains("elevated shell"));
        assert!(message.contains("administrator permissions"));
    }

    #[test]
    fn user_write_failure_does_not_mention_elevation() {
        let message = ErrorKind::WritePath { scope: Scope::User }.to_string();
        assert!(!message.contains("elevated shell"));
    }

    #[test]
    fn not_on_path_names_the_scope() {
        let message = ErrorKind::NotOnPath {
            target: PathBuf::from("C:\\Tools"),
            scope: Scope::User,
        }
        .to_string();
        assert_eq!(message, "'C:\\Tools' was not found on the user PATH.");
    }

    #[test]
    fn unparseable_path_shows_the_received_argument() {
        let message = ErrorKind::UnparseablePath {
            raw: "C:\\my tools\"".to_owned(),
        }
        .to_string();
        assert!(message.contains("C:\\my tools\""));
        assert!(message.contains("Powershell 7"));
    }
}
