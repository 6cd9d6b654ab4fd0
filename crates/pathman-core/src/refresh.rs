//! Refreshing the PATH inside an already-running shell session.
//!
//! Persisting an environment variable does not affect processes that are
//! already running, so pathman can generate a self-deleting PowerShell
//! script that rebuilds `$env:Path` from the two persisted scopes.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::error::{Context, ErrorKind, ExitCode, Fallible, PathmanError};

/// File name of the generated refresh script.
pub const SCRIPT_NAME: &str = "Update-Path.ps1";

/// The script rebuilds the session PATH from both persisted scopes, then
/// removes itself.
const SCRIPT_BODY: &str = "$env:Path = [Environment]::GetEnvironmentVariable('Path', 'Machine') + ';' + [Environment]::GetEnvironmentVariable('Path', 'User')\nWrite-Output 'Updated PATH in current session.'\nrm $PSCommandPath\n";

/// Prints the one-shot instruction for reloading the PATH in the current
/// session.
pub fn print_refresh_hint() {
    info!(
        "To refresh the PATH in the current Powershell session, run:\n\n    Invoke-Expression $(pathman refresh -g --quiet)\n"
    );
}

/// Generates the refresh script in the working directory, falling back to
/// the home directory when the working directory is not writable, and
/// prints the command that executes it.
///
/// `reuse_existing` reflects quiet mode: an existing script is reused
/// rather than reported as an error, and the logger suppresses everything
/// but the invocation line.
///
/// # Errors
///
/// Returns an error when the script exists (and may not be reused) or
/// cannot be written to either location.
pub fn generate(reuse_existing: bool) -> Fallible<ExitCode> {
    let cwd = env::current_dir().with_context(|| ErrorKind::CurrentDir)?;
    generate_in(&cwd, reuse_existing)
}

fn generate_in(cwd: &Path, reuse_existing: bool) -> Fallible<ExitCode> {
    info!("Creating Powershell script to update the PATH in the current session...");

    let mut script = cwd.join(SCRIPT_NAME);
    if !write_script(&script, reuse_existing)? {
        let home = dirs::home_dir().ok_or(ErrorKind::NoHomeDir)?;
        warn!(
            "No write permission in '{}', falling back to '{}'.",
            cwd.display(),
            home.display()
        );
        script = home.join(SCRIPT_NAME);
        if !write_script(&script, reuse_existing)? {
            return Err(ErrorKind::WriteRefreshScript { path: script }.into());
        }
    }

    info!("Self-deleting Powershell script generated. Execute it with the command:\n");
    println!("{}", invocation(&script, cwd));
    Ok(ExitCode::Success)
}

/// Writes the script at `path`. `Ok(false)` means permission was denied
/// and the caller should try the fallback location.
fn write_script(path: &Path, reuse_existing: bool) -> Fallible<bool> {
    if path.exists() {
        if reuse_existing {
            return Ok(true);
        }
        return Err(ErrorKind::ScriptAlreadyExists {
            path: path.to_owned(),
        }
        .into());
    }
    match fs::write(path, SCRIPT_BODY) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::PermissionDenied => Ok(false),
        Err(error) => Err(PathmanError::from_source(
            error,
            ErrorKind::WriteRefreshScript {
                path: path.to_owned(),
            },
        )),
    }
}

/// The command a user runs to execute the script: relative when the script
/// is in the working directory, absolute otherwise.
fn invocation(script: &Path, cwd: &Path) -> String {
    match script.parent() {
        Some(parent) if parent == cwd => format!(".\\{SCRIPT_NAME}"),
        _ => format!("& '{}'", script.display()),
    }
}
