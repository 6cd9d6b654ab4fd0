//! Bridge to PowerShell for reading and writing the persisted PATH.
//!
//! All persistence goes through `[System.Environment]` calls run in a
//! child PowerShell process. Arguments are passed structurally (one argv
//! element each), and the new PATH value travels through the child's
//! environment rather than being spliced into the command text, so no
//! quoting of the value is ever required.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output};

use log::debug;

use crate::error::{Context, ErrorKind, Fallible};
use crate::scope::Scope;

/// Environment variable that hands the new PATH value to the child process.
const NEW_PATH_VAR: &str = "PATHMAN_NEW_PATH";

/// A located PowerShell executable.
pub struct Shell {
    program: PathBuf,
}

impl Shell {
    /// Finds PowerShell on the current PATH, preferring PowerShell 7+
    /// (`pwsh`) over Windows PowerShell 5 (`powershell`).
    ///
    /// # Errors
    ///
    /// Returns an error when neither executable can be located.
    pub fn locate() -> Fallible<Self> {
        which::which("pwsh")
            .or_else(|_| which::which("powershell"))
            .map(|program| Self { program })
            .with_context(|| ErrorKind::PowershellNotFound)
    }

    /// Reads the persisted PATH value at `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the PowerShell invocation fails.
    pub fn read_path(&self, scope: Scope) -> Fallible<String> {
        let output = self
            .run(&read_path_script(scope), None)
            .with_context(|| ErrorKind::ReadPath { scope })?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .replace('\r', "")
            .trim()
            .to_owned())
    }

    /// Persists `value` as the PATH at `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the PowerShell invocation fails; writing the
    /// machine scope from a non-elevated shell is the common cause.
    pub fn write_path(&self, scope: Scope, value: &str) -> Fallible<()> {
        self.run(&write_path_script(scope), Some(value))
            .map(drop)
            .with_context(|| ErrorKind::WritePath { scope })
    }

    /// The command line equivalent to `write_path`, for dry-run display.
    #[must_use]
    pub fn render_write_command(&self, scope: Scope, value: &str) -> String {
        format!(
            "{} -NoProfile -NonInteractive -Command \"[Environment]::SetEnvironmentVariable('Path', '{}', '{}')\"",
            self.program.display(),
            value.replace('\'', "''"),
            scope.variable_target()
        )
    }

    fn run(&self, script: &str, new_path: Option<&str>) -> Result<Output, InvocationError> {
        let mut command = Command::new(&self.program);
        command.args(["-NoProfile", "-NonInteractive", "-Command", script]);
        if let Some(value) = new_path {
            command.env(NEW_PATH_VAR, value);
        }

        debug!("Running {command:?}");
        let output = command.output()?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(InvocationError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}

fn read_path_script(scope: Scope) -> String {
    format!(
        "[Environment]::GetEnvironmentVariable('Path', '{}')",
        scope.variable_target()
    )
}

fn write_path_script(scope: Scope) -> String {
    format!(
        "[Environment]::SetEnvironmentVariable('Path', $env:{NEW_PATH_VAR}, '{}')",
        scope.variable_target()
    )
}

/// Failure launching PowerShell or a non-zero exit from it.
#[derive(Debug)]
enum InvocationError {
    Launch(io::Error),
    ExitStatus { status: ExitStatus, stderr: String },
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch(error) => write!(f, "could not launch PowerShell: {error}"),
            Self::ExitStatus { status, stderr } if stderr.is_empty() => {
                write!(f, "PowerShell exited with {status}")
            }
            Self::ExitStatus { status, stderr } => {
                write!(f, "PowerShell exited with {status}: {stderr}")
            }
        }
    }
}

impl Error for InvocationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Launch(error) => Some(error),
            Self::ExitStatus { .. } => None,
        }
    }
}

impl From<io::Error> for InvocationError {
    fn from(error: io::Error) -> Self {
        Self::Launch(error)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Shell, read_path_script, write_path_script};
    use crate::scope::Scope;

    fn fake_shell() -> Shell {
        Shell {
            program: PathBuf::from("powershell"),
        }
    }

    #[test]
    fn read_script_targets_the_selected_scope() {
        assert_eq!(
            read_path_script(Scope::User),
            "[Environment]::GetEnvironmentVariable('Path', 'User')"
        );
        assert_eq!(
            read_path_script(Scope::Machine),
            "[Environment]::GetEnvironmentVariable('Path', 'Machine')"
        );
    }

    #[test]
    fn write_script_takes_the_value_from_the_environment() {
        assert_eq!(
            write_path_script(Scope::User),
            "[Environment]::SetEnvironmentVariable('Path', $env:PATHMAN_NEW_PATH, 'User')"
        );
    }

    #[test]
    fn rendered_write_command_escapes_single_quotes() {
        let rendered = fake_shell().render_write_command(Scope::User, "C:\\o'brien");
        assert!(rendered.contains("C:\\o''brien"));
        assert!(rendered.contains("'User'"));
    }
}
