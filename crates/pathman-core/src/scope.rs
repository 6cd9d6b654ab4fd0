//! Selects which persisted copy of the `PATH` variable an operation targets.

use std::fmt;

/// Persistence scope for the `PATH` environment variable.
///
/// Windows keeps a per-user environment block and a machine-wide one;
/// PowerShell selects between them with an `EnvironmentVariableTarget`
/// value. No pathman operation crosses scopes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Scope {
    User,
    Machine,
}

impl Scope {
    /// The scope selected by the `--system` command-line flag.
    #[must_use]
    pub const fn from_system_flag(system: bool) -> Self {
        if system { Self::Machine } else { Self::User }
    }

    /// The `[System.EnvironmentVariableTarget]` name PowerShell expects.
    #[must_use]
    pub const fn variable_target(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Machine => "Machine",
        }
    }
}

impl fmt::Display for Scope {
    /// Uses the command-line vocabulary: the machine scope is selected by
    /// `--system` and is reported as the "system" PATH.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Machine => f.write_str("system"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn system_flag_selects_machine_scope() {
        assert_eq!(Scope::from_system_flag(true), Scope::Machine);
        assert_eq!(Scope::from_system_flag(false), Scope::User);
    }

    #[test]
    fn display_matches_cli_vocabulary() {
        assert_eq!(Scope::User.to_string(), "user");
        assert_eq!(Scope::Machine.to_string(), "system");
    }

    #[test]
    fn variable_target_matches_powershell_names() {
        assert_eq!(Scope::User.variable_target(), "User");
        assert_eq!(Scope::Machine.variable_target(), "Machine");
    }
}
