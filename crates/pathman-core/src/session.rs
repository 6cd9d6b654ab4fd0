//! Provides the `Session` type, which represents the state of a single
//! pathman invocation: the located PowerShell bridge (shared between the
//! read and write halves of an operation) and the activity event log.

use std::fmt::{self, Display, Formatter};

use once_cell::unsync::OnceCell;

use crate::error::{ExitCode, Fallible, PathmanError};
use crate::event::Log;
use crate::powershell::Shell;
use crate::scope::Scope;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy)]
pub enum ActivityKind {
    Add,
    Prepend,
    Remove,
    Show,
    Refresh,
    Completions,
    Pathman,
    Args,
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Self::Add => "add",
            Self::Prepend => "prepend",
            Self::Remove => "remove",
            Self::Show => "show",
            Self::Refresh => "refresh",
            Self::Completions => "completions",
            Self::Pathman => "pathman",
            Self::Args => "args",
        };
        f.write_str(s)
    }
}

/// The state of a single pathman invocation.
///
/// The PowerShell executable is located lazily on first use and cached so
/// an operation that reads and then rewrites the PATH resolves it once.
pub struct Session {
    shell: OnceCell<Shell>,
    event_log: Log,
}

impl Session {
    /// Constructs a new `Session`.
    #[must_use]
    pub fn init() -> Self {
        Self {
            shell: OnceCell::new(),
            event_log: Log::init(),
        }
    }

    /// The PowerShell bridge for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if no PowerShell executable can be located.
    pub fn shell(&self) -> Fallible<&Shell> {
        self.shell.get_or_try_init(Shell::locate)
    }

    /// Reads the persisted PATH value at the given scope.
    ///
    /// # Errors
    ///
    /// Returns an error if PowerShell cannot be located or the read fails.
    pub fn read_path(&self, scope: Scope) -> Fallible<String> {
        self.shell()?.read_path(scope)
    }

    pub fn add_event_start(&mut self, activity_kind: ActivityKind) {
        self.event_log.add_event_start(activity_kind);
    }
    pub fn add_event_end(&mut self, activity_kind: ActivityKind, exit_code: ExitCode) {
        self.event_log.add_event_end(activity_kind, exit_code);
    }
    pub fn add_event_error(&mut self, activity_kind: ActivityKind, error: &PathmanError) {
        self.event_log.add_event_error(activity_kind, error);
    }

    fn publish_to_event_log(self) {
        let Self { mut event_log, .. } = self;
        event_log.add_event_args();
        event_log.publish();
    }

    pub fn exit(self, code: ExitCode) -> ! {
        self.publish_to_event_log();
        code.exit();
    }
}
