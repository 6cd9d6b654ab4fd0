use pathman_core::error::{ExitCode, Fallible};
use pathman_core::modify::{ModifyOptions, Op, modify_path};
use pathman_core::scope::Scope;
use pathman_core::session::{ActivityKind, Session};

use crate::command::Command;

/// Prepends a location to the persisted PATH, so executables in it take
/// priority over those elsewhere on the PATH.
#[derive(clap::Args)]
pub struct Prepend {
    /// The location to prepend to the PATH
    location: String,

    /// Prints the command which would be run, without executing it
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Modifies the system PATH instead of the user PATH (requires an elevated shell)
    #[arg(short, long)]
    system: bool,

    /// Proceeds even if the location does not exist or is already on the PATH
    #[arg(short, long)]
    force: bool,
}

impl Command for Prepend {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        session.add_event_start(ActivityKind::Prepend);

        let options = ModifyOptions {
            op: Op::Prepend,
            location: self.location,
            scope: Scope::from_system_flag(self.system),
            force: self.force,
            dry_run: self.dry_run,
        };
        let result = modify_path(session, &options);

        let exit_code = match &result {
            Ok(code) => *code,
            Err(err) => err.exit_code(),
        };
        session.add_event_end(ActivityKind::Prepend, exit_code);
        result
    }
}
