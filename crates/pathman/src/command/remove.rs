use pathman_core::error::{ExitCode, Fallible};
use pathman_core::modify::{ModifyOptions, Op, modify_path};
use pathman_core::scope::Scope;
use pathman_core::session::{ActivityKind, Session};

use crate::command::Command;

/// Removes a location from the persisted PATH.
///
/// Matching is by filesystem identity, so the entry is found even when it
/// is spelled differently from the supplied location.
#[derive(clap::Args)]
pub struct Remove {
    /// The location to remove from the PATH
    location: String,

    /// Prints the command which would be run, without executing it
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Modifies the system PATH instead of the user PATH (requires an elevated shell)
    #[arg(short, long)]
    system: bool,
}

impl Command for Remove {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        session.add_event_start(ActivityKind::Remove);

        let options = ModifyOptions {
            op: Op::Remove,
            location: self.location,
            scope: Scope::from_system_flag(self.system),
            force: false,
            dry_run: self.dry_run,
        };
        let result = modify_path(session, &options);

        let exit_code = match &result {
            Ok(code) => *code,
            Err(err) => err.exit_code(),
        };
        session.add_event_end(ActivityKind::Remove, exit_code);
        result
    }
}
