use log::{Level, log_enabled};
use pathman_core::error::{ExitCode, Fallible};
use pathman_core::refresh;
use pathman_core::session::{ActivityKind, Session};

use crate::command::Command;

/// Reloads the persisted PATH into the current shell session.
#[derive(clap::Args)]
pub struct Refresh {
    /// Generates the Powershell script which updates the current session
    #[arg(short, long)]
    generate: bool,
}

impl Command for Refresh {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        session.add_event_start(ActivityKind::Refresh);

        let result = if self.generate {
            // under the global --quiet only the script invocation is
            // printed, and an existing script is reused rather than refused
            let quiet = !log_enabled!(Level::Info);
            refresh::generate(quiet)
        } else {
            refresh::print_refresh_hint();
            Ok(ExitCode::Success)
        };

        let exit_code = match &result {
            Ok(code) => *code,
            Err(err) => err.exit_code(),
        };
        session.add_event_end(ActivityKind::Refresh, exit_code);
        result
    }
}
