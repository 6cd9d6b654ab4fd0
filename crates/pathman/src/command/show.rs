use pathman_core::error::{ExitCode, Fallible};
use pathman_core::path_list::PathList;
use pathman_core::scope::Scope;
use pathman_core::session::{ActivityKind, Session};

use crate::command::Command;

/// Lists the locations currently on the user and system PATH.
#[derive(clap::Args)]
pub struct Show {}

impl Command for Show {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        session.add_event_start(ActivityKind::Show);

        let user = PathList::parse(&session.read_path(Scope::User)?);
        let system = PathList::parse(&session.read_path(Scope::Machine)?);

        println!();
        for entry in user.entries() {
            println!("[user]    '{entry}'");
        }
        println!();
        for entry in system.entries() {
            println!("[system]  '{entry}'");
        }
        println!();

        session.add_event_end(ActivityKind::Show, ExitCode::Success);
        Ok(ExitCode::Success)
    }
}
