mod cli;
mod command;

use clap::Parser;
use log::error;
use pathman_core::error::{ExitCode, report_error};
use pathman_core::log::{LogVerbosity, Logger};
use pathman_core::session::{ActivityKind, Session};

pub fn main() {
    let pathman = cli::Pathman::parse();

    let verbosity = if pathman.very_verbose {
        LogVerbosity::VeryVerbose
    } else if pathman.verbose {
        LogVerbosity::Verbose
    } else if pathman.quiet {
        LogVerbosity::Quiet
    } else {
        LogVerbosity::Default
    };
    Logger::init(verbosity).expect("Only a single Logger should be initialized");

    if !cfg!(windows) {
        error!(
            "pathman edits the registry-backed PATH through PowerShell and only supports Windows."
        );
        ExitCode::Failure.exit();
    }

    let mut session = Session::init();
    session.add_event_start(ActivityKind::Pathman);

    let exit_code = pathman.run(&mut session).unwrap_or_else(|err| {
        report_error(env!("CARGO_PKG_VERSION"), &err);
        session.add_event_error(ActivityKind::Pathman, &err);
        err.exit_code()
    });
    session.add_event_end(ActivityKind::Pathman, exit_code);
    session.exit(exit_code);
}
