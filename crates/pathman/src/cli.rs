use clap::{Parser, builder::styling};

use crate::command::{self, Command};
use pathman_core::error::{ExitCode, Fallible};
use pathman_core::session::Session;
use pathman_core::style::{MAX_WIDTH, text_width};

#[derive(Parser)]
#[command(
    name = "pathman",
    about = "Persistent PATH editing for Windows",
    long_about = "Persistent PATH editing for Windows

    To append a location to the PATH, use `pathman add`.
    To load the updated PATH into the current session, use `pathman refresh`.",
    version,
    disable_version_flag = true,
    styles = styles(),
    term_width = text_width().unwrap_or(MAX_WIDTH),
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally bools
pub struct Pathman {
    #[command(subcommand)]
    pub(crate) command: Option<Subcommand>,

    /// Enables verbose diagnostics
    #[arg(long, global = true)]
    pub(crate) verbose: bool,

    /// Enables trace-level diagnostics.
    #[arg(long, global = true, requires = "verbose")]
    pub(crate) very_verbose: bool,

    /// Prevents unnecessary output
    #[arg(
        long,
        global = true,
        conflicts_with = "verbose",
        aliases = &["silent"]
    )]
    pub(crate) quiet: bool,

    /// Prints the current version of pathman
    #[arg(short, long)]
    pub(crate) version: bool,
}

impl Pathman {
    pub(crate) fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        if self.version {
            // suffix indicator for dev build
            if cfg!(debug_assertions) {
                println!("{}-dev", env!("CARGO_PKG_VERSION"));
            } else {
                println!("{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(ExitCode::Success)
        } else if let Some(command) = self.command {
            command.run(session)
        } else {
            Self::parse_from(["pathman", "help"].iter()).run(session)
        }
    }
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Adds (appends) a location to the PATH
    Add(command::Add),

    /// Prepends a location to the PATH, giving it priority in search order
    Prepend(command::Prepend),

    /// Removes a location from the PATH
    Remove(command::Remove),

    /// Shows the locations currently on the user and system PATH
    #[command(alias = "ls")]
    Show(command::Show),

    /// Refreshes the PATH in the current shell session
    Refresh(command::Refresh),

    /// Generates pathman completions
    ///
    /// If you specify a file, the completions will be written there;
    /// otherwise, they will be written to `stdout`.
    #[command(arg_required_else_help = true)]
    Completions(command::Completions),
}

impl Subcommand {
    pub(crate) fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        match self {
            Self::Add(add) => add.run(session),
            Self::Prepend(prepend) => prepend.run(session),
            Self::Remove(remove) => remove.run(session),
            Self::Show(show) => show.run(session),
            Self::Refresh(refresh) => refresh.run(session),
            Self::Completions(completions) => completions.run(session),
        }
    }
}

fn styles() -> styling::Styles {
    styling::Styles::plain()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::ITALIC,
        )
        .usage(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::ITALIC,
        )
        .literal(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::BrightBlue.on_default())
}
