use std::fs::File;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use log::info;
use pathman_core::error::{Context, ErrorKind, ExitCode, Fallible};
use pathman_core::session::{ActivityKind, Session};

use crate::command::Command;

/// Generates completion scripts for the pathman CLI.
#[derive(clap::Args)]
pub struct Completions {
    /// Shell to generate completions for
    #[arg(index = 1, value_enum)]
    shell: Shell,

    /// File to write generated completions to
    #[arg(short, long = "output")]
    out_file: Option<PathBuf>,

    /// Write over an existing file, if any.
    #[arg(short, long)]
    force: bool,
}

impl Command for Completions {
    fn run(self, session: &mut Session) -> Fallible<ExitCode> {
        session.add_event_start(ActivityKind::Completions);

        let mut command = crate::cli::Pathman::command();
        let Some(path) = self.out_file else {
            generate(self.shell, &mut command, "pathman", &mut std::io::stdout());
            session.add_event_end(ActivityKind::Completions, ExitCode::Success);
            return Ok(ExitCode::Success);
        };

        if path.is_file() && !self.force {
            return Err(ErrorKind::CompletionsOutFile { path }.into());
        }
        let mut file = File::create(&path)
            .with_context(|| ErrorKind::CompletionsOutFile { path: path.clone() })?;
        generate(self.shell, &mut command, "pathman", &mut file);
        info!("Wrote {} completions to {}", self.shell, path.display());

        session.add_event_end(ActivityKind::Completions, ExitCode::Success);
        Ok(ExitCode::Success)
    }
}

#[cfg(test)]
mod tests {
    use clap_complete::Shell;
    use pathman_core::error::ErrorKind;
    use pathman_core::session::Session;

    use super::Completions;
    use crate::command::Command;

    #[test]
    fn writes_completions_to_a_file() {
        let root = tempfile::tempdir().expect("Could not create temporary directory");
        let out_file = root.path().join("pathman.ps1");

        let completions = Completions {
            shell: Shell::PowerShell,
            out_file: Some(out_file.clone()),
            force: false,
        };
        completions
            .run(&mut Session::init())
            .expect("Completions should have been generated");

        let body = std::fs::read_to_string(&out_file).expect("File should have been written");
        assert!(body.contains("pathman"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let root = tempfile::tempdir().expect("Could not create temporary directory");
        let out_file = root.path().join("pathman.ps1");
        std::fs::write(&out_file, "original").expect("Could not seed file");

        let completions = Completions {
            shell: Shell::PowerShell,
            out_file: Some(out_file.clone()),
            force: false,
        };
        let err = completions
            .run(&mut Session::init())
            .expect_err("Overwrite should be refused");
        assert!(matches!(err.kind(), ErrorKind::CompletionsOutFile { .. }));
        assert_eq!(
            std::fs::read_to_string(&out_file).expect("File should remain"),
            "original"
        );
    }
}
