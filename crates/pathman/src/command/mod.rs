pub mod add;
pub mod completions;
pub mod prepend;
pub mod refresh;
pub mod remove;
pub mod show;

pub use add::Add;
pub use completions::Completions;
pub use prepend::Prepend;
pub use refresh::Refresh;
pub use remove::Remove;
pub use show::Show;

use pathman_core::error::{ExitCode, Fallible};
use pathman_core::session::Session;

/// A pathman command.
pub trait Command: Sized {
    /// Executes the command. Returns `Ok(ExitCode::Success)` if the process
    /// should return 0, and `Err(e)` if the process should return
    /// `e.exit_code()`.
    fn run(self, session: &mut Session) -> Fallible<ExitCode>;
}
