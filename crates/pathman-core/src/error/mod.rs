use std::error::Error;
use std::fmt;
use std::process::exit;

mod kind;
mod reporter;

#[allow(clippy::module_name_repetitions)]
pub use kind::ErrorKind;
#[allow(clippy::module_name_repetitions)]
pub use reporter::report_error;

pub type Fallible<T> = Result<T, PathmanError>;

/// Error type for pathman
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PathmanError {
    inner: Box<Inner>,
}

#[derive(Debug)]
struct Inner {
    kind: ErrorKind,
    source: Option<Box<dyn Error>>,
}

impl PathmanError {
    /// The exit status pathman should use when this error stops execution.
    ///
    /// The exit-status contract is flat: every guard failure and every
    /// external-command failure terminates the invocation with status 1.
    #[must_use]
    #[allow(clippy::unused_self, reason = "uniform exit status regardless of kind")]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    /// Create a new `PathmanError` instance including a source error
    pub fn from_source<E>(source: E, kind: ErrorKind) -> Self
    where
        E: Into<Box<dyn Error>>,
    {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
            }),
        }
    }

    /// Get a reference to the `ErrorKind` for this error
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl fmt::Display for PathmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.kind.fmt(f)
    }
}

impl Error for PathmanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source.as_ref().map(std::convert::AsRef::as_ref)
    }
}

impl From<ErrorKind> for PathmanError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }
}

/// Trait providing the `with_context` method to easily convert any Result error into a `PathmanError`
pub trait Context<T> {
    /// # Errors
    ///
    /// Returns a `PathmanError` if the underlying result is an error.
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Error + 'static,
{
    fn with_context<F>(self, f: F) -> Fallible<T>
    where
        F: FnOnce() -> ErrorKind,
    {
        self.map_err(|e| PathmanError::from_source(e, f()))
    }
}

/// Exit statuses used by pathman.
///
/// Success exits 0; every reported failure (guard violations as well as
/// PowerShell invocation errors) exits 1. Argument-parse errors exit with
/// clap's own status.
#[derive(Copy, Clone, Debug)]
pub enum ExitCode {
    /// No error occurred.
    Success = 0,

    /// A guard failure or external-command failure stopped the invocation.
    Failure = 1,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        exit(self as i32);
    }
}
