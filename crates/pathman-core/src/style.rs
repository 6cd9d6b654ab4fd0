//! Terminal styling helpers shared by the logger and the error reporter.

use std::error::Error;

use console::style;
use terminal_size::{Width, terminal_size};

/// The maximum width to use when wrapping message output
pub const MAX_WIDTH: usize = 100;

/// The display width of the current terminal, capped at `MAX_WIDTH`.
///
/// Returns `None` when not attached to a terminal, in which case output
/// should be left unwrapped.
#[must_use]
pub fn text_width() -> Option<usize> {
    terminal_size().map(|(Width(width), _)| (width as usize).min(MAX_WIDTH))
}

/// Format an underlying error cause for display beneath the main message.
#[must_use]
pub fn format_error_cause(inner: &dyn Error) -> String {
    format!(
        "{}{} {inner}",
        style("Error cause").underlined().bold(),
        style(":").underlined().bold(),
    )
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{MAX_WIDTH, format_error_cause, text_width};

    #[test]
    fn text_width_is_capped() {
        if let Some(width) = text_width() {
            assert!(width <= MAX_WIDTH);
        }
    }

    #[test]
    fn error_cause_includes_the_inner_message() {
        let inner = io::Error::new(io::ErrorKind::PermissionDenied, "access is denied");
        let formatted = format_error_cause(&inner);
        assert!(formatted.contains("access is denied"));
    }
}
