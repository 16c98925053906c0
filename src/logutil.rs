//! Log formatting for raw player input.
//!
//! Wrap a typed line in [`PlayerInput`] inside a `log` macro. The escaping
//! only runs when the record is actually emitted.

use std::fmt;

/// Longest slice of a line echoed into the log.
pub const MAX_ECHO_CHARS: usize = 120;

/// Typed line rendered on a single log line: control characters escaped,
/// surrounded by quotes, and cut after [`MAX_ECHO_CHARS`] characters.
#[derive(Debug, Clone, Copy)]
pub struct PlayerInput<'a>(pub &'a str);

impl fmt::Display for PlayerInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        let mut chars = self.0.chars();
        for ch in chars.by_ref().take(MAX_ECHO_CHARS) {
            match ch {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c if c.is_control() => write!(f, "{}", c.escape_default())?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")?;
        if chars.next().is_some() {
            write!(f, " (+{} chars)", self.0.chars().count() - MAX_ECHO_CHARS)?;
        }
        Ok(())
    }
}
