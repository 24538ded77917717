//! Utility functions and types.

use std::fmt::{Debug, Formatter};

/// Redact hides api keys and secrets when they are printed.
///
/// - Empty input is printed as `EMPTY`.
/// - Input shorter than 12 characters is printed as `***`.
/// - Longer input keeps its first and last three characters, so that two
///   different keys can still be told apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let count = self.0.chars().count();
        match count {
            0 => f.write_str("EMPTY"),
            1..=11 => f.write_str("***"),
            _ => {
                // Char boundaries, keys are not guaranteed to be ascii.
                let head_end = self.0.char_indices().nth(3).map_or(0, |(i, _)| i);
                let tail_start = self.0.char_indices().nth(count - 3).map_or(0, |(i, _)| i);
                write!(f, "{}***{}", &self.0[..head_end], &self.0[tail_start..])
            }
        }
    }
}
