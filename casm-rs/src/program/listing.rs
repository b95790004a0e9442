//! The numbered rendering of a program's source lines.

use std::fmt;

use serde::Serialize;

/// Separates the line number from the line in a [`Listing`].
pub const LISTING_SEPARATOR: &str = " │ ";

/// Source lines prefixed with their 1-based, zero-padded position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Listing {
    entries: Vec<String>,
}

impl Listing {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            entries: lines
                .iter()
                .enumerate()
                .map(|(index, line)| {
                    format!("{:02}{LISTING_SEPARATOR}{}", index + 1, line.as_ref())
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries.join("\n"))
    }
}

/// Number `lines` from 1 and join them with newlines, e.g. `01 │ X Q0`.
pub fn format_listing<S: AsRef<str>>(lines: &[S]) -> String {
    Listing::new(lines).to_string()
}
