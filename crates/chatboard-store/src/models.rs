use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How new message ids are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScheme {
    /// Monotonic counter, unaffected by deletions. Ids are never reused.
    #[default]
    Counter,
    /// Current store length at creation time. Reproduces the legacy board,
    /// which hands out duplicate ids once anything has been deleted.
    Length,
}

#[derive(Debug, Error)]
#[error("unknown id scheme '{0}' (expected 'counter' or 'length')")]
pub struct UnknownIdScheme(pub String);

impl FromStr for IdScheme {
    type Err = UnknownIdScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(Self::Counter),
            "length" => Ok(Self::Length),
            _ => Err(UnknownIdScheme(s.to_string())),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => f.write_str("counter"),
            Self::Length => f.write_str("length"),
        }
    }
}
