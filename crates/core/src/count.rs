//! String-encoded item counts.
//!
//! Every count in the audit form is kept as the raw text the auditor
//! typed. Reading a count never fails: empty, negative, fractional or
//! non-numeric text reads as zero.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text stored in a freshly initialised count field.
pub const DEFAULT_COUNT: &str = "0";

/// A single count field as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCount", into = "String")]
pub struct Count(String);

impl Count {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Build a count from a known number.
    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    /// The raw text of the field.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the field, falling back to zero for anything that is not a
    /// non-negative integer.
    pub fn parse_or_zero(&self) -> u64 {
        self.0.trim().parse::<u64>().unwrap_or(0)
    }

    /// `true` when the field holds something other than blank text or the
    /// default `"0"`.
    pub fn is_filled(&self) -> bool {
        let trimmed = self.0.trim();
        !trimmed.is_empty() && trimmed != DEFAULT_COUNT
    }

    /// `true` when the field is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for Count {
    fn default() -> Self {
        Self(DEFAULT_COUNT.to_string())
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Count {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Count> for String {
    fn from(c: Count) -> Self {
        c.0
    }
}

/// Older drafts stored some counts as JSON numbers or `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Null(()),
}

impl From<RawCount> for Count {
    fn from(raw: RawCount) -> Self {
        match raw {
            RawCount::Text(s) => Self(s),
            RawCount::Unsigned(n) => Self(n.to_string()),
            RawCount::Signed(n) => Self(n.to_string()),
            RawCount::Float(n) => Self(n.to_string()),
            RawCount::Null(()) => Self(String::new()),
        }
    }
}
