//! Line filter conditions.
//!
//! The registry is closed: each condition is an enum variant dispatched to a
//! fixed predicate. Adding a condition means adding a variant, a key, a
//! label and a predicate arm below; user input only ever selects one.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// A named predicate over a single text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    /// A `/` followed by four digits anywhere in the line (e.g. `/2024`).
    #[default]
    SlashYear,
}

impl Condition {
    /// Every registered condition, in display order.
    pub const ALL: &'static [Condition] = &[Condition::SlashYear];

    /// Stable identifier for command lines and config.
    pub fn key(&self) -> &'static str {
        match self {
            Condition::SlashYear => "slash-year",
        }
    }

    /// Human-readable name shown in selection lists.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::SlashYear => "/YYYY (4-digit year)",
        }
    }

    /// Look up a condition by key or label, ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(name) || c.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownCondition(name.to_string()))
    }

    /// Whether the line passes this condition.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Condition::SlashYear => slash_year_regex().is_match(line),
        }
    }
}

/// Unanchored search: `/20245` matches because `/2024` occurs in it.
fn slash_year_regex() -> &'static Regex {
    static RE_SLASH_YEAR: OnceLock<Regex> = OnceLock::new();
    RE_SLASH_YEAR.get_or_init(|| Regex::new(r"/\d{4}").unwrap())
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
