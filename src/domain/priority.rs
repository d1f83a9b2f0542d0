//! Task priority
//!
//! A priority is a single uppercase ASCII letter, `A` being the most urgent.
//! Every way of producing one goes through [`Priority::normalize`], so a
//! stored priority is always exactly one letter in `A..=Z`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Invalid priority: expected a letter A-Z, got '{0}'")]
    Invalid(String),
}

/// Priority letter in the range `A..=Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Priority(char);

impl Priority {
    /// Normalizes raw input into a priority
    ///
    /// Only the first character is kept and it is upper-cased. Empty input,
    /// or input starting with anything other than an ASCII letter, yields
    /// `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let first = raw.chars().next()?;
        if first.is_ascii_alphabetic() {
            Some(Self(first.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Returns the priority letter
    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s.trim()).ok_or_else(|| PriorityError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for Priority {
    type Error = PriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.to_string()
    }
}
