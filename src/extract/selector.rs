//! Substring selectors
//!
//! A selector is the part of a reference after `@`: a literal pattern
//! with an optional 1-based occurrence, e.g. `is` or `is[2]`.
//! Occurrences are counted left to right without overlap.

use std::fmt;
use std::str::FromStr;

use crate::error::{CiteError, Result};

/// Parsed `pattern[n]` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Literal text to search for
    pub pattern: String,
    /// Which occurrence to anchor on; `None` means the first
    pub occurrence: Option<usize>,
}

impl Selector {
    /// Parse a selector such as `is` or `is[2]`
    pub fn parse(input: &str) -> Result<Self> {
        let (pattern, occurrence) = match input.split_once('[') {
            None => (input, None),
            Some((pattern, rest)) => {
                let digits = rest
                    .strip_suffix(']')
                    .filter(|d| !d.contains('[') && !d.contains(']'))
                    .ok_or_else(|| {
                        CiteError::ArgumentError(format!("malformed occurrence in '{}'", input))
                    })?;
                let n: usize = digits.parse().map_err(|_| {
                    CiteError::ArgumentError(format!("occurrence '{}' is not a number", digits))
                })?;
                if n == 0 {
                    return Err(CiteError::ArgumentError(format!(
                        "occurrence in '{}' must be at least 1",
                        input
                    )));
                }
                (pattern, Some(n))
            }
        };

        if pattern.is_empty() {
            return Err(CiteError::ArgumentError(format!(
                "empty pattern in '{}'",
                input
            )));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            occurrence,
        })
    }

    /// Text from the selected occurrence through the end
    pub fn from_pattern(&self, text: &str) -> Result<String> {
        let start = self.locate(text)?;
        Ok(text[start..].to_string())
    }

    /// Text from the start through the selected occurrence
    pub fn through_pattern(&self, text: &str) -> Result<String> {
        let start = self.locate(text)?;
        Ok(text[..start + self.pattern.len()].to_string())
    }

    /// Byte offset of the selected occurrence
    fn locate(&self, text: &str) -> Result<usize> {
        let n = self.occurrence.unwrap_or(1);
        if let Some((offset, _)) = text.match_indices(self.pattern.as_str()).nth(n - 1) {
            return Ok(offset);
        }

        match self.occurrence {
            None => Err(CiteError::PatternNotFound {
                pattern: self.pattern.clone(),
                text: text.to_string(),
            }),
            Some(n) => Err(CiteError::ArgumentError(format!(
                "'{}' occurs {} times, occurrence {} requested",
                self.pattern,
                text.matches(self.pattern.as_str()).count(),
                n
            ))),
        }
    }
}

impl FromStr for Selector {
    type Err = CiteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        if let Some(n) = self.occurrence {
            write!(f, "[{}]", n)?;
        }
        Ok(())
    }
}
