//! Canonical view of an ordered work
//!
//! Positional queries are only exposed through [`Canonical`], which can
//! only be obtained from a work whose `ordered` flag is set. While a work
//! is unordered its `index` fields may be stale and are not readable here.

use super::types::{Passage, Work};
use crate::error::{CiteError, Result};

/// Borrowed view of a work in canonical order
#[derive(Debug, Clone, Copy)]
pub struct Canonical<'a> {
    work: &'a Work,
}

impl Work {
    /// Canonical view, if the work is marked ordered
    pub fn canonical(&self) -> Option<Canonical<'_>> {
        self.ordered.then_some(Canonical { work: self })
    }
}

impl<'a> Canonical<'a> {
    /// The underlying work
    pub fn work(&self) -> &'a Work {
        self.work
    }

    /// Number of passages
    pub fn len(&self) -> usize {
        self.work.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.work.passages.is_empty()
    }

    /// Passage at a canonical index
    pub fn get(&self, index: usize) -> Option<&'a Passage> {
        self.work.passages.get(index)
    }

    /// Canonical index of a passage
    pub fn position(&self, passage_id: &str) -> Result<usize> {
        self.work
            .index_by_id(passage_id)
            .ok_or_else(|| CiteError::PassageNotFound(passage_id.to_string()))
    }

    /// Passages from `start_id` to `end_id`, both inclusive
    pub fn span(&self, start_id: &str, end_id: &str) -> Result<&'a [Passage]> {
        let start = self.position(start_id)?;
        let end = self.position(end_id)?;
        if end < start {
            return Err(CiteError::InvertedRange {
                start: start_id.to_string(),
                end: end_id.to_string(),
            });
        }
        Ok(&self.work.passages[start..=end])
    }

    /// Iterate passages in canonical order
    pub fn iter(&self) -> std::slice::Iter<'a, Passage> {
        self.work.passages.iter()
    }
}
