//! Passage lookups
//!
//! Linear scans over the passage arena. Neighbors are resolved by id;
//! the stored index is only used as a hint.

use super::types::{PassLoc, Passage, Work};
use crate::error::{CiteError, Result};

/// Which neighbor link to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Work {
    /// Get a passage by id
    pub fn passage_by_id(&self, passage_id: &str) -> Result<&Passage> {
        self.index_by_id(passage_id)
            .map(|i| &self.passages[i])
            .ok_or_else(|| CiteError::PassageNotFound(passage_id.to_string()))
    }

    /// Slice position of a passage (not its `index` field)
    pub fn index_by_id(&self, passage_id: &str) -> Option<usize> {
        if passage_id.is_empty() {
            return None;
        }
        self.passages.iter().position(|p| p.passage_id == passage_id)
    }

    /// Get the passage at a slice position
    pub fn passage_at(&self, position: usize) -> Result<&Passage> {
        self.passages
            .get(position)
            .ok_or_else(|| CiteError::PassageNotFound(format!("position {}", position)))
    }

    /// First passage in the slice (not necessarily the chain head)
    pub fn first_in_slice(&self) -> Option<&Passage> {
        self.passages.first()
    }

    /// Last passage in the slice (not necessarily the chain tail)
    pub fn last_in_slice(&self) -> Option<&Passage> {
        self.passages.last()
    }

    /// Slice position a locator points at
    pub fn resolve(&self, loc: &PassLoc) -> Option<usize> {
        if !loc.exists || loc.passage_id.is_empty() {
            return None;
        }
        match self.passages.get(loc.index) {
            Some(p) if p.passage_id == loc.passage_id => Some(loc.index),
            _ => self.index_by_id(&loc.passage_id),
        }
    }

    /// Follow a passage's prev or next link
    ///
    /// Returns `Ok(None)` at a chain boundary.
    pub fn neighbor(&self, passage_id: &str, direction: Direction) -> Result<Option<&Passage>> {
        let passage = self.passage_by_id(passage_id)?;
        let loc = match direction {
            Direction::Prev => &passage.prev,
            Direction::Next => &passage.next,
        };
        if !loc.exists {
            return Ok(None);
        }
        self.resolve(loc)
            .map(|i| Some(&self.passages[i]))
            .ok_or_else(|| CiteError::PassageNotFound(loc.passage_id.clone()))
    }

    /// Slice position of the stored head locator, if it is usable
    pub fn first_index(&self) -> Option<usize> {
        self.resolve(&self.first)
            .filter(|&i| !self.passages[i].prev.exists)
    }

    /// Slice position of the stored tail locator, if it is usable
    pub fn last_index(&self) -> Option<usize> {
        self.resolve(&self.last)
            .filter(|&i| !self.passages[i].next.exists)
    }

    /// Scan for a passage that starts a chain
    pub fn find_first_index(&self) -> Option<usize> {
        self.passages
            .iter()
            .position(|p| !p.is_tombstone() && !p.prev.exists && p.next.exists)
    }

    /// Scan for a passage that ends a chain
    pub fn find_last_index(&self) -> Option<usize> {
        self.passages
            .iter()
            .rposition(|p| !p.is_tombstone() && p.prev.exists && !p.next.exists)
    }

    /// Resolve the chain head, falling back to a scan
    pub(crate) fn head_position(&self) -> Result<usize> {
        self.boundary_position(
            &self.first,
            self.first_index(),
            || self.find_first_index(),
            "first",
        )
    }

    /// Resolve the chain tail, falling back to a scan
    pub(crate) fn tail_position(&self) -> Result<usize> {
        self.boundary_position(
            &self.last,
            self.last_index(),
            || self.find_last_index(),
            "last",
        )
    }

    fn boundary_position(
        &self,
        locator: &PassLoc,
        stored: Option<usize>,
        scan: impl FnOnce() -> Option<usize>,
        boundary: &'static str,
    ) -> Result<usize> {
        if let Some(position) = stored {
            return Ok(position);
        }

        if locator.exists {
            tracing::warn!(
                "{} locator {} of work {} is stale, scanning",
                boundary,
                locator.passage_id,
                self.work_id
            );
        } else {
            tracing::debug!("work {} has no {} locator, scanning", self.work_id, boundary);
        }
        if let Some(position) = scan() {
            return Ok(position);
        }

        // A lone passage has neither link
        let mut live = self
            .passages
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_tombstone());
        match (live.next(), live.next()) {
            (Some((position, p)), None) if !p.prev.exists && !p.next.exists => Ok(position),
            (None, _) => Err(CiteError::EmptyWork(self.work_id.clone())),
            _ => {
                tracing::warn!("no {} passage found in work {}", boundary, self.work_id);
                Err(CiteError::BoundaryNotFound {
                    work: self.work_id.clone(),
                    boundary,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Work {
        Work::from_texts("w", [("a", "A"), ("b", "B"), ("c", "C")])
    }

    /// Chain a -> b -> c stored in slice order [c, a, b] with stale indices
    fn scrambled() -> Work {
        let mut work = sample();
        work.passages.rotate_right(1);
        work.ordered = false;
        work.first = PassLoc::none();
        work.last = PassLoc::none();
        work
    }

    #[test]
    fn test_lookup_by_id() {
        let work = sample();
        assert_eq!(work.passage_by_id("b").unwrap().text.txt, "B");
        assert_eq!(work.index_by_id("c"), Some(2));
        assert_eq!(work.index_by_id(""), None);
        assert!(matches!(
            work.passage_by_id("z"),
            Err(CiteError::PassageNotFound(id)) if id == "z"
        ));
    }

    #[test]
    fn test_passage_at_bounds() {
        let work = sample();
        assert_eq!(work.passage_at(0).unwrap().passage_id, "a");
        assert!(work.passage_at(3).is_err());
    }

    #[test]
    fn test_slice_ends_differ_from_chain_ends() {
        let work = scrambled();
        assert_eq!(work.first_in_slice().unwrap().passage_id, "c");
        assert_eq!(work.last_in_slice().unwrap().passage_id, "b");
        assert_eq!(work.find_first_index(), Some(1));
        assert_eq!(work.find_last_index(), Some(0));
    }

    #[test]
    fn test_resolve_uses_id_when_index_is_stale() {
        let work = scrambled();
        // a's next still says index 1, which now holds a
        let a = work.passage_by_id("a").unwrap();
        assert_eq!(work.resolve(&a.next), Some(2));
        assert_eq!(work.resolve(&PassLoc::none()), None);
    }

    #[test]
    fn test_neighbor() {
        let work = scrambled();
        assert_eq!(
            work.neighbor("a", Direction::Next).unwrap().unwrap().passage_id,
            "b"
        );
        assert_eq!(
            work.neighbor("c", Direction::Prev).unwrap().unwrap().passage_id,
            "b"
        );
        assert!(work.neighbor("a", Direction::Prev).unwrap().is_none());
        assert!(work.neighbor("z", Direction::Next).is_err());
    }

    #[test]
    fn test_boundaries_fallback_to_scan() {
        let work = scrambled();
        assert_eq!(work.first_index(), None);
        assert_eq!(work.head_position().unwrap(), 1);
        assert_eq!(work.tail_position().unwrap(), 0);
    }

    #[test]
    fn test_stale_first_locator_ignored() {
        let mut work = sample();
        // b has a prev, so it cannot be the head
        work.first = PassLoc::at("b", 1);
        assert_eq!(work.first_index(), None);
        assert_eq!(work.head_position().unwrap(), 0);
    }

    #[test]
    fn test_stale_last_locator_ignored() {
        let mut work = sample();
        // points at a tombstone left by a delete
        work.passages[2] = Passage::default();
        work.passages[1].next = PassLoc::none();
        work.last = PassLoc::at("c", 2);
        assert_eq!(work.last_index(), None);
        assert_eq!(work.tail_position().unwrap(), 1);
    }

    #[test]
    fn test_single_unlinked_passage_is_both_ends() {
        let work = Work::from_passages("w", vec![Passage::default(), Passage::new("a", "A")]);
        assert_eq!(work.head_position().unwrap(), 1);
        assert_eq!(work.tail_position().unwrap(), 1);
    }

    #[test]
    fn test_boundary_errors() {
        let empty = Work::new("w");
        assert!(matches!(empty.head_position(), Err(CiteError::EmptyWork(_))));

        let loose = Work::from_passages(
            "w",
            vec![Passage::new("a", "A"), Passage::new("b", "B")],
        );
        assert!(matches!(
            loose.head_position(),
            Err(CiteError::BoundaryNotFound { boundary: "first", .. })
        ));
    }
}
