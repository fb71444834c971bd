//! Passage insertion and deletion
//!
//! Every operation works on a copy and returns the updated work. The
//! caller's work is never touched, so a failed call leaves it as it was.
//! Deletion leaves a tombstone in the vacated slot until the next sort.

use super::types::{PassLoc, Passage, Work};
use crate::error::{CiteError, Result};

impl Work {
    /// Insert a passage next to the neighbors named by its prev/next locators
    ///
    /// Only the ids of `passage.prev` and `passage.next` are read. The
    /// result is always unordered unless the work was empty.
    pub fn insert_passage(&self, mut passage: Passage) -> Result<Work> {
        if passage.is_tombstone() {
            return Err(CiteError::ArgumentError(
                "cannot insert a passage without id".to_string(),
            ));
        }

        if self.is_empty() {
            let mut work = Work::new(self.work_id.clone());
            passage.index = 0;
            passage.prev = PassLoc::none();
            passage.next = PassLoc::none();
            work.first = PassLoc::at(passage.passage_id.clone(), 0);
            work.last = work.first.clone();
            work.passages.push(passage);
            work.ordered = true;
            return Ok(work);
        }

        if self.index_by_id(&passage.passage_id).is_some() {
            return Err(CiteError::DuplicatePassage(passage.passage_id));
        }

        let head = self.head_position()?;
        let tail = self.tail_position()?;
        let prev = self.index_by_id(&passage.prev.passage_id);
        let next = self.index_by_id(&passage.next.passage_id);

        let mut work = self.clone();
        let position = work.passages.len();
        let own = PassLoc::at(passage.passage_id.clone(), position);
        work.first = work.locator(head);
        work.last = work.locator(tail);

        match (prev, next) {
            (Some(prev), None) => {
                // Take over prev's old successor, if any
                let successor = work.resolve(&work.passages[prev].next);
                passage.prev = work.locator(prev);
                passage.next = successor.map(|s| work.locator(s)).unwrap_or_default();
                work.passages[prev].next = own.clone();
                match successor {
                    Some(s) => work.passages[s].prev = own.clone(),
                    None => work.last = own.clone(),
                }
            }
            (None, Some(next)) => {
                let predecessor = work.resolve(&work.passages[next].prev);
                passage.next = work.locator(next);
                passage.prev = predecessor.map(|p| work.locator(p)).unwrap_or_default();
                work.passages[next].prev = own.clone();
                match predecessor {
                    Some(p) => work.passages[p].next = own.clone(),
                    None => work.first = own.clone(),
                }
            }
            (Some(prev), Some(next)) if prev != next => {
                passage.prev = work.locator(prev);
                passage.next = work.locator(next);
                work.passages[prev].next = own.clone();
                work.passages[next].prev = own.clone();
            }
            (Some(_), Some(_)) => {
                return Err(CiteError::ArgumentError(format!(
                    "passage {} names {} as both neighbors",
                    passage.passage_id, passage.prev.passage_id
                )));
            }
            (None, None) => {
                let missing = if passage.prev.passage_id.is_empty() {
                    passage.next.passage_id.clone()
                } else {
                    passage.prev.passage_id.clone()
                };
                return Err(CiteError::PassageNotFound(missing));
            }
        }

        passage.index = position;
        work.passages.push(passage);
        work.ordered = false;
        Ok(work)
    }

    /// Delete a passage by id, relinking its neighbors
    pub fn delete_passage(&self, passage_id: &str) -> Result<Work> {
        if self.is_empty() {
            return Err(CiteError::EmptyWork(self.work_id.clone()));
        }
        let position = self
            .index_by_id(passage_id)
            .ok_or_else(|| CiteError::PassageNotFound(passage_id.to_string()))?;

        let passage = &self.passages[position];
        match (passage.prev.exists, passage.next.exists) {
            (false, false) => Ok(self.detach_unlinked(position)),
            (false, true) => self.unlink_head(position),
            (true, false) => self.unlink_tail(position),
            (true, true) => {
                let prev = self.resolve_link(&passage.prev)?;
                let next = self.resolve_link(&passage.next)?;

                let mut work = self.clone();
                work.passages[prev].next = work.locator(next);
                work.passages[next].prev = work.locator(prev);
                work.passages[position] = Passage::default();
                work.ordered = false;
                Ok(work)
            }
        }
    }

    /// Delete the head of the chain
    pub fn delete_first(&self) -> Result<Work> {
        let head = self.head_position()?;
        if !self.passages[head].next.exists {
            return Ok(self.detach_unlinked(head));
        }
        self.unlink_head(head)
    }

    /// Delete the tail of the chain
    pub fn delete_last(&self) -> Result<Work> {
        let tail = self.tail_position()?;
        if !self.passages[tail].prev.exists {
            return Ok(self.detach_unlinked(tail));
        }
        self.unlink_tail(tail)
    }

    fn unlink_head(&self, position: usize) -> Result<Work> {
        let next = self.resolve_link(&self.passages[position].next)?;

        let mut work = self.clone();
        work.passages[next].prev = PassLoc::none();
        work.first = work.locator(next);
        work.passages[position] = Passage::default();
        work.ordered = false;
        Ok(work)
    }

    fn unlink_tail(&self, position: usize) -> Result<Work> {
        let prev = self.resolve_link(&self.passages[position].prev)?;

        let mut work = self.clone();
        work.passages[prev].next = PassLoc::none();
        work.last = work.locator(prev);
        work.passages[position] = Passage::default();
        work.ordered = false;
        Ok(work)
    }

    /// Remove a passage that has neither link
    ///
    /// Only the sole live passage empties the work; a stray passage next
    /// to a chain is tombstoned on its own.
    fn detach_unlinked(&self, position: usize) -> Work {
        if self.live_count() == 1 {
            return self.emptied();
        }
        let mut work = self.clone();
        work.passages[position] = Passage::default();
        work.ordered = false;
        work
    }

    fn resolve_link(&self, loc: &PassLoc) -> Result<usize> {
        self.resolve(loc)
            .ok_or_else(|| CiteError::PassageNotFound(loc.passage_id.clone()))
    }

    /// Fresh empty work with the same id
    fn emptied(&self) -> Work {
        Work {
            ordered: true,
            ..Work::new(self.work_id.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Work {
        Work::from_texts("w", [("1", "A"), ("3", "C")])
    }

    fn chain_ids(work: &Work) -> Vec<String> {
        let mut ids = Vec::new();
        let mut cursor = work.head_position().ok();
        while let Some(position) = cursor {
            let passage = &work.passages[position];
            ids.push(passage.passage_id.clone());
            cursor = work.resolve(&passage.next);
        }
        ids
    }

    #[test]
    fn test_insert_into_empty() {
        let work = Work::new("w")
            .insert_passage(Passage::new("1", "A").after("x").before("y"))
            .unwrap();
        assert_eq!(work.passages.len(), 1);
        assert_eq!(work.first, PassLoc::at("1", 0));
        assert_eq!(work.last, PassLoc::at("1", 0));
        assert!(!work.passages[0].prev.exists);
        assert!(!work.passages[0].next.exists);
        assert!(work.ordered);
    }

    #[test]
    fn test_insert_between() {
        let original = sample();
        let work = original
            .insert_passage(Passage::new("2", "B").after("1").before("3"))
            .unwrap();

        assert!(!work.ordered);
        assert_eq!(work.passages[2].index, 2);
        assert_eq!(work.passages[0].next, PassLoc::at("2", 2));
        assert_eq!(work.passages[1].prev, PassLoc::at("2", 2));
        assert_eq!(work.passages[2].prev, PassLoc::at("1", 0));
        assert_eq!(work.passages[2].next, PassLoc::at("3", 1));
        assert_eq!(chain_ids(&work), ["1", "2", "3"]);

        // input untouched
        assert_eq!(original, sample());
    }

    #[test]
    fn test_insert_new_tail() {
        let work = sample()
            .insert_passage(Passage::new("4", "D").after("3"))
            .unwrap();
        assert_eq!(work.last, PassLoc::at("4", 2));
        assert_eq!(work.passages[1].next, PassLoc::at("4", 2));
        assert!(!work.passages[2].next.exists);
        assert_eq!(chain_ids(&work), ["1", "3", "4"]);
    }

    #[test]
    fn test_insert_new_head() {
        let work = sample()
            .insert_passage(Passage::new("0", "Z").before("1"))
            .unwrap();
        assert_eq!(work.first, PassLoc::at("0", 2));
        assert_eq!(work.passages[0].prev, PassLoc::at("0", 2));
        assert!(!work.passages[2].prev.exists);
        assert_eq!(chain_ids(&work), ["0", "1", "3"]);
    }

    #[test]
    fn test_insert_after_interior_keeps_chain() {
        let work = sample()
            .insert_passage(Passage::new("2", "B").after("1"))
            .unwrap();
        assert_eq!(chain_ids(&work), ["1", "2", "3"]);
        assert_eq!(work.last, PassLoc::at("3", 1));
    }

    #[test]
    fn test_insert_errors() {
        let work = sample();
        assert!(matches!(
            work.insert_passage(Passage::new("2", "B").after("9")),
            Err(CiteError::PassageNotFound(id)) if id == "9"
        ));
        assert!(matches!(
            work.insert_passage(Passage::new("1", "again").after("3")),
            Err(CiteError::DuplicatePassage(_))
        ));
        assert!(matches!(
            work.insert_passage(Passage::new("2", "B").after("1").before("1")),
            Err(CiteError::ArgumentError(_))
        ));
        assert!(matches!(
            work.insert_passage(Passage::default()),
            Err(CiteError::ArgumentError(_))
        ));
    }

    #[test]
    fn test_insert_without_boundaries() {
        let loose = Work::from_passages(
            "w",
            vec![Passage::new("1", "A"), Passage::new("3", "C")],
        );
        assert!(matches!(
            loose.insert_passage(Passage::new("2", "B").after("1")),
            Err(CiteError::BoundaryNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_interior() {
        let work = Work::from_texts("w", [("1", "A"), ("2", "B"), ("3", "C")])
            .delete_passage("2")
            .unwrap();
        assert!(work.passages[1].is_tombstone());
        assert_eq!(work.passages[0].next, PassLoc::at("3", 2));
        assert_eq!(work.passages[2].prev, PassLoc::at("1", 0));
        assert!(!work.ordered);
        assert_eq!(chain_ids(&work), ["1", "3"]);
    }

    #[test]
    fn test_delete_head_and_tail() {
        let base = Work::from_texts("w", [("1", "A"), ("2", "B"), ("3", "C")]);

        let work = base.delete_passage("1").unwrap();
        assert_eq!(work.first, PassLoc::at("2", 1));
        assert!(!work.passages[1].prev.exists);
        assert_eq!(chain_ids(&work), ["2", "3"]);

        let work = base.delete_passage("3").unwrap();
        assert_eq!(work.last, PassLoc::at("2", 1));
        assert!(!work.passages[1].next.exists);
        assert_eq!(chain_ids(&work), ["1", "2"]);
    }

    #[test]
    fn test_delete_first_and_last() {
        let base = Work::from_texts("w", [("1", "A"), ("2", "B"), ("3", "C")]);
        assert_eq!(chain_ids(&base.delete_first().unwrap()), ["2", "3"]);
        assert_eq!(chain_ids(&base.delete_last().unwrap()), ["1", "2"]);

        let single = Work::from_texts("w", [("1", "A")]);
        assert!(single.delete_first().unwrap().passages.is_empty());
        assert!(single.delete_last().unwrap().passages.is_empty());
    }

    #[test]
    fn test_delete_sole_passage() {
        let work = Work::from_texts("w", [("1", "A")]).delete_passage("1").unwrap();
        assert_eq!(work.work_id, "w");
        assert!(work.passages.is_empty());
        assert!(work.ordered);
        assert!(!work.first.exists);
    }

    #[test]
    fn test_delete_unlinked_keeps_chain() {
        let mut base = Work::from_texts("w", [("1", "A"), ("2", "B"), ("3", "C")]);
        base.passages.push(Passage::new("x", "stray"));

        let work = base.delete_passage("x").unwrap();
        assert_eq!(work.live_count(), 3);
        assert!(work.passages[3].is_tombstone());
        assert!(!work.ordered);
        assert_eq!(chain_ids(&work), ["1", "2", "3"]);
        assert_eq!(work.sort_passages().unwrap().live_count(), 3);
    }

    #[test]
    fn test_delete_first_unlinked_head_keeps_rest() {
        let mut base = Work::from_texts("w", [("1", "A"), ("2", "B")]);
        base.passages.push(Passage::new("x", "stray"));
        base.first = PassLoc::at("x", 2);

        let work = base.delete_first().unwrap();
        assert_eq!(work.live_count(), 2);
        assert!(work.passages[2].is_tombstone());
        assert_eq!(chain_ids(&work), ["1", "2"]);
    }

    #[test]
    fn test_delete_errors() {
        assert!(matches!(
            Work::new("w").delete_passage("1"),
            Err(CiteError::EmptyWork(_))
        ));
        assert!(matches!(
            sample().delete_passage("9"),
            Err(CiteError::PassageNotFound(_))
        ));
        assert!(matches!(
            sample().delete_passage(""),
            Err(CiteError::PassageNotFound(_))
        ));
    }

    #[test]
    fn test_delete_twice() {
        let work = Work::from_texts("w", [("1", "A"), ("2", "B"), ("3", "C"), ("4", "D")])
            .delete_passage("2")
            .unwrap()
            .delete_passage("3")
            .unwrap();
        assert_eq!(chain_ids(&work), ["1", "4"]);
        assert_eq!(work.live_count(), 2);
    }
}
