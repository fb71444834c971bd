//! Passage canonicalization
//!
//! Rebuilds a dense, index-ordered passage sequence by walking the
//! neighbor chain from head to tail. Tombstones and passages that are not
//! reachable from the head are dropped.

use std::collections::HashSet;

use super::types::{PassLoc, Passage, Work};
use crate::error::{CiteError, Result};

impl Work {
    /// Sort the passages from first to last following their links
    pub fn sort_passages(&self) -> Result<Work> {
        if self.is_empty() {
            return Err(CiteError::EmptyWork(self.work_id.clone()));
        }

        tracing::debug!(
            "Sorting {} passages in {} (ordered: {})",
            self.passages.len(),
            self.work_id,
            self.ordered
        );

        let head = self.head_position()?;
        let tail = self.tail_position()?;
        let order = self.walk_chain(head, tail)?;

        let ids: Vec<&str> = order
            .iter()
            .map(|&position| self.passages[position].passage_id.as_str())
            .collect();

        let passages: Vec<Passage> = order
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let mut passage = self.passages[position].clone();
                passage.index = index;
                passage.prev = match index {
                    0 => PassLoc::none(),
                    _ => PassLoc::at(ids[index - 1], index - 1),
                };
                passage.next = match ids.get(index + 1) {
                    Some(next_id) => PassLoc::at(*next_id, index + 1),
                    None => PassLoc::none(),
                };
                passage
            })
            .collect();

        let dropped = self.live_count() - passages.len();
        if dropped > 0 {
            tracing::debug!(
                "Dropped {} passages not reachable from the head of {}",
                dropped,
                self.work_id
            );
        }

        let last = passages.len() - 1;
        let work = Work {
            work_id: self.work_id.clone(),
            first: PassLoc::at(passages[0].passage_id.clone(), 0),
            last: PassLoc::at(passages[last].passage_id.clone(), last),
            passages,
            ordered: true,
        };

        tracing::debug!(
            "Sorted {}: first {}, last {}",
            work.work_id,
            work.first.passage_id,
            work.last.passage_id
        );
        Ok(work)
    }

    /// Slice positions from head to tail in chain order
    fn walk_chain(&self, head: usize, tail: usize) -> Result<Vec<usize>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut cursor = head;

        loop {
            let passage = &self.passages[cursor];
            if !visited.insert(cursor) {
                return Err(CiteError::CyclicWork {
                    work: self.work_id.clone(),
                    passage: passage.passage_id.clone(),
                });
            }
            tracing::trace!("visiting {} at slot {}", passage.passage_id, cursor);
            order.push(cursor);

            if cursor == tail {
                return Ok(order);
            }
            if !passage.next.exists {
                return Err(CiteError::UnexpectedEndOfWork {
                    work: self.work_id.clone(),
                    passage: passage.passage_id.clone(),
                });
            }
            cursor = self
                .resolve(&passage.next)
                .ok_or_else(|| CiteError::PassageNotFound(passage.next.passage_id.clone()))?;
        }
    }
}
