//! URN-driven text extraction
//!
//! Resolves a CTS URN (single passage, substring, or range) against a
//! work and returns the addressed text as `(id, text)` records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::selector::Selector;
use crate::error::{CiteError, Result};
use crate::passage::{Passage, Work};
use crate::urn::{find_range_endpoints, is_cts_urn, is_range};

/// A text extract and the id it was requested under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAndId {
    pub id: String,
    pub text: String,
}

/// One side of a request: a full passage URN plus optional selector
#[derive(Debug)]
struct Reference<'a> {
    /// The reference as written, decoration included
    decorated: &'a str,
    /// Passage URN without the `@` part
    passage_id: &'a str,
    selector: Option<Selector>,
}

impl<'a> Reference<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let mut parts = input.split('@');
        let passage_id = parts.next().unwrap_or_default();
        let selector = parts.next().map(Selector::parse).transpose()?;
        if parts.next().is_some() {
            return Err(CiteError::InvalidUrn(format!(
                "more than one '@' in {}",
                input
            )));
        }
        Ok(Self {
            decorated: input,
            passage_id,
            selector,
        })
    }
}

/// Extract the text addressed by a CTS URN from a work
pub fn extract_text(urn: &str, work: &Work) -> Result<Vec<TextAndId>> {
    if !is_cts_urn(urn) {
        return Err(CiteError::InvalidUrn(urn.to_string()));
    }

    if !is_range(urn) {
        return extract_single(urn, work).map(|extract| vec![extract]);
    }

    let (start, end) = find_range_endpoints(urn)?;
    let start = Reference::parse(&start)?;
    let end = Reference::parse(&end)?;

    if start.passage_id == end.passage_id {
        return extract_within(urn, &start, &end, work).map(|extract| vec![extract]);
    }

    let passages: Vec<&Passage> = match work.canonical() {
        Some(view) => view.span(start.passage_id, end.passage_id)?.iter().collect(),
        None => follow_chain(work, start.passage_id, end.passage_id)?,
    };
    tracing::debug!(
        "Range {} covers {} passages (ordered: {})",
        urn,
        passages.len(),
        work.ordered
    );

    let last = passages.len() - 1;
    let mut extracts: Vec<TextAndId> = passages
        .iter()
        .enumerate()
        .map(|(i, passage)| TextAndId {
            id: match i {
                0 => start.decorated.to_string(),
                i if i == last => end.decorated.to_string(),
                _ => passage.passage_id.clone(),
            },
            text: passage.text.txt.clone(),
        })
        .collect();

    if let Some(selector) = &start.selector {
        extracts[0].text = selector.from_pattern(&extracts[0].text)?;
    }
    if let Some(selector) = &end.selector {
        extracts[last].text = selector.through_pattern(&extracts[last].text)?;
    }

    Ok(extracts)
}

/// Single passage, optionally narrowed to a checked pattern
fn extract_single(urn: &str, work: &Work) -> Result<TextAndId> {
    let reference = Reference::parse(urn)?;
    let passage = work.passage_by_id(reference.passage_id)?;

    let text = match reference.selector {
        None => passage.text.txt.clone(),
        Some(selector) => {
            selector.from_pattern(&passage.text.txt)?;
            selector.pattern
        }
    };

    Ok(TextAndId {
        id: urn.to_string(),
        text,
    })
}

/// Range whose endpoints are substrings of one passage
fn extract_within(
    urn: &str,
    start: &Reference<'_>,
    end: &Reference<'_>,
    work: &Work,
) -> Result<TextAndId> {
    let (Some(from), Some(through)) = (&start.selector, &end.selector) else {
        return Err(CiteError::AmbiguousSameLineSubstring(urn.to_string()));
    };

    let passage = work.passage_by_id(start.passage_id)?;
    let text = through.through_pattern(&from.from_pattern(&passage.text.txt)?)?;

    Ok(TextAndId {
        id: urn.to_string(),
        text,
    })
}

/// Walk next links from `start_id` to `end_id` in an unordered work
fn follow_chain<'w>(work: &'w Work, start_id: &str, end_id: &str) -> Result<Vec<&'w Passage>> {
    let mut current = work.passage_by_id(start_id)?;
    work.passage_by_id(end_id)?;

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(current.passage_id.as_str());
    let mut passages = Vec::new();

    loop {
        tracing::trace!("following {}", current.passage_id);
        passages.push(current);

        if current.passage_id == end_id {
            return Ok(passages);
        }
        if !current.next.exists {
            return Err(CiteError::UnexpectedEndOfWork {
                work: work.work_id.clone(),
                passage: current.passage_id.clone(),
            });
        }

        let next_id = current.next.passage_id.as_str();
        if !visited.insert(next_id) {
            return Err(CiteError::CyclicWork {
                work: work.work_id.clone(),
                passage: next_id.to_string(),
            });
        }

        current = work
            .resolve(&current.next)
            .map(|position| &work.passages[position])
            .ok_or_else(|| CiteError::PassageNotFound(next_id.to_string()))?;
    }
}
