//! Passage store types
//!
//! A [`Work`] is an arena of passages linked into a chain by
//! [`PassLoc`] locators. Locators name a neighbor by id and by its slice
//! position; the position is only trustworthy while the work is ordered.

use serde::{Deserialize, Serialize};

/// Weak reference to a neighboring passage
///
/// `exists == false` marks a chain boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassLoc {
    pub exists: bool,
    pub passage_id: String,
    pub index: usize,
}

/// Parallel encodings of the same passage text
///
/// Only `txt` is read by the store and the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncText {
    pub txt: String,
    pub brucheion: String,
    pub markdown: String,
    pub cex: String,
    pub xml: String,
    pub diplomatic: String,
    pub normalised: String,
}

/// Simple linked-data triple
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triple {
    pub subject: String,
    pub verb: String,
    pub object: String,
}

/// Relation verb usable in a [`Triple`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiteVerb {
    pub id: String,
    pub summary: String,
    pub subject: String,
    pub object: String,
    pub inverse_id: String,
}

/// Smallest addressable unit of text
///
/// A passage with an empty id is a tombstone left behind by deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub passage_id: String,
    #[serde(default)]
    pub range: bool,
    #[serde(default)]
    pub text: EncText,
    /// Position in canonical order; ignore while the work is unordered
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub prev: PassLoc,
    #[serde(default)]
    pub next: PassLoc,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_links: Vec<Triple>,
}

/// Container for the passages of one edition of a text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub work_id: String,
    #[serde(default)]
    pub passages: Vec<Passage>,
    /// Set only while indices are dense and match chain order
    #[serde(default)]
    pub ordered: bool,
    #[serde(default)]
    pub first: PassLoc,
    #[serde(default)]
    pub last: PassLoc,
}

/// Collection of works
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Textgroup {
    pub textgroup_id: String,
    #[serde(default)]
    pub works: Vec<Work>,
}

impl PassLoc {
    /// Locator for an existing passage
    pub fn at(passage_id: impl Into<String>, index: usize) -> Self {
        Self {
            exists: true,
            passage_id: passage_id.into(),
            index,
        }
    }

    /// Boundary marker
    pub fn none() -> Self {
        Self::default()
    }
}

impl EncText {
    /// Text with only the plain encoding filled in
    pub fn plain(txt: impl Into<String>) -> Self {
        Self {
            txt: txt.into(),
            ..Self::default()
        }
    }
}

impl Passage {
    /// Create an unlinked passage with plain text
    pub fn new(passage_id: impl Into<String>, txt: impl Into<String>) -> Self {
        Self {
            passage_id: passage_id.into(),
            text: EncText::plain(txt),
            ..Self::default()
        }
    }

    /// Set the prev neighbor by id
    pub fn after(mut self, prev_id: impl Into<String>) -> Self {
        self.prev = PassLoc::at(prev_id, 0);
        self
    }

    /// Set the next neighbor by id
    pub fn before(mut self, next_id: impl Into<String>) -> Self {
        self.next = PassLoc::at(next_id, 0);
        self
    }

    /// Check if this slot was vacated by a deletion
    pub fn is_tombstone(&self) -> bool {
        self.passage_id.is_empty()
    }
}

impl Work {
    /// Create an empty work
    pub fn new(work_id: impl Into<String>) -> Self {
        Self {
            work_id: work_id.into(),
            ..Self::default()
        }
    }

    /// Create a work from passages whose locators are already set
    ///
    /// The result is unordered until sorted.
    pub fn from_passages(work_id: impl Into<String>, passages: Vec<Passage>) -> Self {
        Self {
            work_id: work_id.into(),
            passages,
            ..Self::default()
        }
    }

    /// Build an ordered work from `(id, text)` pairs in reading order
    pub fn from_texts<I, S, T>(work_id: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut passages: Vec<Passage> = texts
            .into_iter()
            .enumerate()
            .map(|(index, (id, txt))| Passage {
                index,
                ..Passage::new(id, txt)
            })
            .collect();

        let ids: Vec<String> = passages.iter().map(|p| p.passage_id.clone()).collect();
        for (index, passage) in passages.iter_mut().enumerate() {
            if index > 0 {
                passage.prev = PassLoc::at(ids[index - 1].clone(), index - 1);
            }
            if let Some(next_id) = ids.get(index + 1) {
                passage.next = PassLoc::at(next_id.clone(), index + 1);
            }
        }

        let mut work = Self::new(work_id);
        if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
            work.first = PassLoc::at(first.clone(), 0);
            work.last = PassLoc::at(last.clone(), ids.len() - 1);
        }
        work.passages = passages;
        work.ordered = true;
        work
    }

    /// Passages that are not tombstones, in slice order
    pub fn live_passages(&self) -> impl Iterator<Item = &Passage> {
        self.passages.iter().filter(|p| !p.is_tombstone())
    }

    /// Number of passages that are not tombstones
    pub fn live_count(&self) -> usize {
        self.live_passages().count()
    }

    /// Check if the work has no live passages
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Locator for the passage at a slice position
    pub(crate) fn locator(&self, position: usize) -> PassLoc {
        PassLoc::at(self.passages[position].passage_id.clone(), position)
    }
}

impl Textgroup {
    pub fn new(textgroup_id: impl Into<String>) -> Self {
        Self {
            textgroup_id: textgroup_id.into(),
            works: Vec::new(),
        }
    }

    /// Look up a work by id
    pub fn work(&self, work_id: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.work_id == work_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_texts_links_chain() {
        let work = Work::from_texts("w", [("a", "A"), ("b", "B"), ("c", "C")]);
        assert!(work.ordered);
        assert_eq!(work.first, PassLoc::at("a", 0));
        assert_eq!(work.last, PassLoc::at("c", 2));
        assert_eq!(work.passages[1].prev, PassLoc::at("a", 0));
        assert_eq!(work.passages[1].next, PassLoc::at("c", 2));
        assert!(!work.passages[0].prev.exists);
        assert!(!work.passages[2].next.exists);
        assert_eq!(work.passages[2].index, 2);
    }

    #[test]
    fn test_from_texts_empty() {
        let work = Work::from_texts("w", Vec::<(String, String)>::new());
        assert!(work.is_empty());
        assert!(!work.first.exists);
    }

    #[test]
    fn test_tombstones_not_live() {
        let mut work = Work::from_texts("w", [("a", "A"), ("b", "B")]);
        work.passages[0] = Passage::default();
        assert!(work.passages[0].is_tombstone());
        assert_eq!(work.live_count(), 1);
    }

    #[test]
    fn test_work_json_minimal() {
        let json = r#"{
            "workId": "w",
            "passages": [{"passageId": "a", "text": {"txt": "A"}}]
        }"#;
        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.passages[0].text.txt, "A");
        assert!(!work.ordered);
        assert!(!work.passages[0].next.exists);
    }

    #[test]
    fn test_textgroup_lookup() {
        let mut group = Textgroup::new("tg");
        group.works.push(Work::new("w1"));
        assert!(group.work("w1").is_some());
        assert!(group.work("w2").is_none());
    }
}
