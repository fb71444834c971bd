//! URN types for CTS and CITE2 citations
//!
//! CTS format: urn:cts:NAMESPACE:TEXTGROUP[.WORK[.VERSION[.EXEMPLAR]]]:PASSAGE
//! CITE2 format: urn:cite2:NAMESPACE:COLLECTION:OBJECT
//!
//! Reference: <http://cite-architecture.org/ctsurn/>

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decomposed CTS URN
///
/// Invalid input is kept as a sentinel with `valid == false` and only
/// `id` populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtsUrn {
    /// The full URN string as given
    pub id: String,
    /// Always "urn" when valid
    pub base: String,
    /// Always "cts" when valid
    pub protocol: String,
    pub namespace: String,
    /// Dot-separated work path (textgroup[.work[.version[.exemplar]]])
    pub work: String,
    /// Passage reference, range or substring-decorated reference
    pub passage: String,
    pub valid: bool,
}

/// A decomposed CITE2 URN
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cite2Urn {
    pub id: String,
    pub base: String,
    pub protocol: String,
    pub namespace: String,
    pub collection: String,
    pub object: String,
    pub valid: bool,
}

/// Level of the work hierarchy a CTS URN points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkDepth {
    Textgroup,
    Work,
    Version,
    Exemplar,
}

impl CtsUrn {
    /// Sentinel for a string that failed validation
    pub fn invalid(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The URN without its passage component, ending in ':'
    pub fn stem(&self) -> String {
        format!(
            "{}:{}:{}:{}:",
            self.base, self.protocol, self.namespace, self.work
        )
    }

    /// Rebuild a URN in the same work for another passage reference
    pub fn with_passage(&self, passage: &str) -> String {
        format!("{}{}", self.stem(), passage)
    }

    /// Classify the work path by its dot count
    pub fn depth(&self) -> Option<WorkDepth> {
        if !self.valid {
            return None;
        }
        WorkDepth::from_components(self.work.split('.').count())
    }

    /// Check if the passage component is a range
    pub fn is_range(&self) -> bool {
        self.valid && self.passage.contains('-')
    }
}

impl Cite2Urn {
    /// Sentinel for a string that failed validation
    pub fn invalid(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl WorkDepth {
    /// Map a number of dot-separated work components to a depth
    pub fn from_components(count: usize) -> Option<Self> {
        match count {
            1 => Some(WorkDepth::Textgroup),
            2 => Some(WorkDepth::Work),
            3 => Some(WorkDepth::Version),
            4 => Some(WorkDepth::Exemplar),
            _ => None,
        }
    }
}

// Display implementations for reassembly

impl fmt::Display for CtsUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "{}", self.id);
        }
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.base, self.protocol, self.namespace, self.work, self.passage
        )
    }
}

impl fmt::Display for Cite2Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "{}", self.id);
        }
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.base, self.protocol, self.namespace, self.collection, self.object
        )
    }
}

impl fmt::Display for WorkDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkDepth::Textgroup => "textgroup",
            WorkDepth::Work => "work",
            WorkDepth::Version => "version",
            WorkDepth::Exemplar => "exemplar",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CtsUrn {
        CtsUrn {
            id: "urn:cts:greekLit:tlg0012.tlg001.msA:1.1".to_string(),
            base: "urn".to_string(),
            protocol: "cts".to_string(),
            namespace: "greekLit".to_string(),
            work: "tlg0012.tlg001.msA".to_string(),
            passage: "1.1".to_string(),
            valid: true,
        }
    }

    #[test]
    fn test_cts_display() {
        assert_eq!(sample().to_string(), "urn:cts:greekLit:tlg0012.tlg001.msA:1.1");
    }

    #[test]
    fn test_invalid_display_echoes_id() {
        let urn = CtsUrn::invalid("not a urn");
        assert!(!urn.valid);
        assert_eq!(urn.to_string(), "not a urn");
        assert_eq!(urn.depth(), None);
    }

    #[test]
    fn test_stem_and_with_passage() {
        let urn = sample();
        assert_eq!(urn.stem(), "urn:cts:greekLit:tlg0012.tlg001.msA:");
        assert_eq!(
            urn.with_passage("2.4"),
            "urn:cts:greekLit:tlg0012.tlg001.msA:2.4"
        );
    }

    #[test]
    fn test_depth_from_components() {
        assert_eq!(WorkDepth::from_components(0), None);
        assert_eq!(WorkDepth::from_components(1), Some(WorkDepth::Textgroup));
        assert_eq!(WorkDepth::from_components(4), Some(WorkDepth::Exemplar));
        assert_eq!(WorkDepth::from_components(5), None);
        assert_eq!(sample().depth(), Some(WorkDepth::Version));
    }

    #[test]
    fn test_cite2_display() {
        let urn = Cite2Urn {
            id: "urn:cite2:hmt:vaimg.2017a:VA012RN_0013".to_string(),
            base: "urn".to_string(),
            protocol: "cite2".to_string(),
            namespace: "hmt".to_string(),
            collection: "vaimg.2017a".to_string(),
            object: "VA012RN_0013".to_string(),
            valid: true,
        };
        assert_eq!(urn.to_string(), urn.id);
    }
}
