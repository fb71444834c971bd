//! Citation error types
//!
//! Unified error handling for URN parsing, passage store mutation and
//! text extraction.

use thiserror::Error;

/// Unified citation error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CiteError {
    /// Malformed citation string
    #[error("Invalid URN: {0}")]
    InvalidUrn(String),

    /// No passage carries the requested id
    #[error("Passage not found: {0}")]
    PassageNotFound(String),

    /// Head or tail of the passage chain could not be resolved
    #[error("Boundary not found in work {work}: {boundary}")]
    BoundaryNotFound { work: String, boundary: &'static str },

    /// Operation requires at least one passage
    #[error("Work is empty: {0}")]
    EmptyWork(String),

    /// Chain traversal revisited a passage before reaching its target
    #[error("Work {work} is cyclic: passage {passage} visited twice")]
    CyclicWork { work: String, passage: String },

    /// Chain traversal hit a missing next link before reaching its target
    #[error("Unexpected end of work {work} after passage {passage}")]
    UnexpectedEndOfWork { work: String, passage: String },

    /// Substring selector is malformed or asks for too many occurrences
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Substring pattern does not occur in the passage text
    #[error("Pattern '{pattern}' not found in '{text}'")]
    PatternNotFound { pattern: String, text: String },

    /// Same-passage range where an endpoint lacks its @pattern
    #[error("Substring range within one passage must have the form id@start-id@end: {0}")]
    AmbiguousSameLineSubstring(String),

    /// Inserted passage id is already present
    #[error("Duplicate passage: {0}")]
    DuplicatePassage(String),

    /// Range end precedes its start in canonical order
    #[error("Range end {end} precedes start {start}")]
    InvertedRange { start: String, end: String },
}

/// Result type alias for citation operations
pub type Result<T> = std::result::Result<T, CiteError>;
