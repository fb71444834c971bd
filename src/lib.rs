//! Cite Passages Library
//!
//! Citable, addressable text passages for digital-humanities corpora.
//!
//! # Modules
//!
//! - `urn`: CTS and CITE2 URN validation and decomposition
//! - `passage`: Ordered passage store with insert, delete and sort
//! - `extract`: URN-driven text extraction over a passage store
//! - `config`: Environment configuration for the `cite` binary

pub mod config;
pub mod error;
pub mod extract;
pub mod passage;
pub mod urn;

pub use error::{CiteError, Result};
pub use extract::{extract_text, Selector, TextAndId};
pub use passage::{Canonical, EncText, PassLoc, Passage, Textgroup, Work};
pub use urn::{Cite2Urn, CtsUrn, WorkDepth};
