//! Passage store
//!
//! An ordered collection of passages linked into a doubly-linked chain
//! over an index-addressed arena.
//!
//! # Architecture
//!
//! ```text
//!   Work.passages (arena, slice order)
//!   ┌──────────┬──────────┬──────────┬──────────┐
//!   │ 3        │ 1        │ (tomb)   │ 2        │
//!   │ prev: 2  │ prev: -  │          │ prev: 1  │
//!   │ next: -  │ next: 2  │          │ next: 3  │
//!   └──────────┴──────────┴──────────┴──────────┘
//!        ▲          ▲
//!    Work.last  Work.first
//!
//!   sort_passages() walks first -> last and rebuilds
//!   ┌──────────┬──────────┬──────────┐
//!   │ 1 idx 0  │ 2 idx 1  │ 3 idx 2  │   ordered = true
//!   └──────────┴──────────┴──────────┘
//! ```
//!
//! Insert and delete return a new work and clear `ordered`; positional
//! queries go through [`Work::canonical`], which is only available on an
//! ordered work.

mod canonical;
mod edit;
mod sort;
mod store;
mod types;

pub use canonical::Canonical;
pub use store::Direction;
pub use types::{CiteVerb, EncText, PassLoc, Passage, Textgroup, Triple, Work};
