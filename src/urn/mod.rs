//! URN module for CTS and CITE2 citations
//!
//! This module provides validation and decomposition of citation URNs.
//!
//! # Overview
//!
//! A CTS URN addresses a passage of running text inside a work hierarchy.
//! A CITE2 URN addresses an object inside a collection. Both share the
//! same five-field, colon-delimited shape.
//!
//! # Example URN
//!
//! ```text
//! urn:cts:greekLit:tlg0012.tlg001.msA:1.1@μῆνιν[1]-1.7
//!  │   │     │               │        │   │     │  └── range end
//!  │   │     │               │        │   │     └───── occurrence selector
//!  │   │     │               │        │   └─────────── substring pattern
//!  │   │     │               │        └─────────────── passage reference
//!  │   │     │               └──────────────────────── textgroup.work.version
//!  │   │     └──────────────────────────────────────── namespace
//!  │   └────────────────────────────────────────────── protocol
//!  └────────────────────────────────────────────────── base
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cite_passages::urn::{split_cts, is_range, find_range_endpoints};
//!
//! let urn = split_cts("urn:cts:collection:workgroup.work:1-27");
//! assert!(urn.valid);
//! assert!(is_range(&urn.id));
//!
//! let (start, end) = find_range_endpoints(&urn.id)?;
//! assert_eq!(start, "urn:cts:collection:workgroup.work:1");
//! ```

mod parser;
mod types;

// Re-export main types
pub use types::{Cite2Urn, CtsUrn, WorkDepth};

// Re-export parser functions
pub use parser::{
    find_range_endpoints, is_cite_urn, is_cts_urn, is_exemplar_id, is_range, is_textgroup_id,
    is_version_id, is_work_id, split_cite, split_cts, wants_substring, work_depth,
};
