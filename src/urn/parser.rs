//! URN Parser
//!
//! Validates citation strings and splits them into their components.
//!
//! Grammar:
//! ```text
//! cts_urn   = "urn" ":" "cts" ":" namespace ":" workpath ":" passage
//! cite_urn  = "urn" ":" "cite2" ":" namespace ":" collection ":" object
//! workpath  = textgroup ["." work ["." version ["." exemplar]]]
//! passage   = ref | ref "-" ref
//! ref       = id | id "@" pattern ["[" integer "]"]
//! ```

use super::types::{Cite2Urn, CtsUrn, WorkDepth};
use crate::error::{CiteError, Result};

const FIELD_COUNT: usize = 5;

/// Split into exactly five colon-delimited fields with the given protocol
fn fields<'a>(input: &'a str, protocol: &str) -> Option<Vec<&'a str>> {
    let fields: Vec<&str> = input.split(':').collect();
    if fields.len() != FIELD_COUNT || fields[0] != "urn" || fields[1] != protocol {
        return None;
    }
    Some(fields)
}

/// Check whether a string is a valid CTS URN
pub fn is_cts_urn(input: &str) -> bool {
    fields(input, "cts").is_some()
}

/// Check whether a string is a valid CITE2 URN
pub fn is_cite_urn(input: &str) -> bool {
    fields(input, "cite2").is_some()
}

/// Split a CTS URN string into its components
///
/// Never fails: invalid input yields a sentinel with `valid == false`.
pub fn split_cts(input: &str) -> CtsUrn {
    match fields(input, "cts") {
        Some(f) => CtsUrn {
            id: input.to_string(),
            base: f[0].to_string(),
            protocol: f[1].to_string(),
            namespace: f[2].to_string(),
            work: f[3].to_string(),
            passage: f[4].to_string(),
            valid: true,
        },
        None => CtsUrn::invalid(input),
    }
}

/// Split a CITE2 URN string into its components
pub fn split_cite(input: &str) -> Cite2Urn {
    match fields(input, "cite2") {
        Some(f) => Cite2Urn {
            id: input.to_string(),
            base: f[0].to_string(),
            protocol: f[1].to_string(),
            namespace: f[2].to_string(),
            collection: f[3].to_string(),
            object: f[4].to_string(),
            valid: true,
        },
        None => Cite2Urn::invalid(input),
    }
}

/// Check whether the passage field of a URN string is a range
///
/// Only the field count is checked, not the scheme.
pub fn is_range(input: &str) -> bool {
    input
        .split(':')
        .nth(FIELD_COUNT - 1)
        .map(|passage| passage.contains('-'))
        .unwrap_or(false)
}

/// Check whether a URN string carries a substring selector
pub fn wants_substring(input: &str) -> bool {
    input.contains('@')
}

/// Classify the work path of a CTS URN string
pub fn work_depth(input: &str) -> Option<WorkDepth> {
    split_cts(input).depth()
}

/// CTS URN pointing at the textgroup level
pub fn is_textgroup_id(input: &str) -> bool {
    work_depth(input) == Some(WorkDepth::Textgroup)
}

/// CTS URN pointing at the work level
pub fn is_work_id(input: &str) -> bool {
    work_depth(input) == Some(WorkDepth::Work)
}

/// CTS URN pointing at the version level
pub fn is_version_id(input: &str) -> bool {
    work_depth(input) == Some(WorkDepth::Version)
}

/// CTS URN pointing at the exemplar level
pub fn is_exemplar_id(input: &str) -> bool {
    work_depth(input) == Some(WorkDepth::Exemplar)
}

/// Split a range URN into full start and end URNs
///
/// Both sides keep any substring decoration they carry.
pub fn find_range_endpoints(input: &str) -> Result<(String, String)> {
    let urn = split_cts(input);
    if !urn.valid {
        return Err(CiteError::InvalidUrn(input.to_string()));
    }

    let refs: Vec<&str> = urn.passage.split('-').collect();
    if refs.len() != 2 {
        return Err(CiteError::InvalidUrn(input.to_string()));
    }

    Ok((urn.with_passage(refs[0]), urn.with_passage(refs[1])))
}
