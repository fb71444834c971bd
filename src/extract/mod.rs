//! Text extraction by URN
//!
//! Turns a CTS URN into the text it addresses within a [`Work`].
//!
//! # Addressing forms
//!
//! ```text
//! urn:cts:ns:tg.wk:1                 whole passage
//! urn:cts:ns:tg.wk:1@is[2]           pattern check inside passage 1
//! urn:cts:ns:tg.wk:1-3               passages 1 through 3
//! urn:cts:ns:tg.wk:1@is[2]-3@third   same, trimmed at both ends
//! urn:cts:ns:tg.wk:2@is-2@second     sub-span of passage 2
//! ```
//!
//! Ordered works are read by index; unordered works are walked along
//! their next links with cycle detection.
//!
//! [`Work`]: crate::passage::Work

mod extractor;
mod selector;

pub use extractor::{extract_text, TextAndId};
pub use selector::Selector;
