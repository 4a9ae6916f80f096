//! Parsers for the three payload shapes a test case can point at.
//!
//! - `inline` reads a record-set table stored directly on the test case.
//! - `reference` reads the JSON pointer to a shared parameter work item.
//! - `dataset` reads the shared parameter work item's own XML table.

pub mod dataset;
pub mod inline;
pub mod reference;

use quick_xml::events::BytesStart;

/// Local (prefix-free) element name.
pub(crate) fn local_name(e: &BytesStart<'_>) -> Result<String, std::str::Utf8Error> {
    std::str::from_utf8(e.local_name().as_ref()).map(str::to_owned)
}
