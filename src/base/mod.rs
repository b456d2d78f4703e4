//! Foundation types for the generator.
//!
//! - [`LineCol`], [`LineIndex`], [`Location`] - Source positions
//! - [`sanitize_identifier`], [`sanitize_artifact_name`] - Name sanitization
//!
//! This module has NO dependencies on other crate modules.

mod names;
mod span;

pub use names::{
    escape_string_literal, escape_xml_doc, is_artifact_name_char, is_identifier_part,
    is_identifier_start, sanitize_artifact_name, sanitize_identifier, strip_guid_prefix,
};
pub use span::{LineCol, LineIndex, Location, TextSize};

// Re-export text-size types for convenience
pub use text_size;
