// Markup and literal grammars
pub mod literals;
pub mod xml;

pub use literals::{LiteralError, format_guid, format_id, parse_guid, parse_id};
pub use xml::{Document, Element, Node, XmlError};
