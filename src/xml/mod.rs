//! Configuration Document Parser
//!
//! Turns XML text into a small owned element tree.
//! Focused solely on structure; rules live in the validation module.

pub mod reader;
pub mod tree;

pub use reader::{XmlError, read_document};
pub use tree::Element;

/// Parse a configuration document into its root element
///
/// This is the main entry point for parsing. Comments, declarations and
/// whitespace-only text are dropped.
pub fn parse_document(xml: &str) -> Result<Element, XmlError> {
    reader::read_document(xml)
}
