//! XML Reader
//!
//! Builds an [`Element`] tree from the quick-xml event stream.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use super::tree::Element;

/// Errors raised while turning XML text into a tree
#[derive(Debug, Error, Clone, PartialEq)]
pub enum XmlError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("unexpected content after the root element at byte {0}")]
    TrailingContent(u64),

    #[error("unclosed element <{0}> at end of document")]
    Unclosed(String),
}

impl XmlError {
    fn syntax(position: u64, err: impl std::fmt::Display) -> Self {
        XmlError::Syntax {
            position,
            message: err.to_string(),
        }
    }
}

/// Parse XML text into its root element
pub fn read_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| XmlError::syntax(position, e))?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(XmlError::TrailingContent(position));
                }
                stack.push(start_element(&start, position)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(XmlError::TrailingContent(position));
                }
                let element = start_element(&start, position)?;
                attach(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags
                if let Some(element) = stack.pop() {
                    attach(element, &mut stack, &mut root);
                }
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| XmlError::syntax(position, e))?;
                push_text(&mut stack, &value, position)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                push_text(&mut stack, &value, position)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::NoRoot)
}

fn start_element(start: &BytesStart<'_>, position: u64) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::syntax(position, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::syntax(position, e))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [Element], value: &str, position: u64) -> Result<(), XmlError> {
    let Some(current) = stack.last_mut() else {
        return Err(XmlError::syntax(
            position,
            "character data outside of the root element",
        ));
    };
    match &mut current.text {
        Some(existing) => existing.push_str(value),
        None => current.text = Some(value.to_string()),
    }
    Ok(())
}
