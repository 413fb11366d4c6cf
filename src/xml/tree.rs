//! Element Tree
//!
//! Minimal owned representation of a parsed configuration document.
//! No validation logic here - pure data plus the lookups the rules need.

use std::fmt::Write;

use quick_xml::escape::escape;

/// A single XML element with its attributes, text and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name (e.g., "Minion", "Collector")
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated character data directly inside this element
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter, mostly for tests and benches
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by exact name
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first direct child with the given tag.
    ///
    /// Returns `None` when the child is missing or has no text.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        self.find(name)?.text.as_deref()
    }

    /// Every element below this one in document order (self excluded)
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// All descendants with the given tag
    pub fn find_descendants(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// First descendant with the given tag
    pub fn find_descendant(&self, name: &str) -> Option<&Element> {
        self.descendants().into_iter().find(|e| e.name == name)
    }

    /// Serialize back to compact XML text.
    ///
    /// Attribute values and text are escaped; `$(...)` references survive
    /// unchanged since none of their characters need escaping.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_descendants<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in &element.children {
        out.push(child);
        collect_descendants(child, out);
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        // Writing to a String cannot fail
        let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&escape(text.as_str()));
    }
    for child in &element.children {
        write_element(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}
