//! Owned, mutable XML tree.
//!
//! Documents are parsed with `roxmltree` (read-only) and copied into
//! [`Element`]/[`XmlNode`] values that the injector can edit. Rendering goes
//! through `quick_xml::Writer`, which writes childless elements in the
//! self-closing `<tag/>` form; see [`super::patch`] for the consumer fixups.

use std::path::Path;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{ConvertError, ConvertResult};

/// A child node of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified tag name (`prefix:local` when the source used a prefix).
    pub name: String,
    /// Attributes in source order, including namespace declarations.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: append a text node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Append a child element.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Iterate over element children, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Mutable iteration over element children.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }
}

/// A parsed document. Only the root element is kept; the XML declaration
/// and any DOCTYPE are regenerated (or dropped) on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

/// Options for [`Document::render`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root.
    pub xml_declaration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
        }
    }
}

impl Document {
    /// Parse XML text.
    pub fn parse(text: &str) -> ConvertResult<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)
            .map_err(|e| ConvertError::parse(format!("XML parse error: {}", e)))?;

        Ok(Self {
            root: copy_element(doc.root_element()),
        })
    }

    /// Read and parse an XML file.
    pub fn open(path: &Path) -> ConvertResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        // Remove BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Self::parse(content).map_err(|e| match e {
            ConvertError::Parse(msg) => {
                ConvertError::parse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Serialize the document to text, ending with a newline.
    pub fn render(&self, options: &RenderOptions) -> ConvertResult<String> {
        let mut writer = Writer::new(Vec::new());

        if options.xml_declaration {
            write(
                &mut writer,
                Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
            )?;
            write(&mut writer, Event::Text(BytesText::new("\n")))?;
        }
        write_element(&mut writer, &self.root)?;
        write(&mut writer, Event::Text(BytesText::new("\n")))?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| ConvertError::Render(format!("output is not UTF-8: {}", e)))
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> ConvertResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ConvertError::Render(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> ConvertResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            // Only `&`, `<` and `>` are escaped in text; quotes stay as written
            XmlNode::Text(t) => {
                write(writer, Event::Text(BytesText::from_escaped(partial_escape(t))))?
            }
            XmlNode::Comment(c) => write(writer, Event::Comment(BytesText::from_escaped(c.as_str())))?,
        }
    }
    write(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

/// Qualified name for a namespaced item, using the prefix in scope at `node`.
fn qualified(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

fn copy_element(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualified(node, tag.namespace(), tag.name()));

    // Namespace declarations introduced on this element
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        element.attributes.push((key, ns.uri().to_string()));
    }

    for attr in node.attributes() {
        element.attributes.push((
            qualified(node, attr.namespace(), attr.name()),
            attr.value().to_string(),
        ));
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(XmlNode::Element(copy_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(XmlNode::Text(text.to_string()));
            }
        } else if child.is_comment() {
            if let Some(text) = child.text() {
                element.children.push(XmlNode::Comment(text.to_string()));
            }
        }
    }

    element
}
