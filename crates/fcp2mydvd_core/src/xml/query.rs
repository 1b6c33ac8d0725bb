//! Tree navigation helpers.
//!
//! All lookups consider element children only; text and comment nodes are
//! skipped.

use super::dom::{Element, XmlNode};
use crate::error::{ConvertError, ConvertResult};

/// Attribute value, or `default` when the attribute is absent or empty.
pub fn get_attribute<'a>(elem: &'a Element, name: &str, default: &'a str) -> &'a str {
    match elem.attr(name) {
        Some(value) if !value.is_empty() => value,
        _ => default,
    }
}

/// First child element with the given tag.
pub fn find_child<'a>(elem: &'a Element, tag: &str) -> Option<&'a Element> {
    elem.elements().find(|e| e.name == tag)
}

/// First child element with the given tag, or `MissingElement(tag)`.
pub fn require_child<'a>(elem: &'a Element, tag: &str) -> ConvertResult<&'a Element> {
    find_child(elem, tag).ok_or_else(|| ConvertError::missing(tag))
}

/// Mutable variant of [`require_child`].
pub fn require_child_mut<'a>(elem: &'a mut Element, tag: &str) -> ConvertResult<&'a mut Element> {
    elem.elements_mut()
        .find(|e| e.name == tag)
        .ok_or_else(|| ConvertError::missing(tag))
}

/// First child with tag `tag` whose `attr` attribute equals `value`.
pub fn find_child_by_attribute<'a>(
    elem: &'a Element,
    tag: &str,
    attr: &str,
    value: &str,
) -> Option<&'a Element> {
    elem.elements()
        .filter(|e| e.name == tag)
        .find(|e| e.attr(attr).is_some_and(|v| !v.is_empty() && v == value))
}

/// All child elements whose tag is one of `tags`, in document order.
pub fn children_with_tags<'a>(elem: &'a Element, tags: &[&str]) -> Vec<&'a Element> {
    elem.elements()
        .filter(|e| tags.contains(&e.name.as_str()))
        .collect()
}

/// Content of the first text child, or an empty string.
pub fn get_text(elem: &Element) -> &str {
    elem.children
        .iter()
        .find_map(|n| match n {
            XmlNode::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .unwrap_or("")
}

/// Remove every child node and return what was removed.
///
/// The whole child list is detached in one step, so nothing iterates the
/// list while it shrinks.
pub fn clear_children(elem: &mut Element) -> Vec<XmlNode> {
    std::mem::take(&mut elem.children)
}
