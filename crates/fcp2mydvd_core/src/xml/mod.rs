//! XML document model, query helpers and serialization fixups.

pub mod dom;
pub mod patch;
pub mod query;

pub use dom::{Document, Element, RenderOptions, XmlNode};
pub use patch::patch_serialized;
