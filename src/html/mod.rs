//! Element builder and markup renderer.
//!
//! - [`tags`]: the table-driven catalogue of [`ElementTemplate`]s.
//! - [`ElementBuilder`] / [`Element`]: configuration and the finalized node.
//! - [`Node`]: text, raw markup, templates, elements, fragments.
//! - [`render`]: depth-first serialization, sync and cooperative.

pub mod element;
pub mod node;
pub mod render;
pub mod tags;
pub mod template;

pub use element::{AttrValue, ClassList, Element, ElementBuilder, ElementError, RESERVED_PREFIX};
pub use node::{for_each, fragment, raw, text, Node};
pub use render::{escape_attribute, escape_text, RenderOptions};
pub use template::ElementTemplate;
