//! ElementTemplate: immutable tag metadata.

use std::fmt;

use super::element::{AttrValue, ClassList, Element, ElementBuilder, ElementError};
use super::node::Node;

/// An unconfigured, reusable tag prototype.
///
/// Templates are `Copy` and carry no per-use state: every configuration call
/// starts a fresh [`ElementBuilder`]. A template placed directly in a tree is
/// never finalized and renders as `<Uninitialized {tag} Element>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementTemplate {
    tag: &'static str,
    self_closing: bool,
}

impl ElementTemplate {
    /// Describe a tag. The catalogue in [`tags`](super::tags) covers the
    /// standard set; this is for custom elements.
    pub const fn new(tag: &'static str, self_closing: bool) -> Self {
        Self { tag, self_closing }
    }

    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Whether the tag is rendered without a closing tag.
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Whether text children are emitted verbatim (`script`, `style`).
    pub fn is_raw_text(&self) -> bool {
        matches!(self.tag, "script" | "style")
    }

    /// Start configuring an instance.
    pub fn builder(self) -> ElementBuilder {
        ElementBuilder::new(self)
    }

    /// Finalize an instance with `children` and no other configuration.
    pub fn call<I>(self, children: I) -> Element
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.builder().call(children)
    }

    /// Finalize an empty instance.
    pub fn build(self) -> Element {
        self.builder().build()
    }

    /// Append a chained class name. See [`ElementBuilder::class`].
    pub fn class(self, name: impl Into<String>) -> Result<ElementBuilder, ElementError> {
        self.builder().class(name)
    }

    /// Set classes from a single name or a list. See [`ElementBuilder::classes`].
    pub fn classes(self, classes: impl Into<ClassList>) -> ElementBuilder {
        self.builder().classes(classes)
    }

    /// Set the identifier.
    pub fn id(self, id: impl Into<String>) -> ElementBuilder {
        self.builder().id(id)
    }

    /// Set an attribute.
    pub fn attr(self, name: impl Into<String>, value: impl Into<AttrValue>) -> ElementBuilder {
        self.builder().attr(name, value)
    }

    /// The markup an unconfigured template renders to.
    pub fn placeholder(&self) -> String {
        format!("<Uninitialized {} Element>", self.tag)
    }
}

impl fmt::Display for ElementTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Uninitialized {} Element>", self.tag)
    }
}
