//! ElementBuilder and Element: configuration and the finalized instance.
//!
//! A builder accumulates classes, an id, attributes and children. Calling it
//! (`call` / `build`) produces an [`Element`], which is finalized and owned.
//! Rendering consumes the element, so a configuration is used exactly once.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

use indexmap::IndexMap;

use super::node::Node;
use super::render::{self, RenderOptions};
use super::template::ElementTemplate;

/// Class names starting with this prefix are rejected by chained access.
pub const RESERVED_PREFIX: &str = "_";

/// Errors from element configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error("invalid class name `{name}`: {reason}")]
    InvalidClassName { name: String, reason: &'static str },
}

// ---------------------------------------------------------------------------
// AttrValue
// ---------------------------------------------------------------------------

/// Value of a keyword attribute: one string, or a list joined with spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    /// The value as it appears in markup (before escaping).
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::List(items) => Cow::Owned(items.join(" ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.into_iter().map(str::to_owned).collect())
    }
}

// ---------------------------------------------------------------------------
// ClassList
// ---------------------------------------------------------------------------

/// Classes given through [`ElementBuilder::classes`].
///
/// Underscores become hyphens so identifier-safe names can spell hyphenated
/// CSS classes (`nav_item` -> `nav-item`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .map(|name| name.as_ref().replace('_', "-"))
                .collect(),
        )
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ClassList {
    fn from(name: &str) -> Self {
        Self::from_names([name])
    }
}

impl From<String> for ClassList {
    fn from(name: String) -> Self {
        Self::from_names([name])
    }
}

impl From<Vec<String>> for ClassList {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<&str>> for ClassList {
    fn from(names: Vec<&str>) -> Self {
        Self::from_names(names)
    }
}

impl<const N: usize> From<[&str; N]> for ClassList {
    fn from(names: [&str; N]) -> Self {
        Self::from_names(names)
    }
}

// ---------------------------------------------------------------------------
// ElementBuilder
// ---------------------------------------------------------------------------

/// An instance being configured. Not yet finalized: a builder placed in a
/// tree without being called renders as its template's placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBuilder {
    template: ElementTemplate,
    classes: Vec<String>,
    id: Option<String>,
    attributes: IndexMap<String, AttrValue>,
    children: Vec<Node>,
}

impl ElementBuilder {
    pub fn new(template: ElementTemplate) -> Self {
        Self {
            template,
            classes: Vec::new(),
            id: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn template(&self) -> ElementTemplate {
        self.template
    }

    /// Append a class by name, in access order.
    ///
    /// The name is kept verbatim. Names beginning with [`RESERVED_PREFIX`]
    /// and empty names are rejected.
    pub fn class(mut self, name: impl Into<String>) -> Result<Self, ElementError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ElementError::InvalidClassName {
                name,
                reason: "class names cannot be empty",
            });
        }
        if name.starts_with(RESERVED_PREFIX) {
            return Err(ElementError::InvalidClassName {
                name,
                reason: "class names cannot begin with an underscore",
            });
        }
        self.classes.push(name);
        Ok(self)
    }

    /// Replace the class list.
    pub fn classes(mut self, classes: impl Into<ClassList>) -> Self {
        self.classes = classes.into().into_vec();
        self
    }

    /// Set the identifier. An empty identifier is not rendered.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute. A repeated name keeps its first position.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append one child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append `children` and finalize.
    pub fn call<I>(self, children: I) -> Element
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children(children).build()
    }

    /// Finalize with the configuration gathered so far.
    pub fn build(self) -> Element {
        Element {
            template: self.template,
            classes: self.classes,
            id: self.id,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

impl From<ElementTemplate> for ElementBuilder {
    fn from(template: ElementTemplate) -> Self {
        Self::new(template)
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A finalized tree node, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    template: ElementTemplate,
    classes: Vec<String>,
    id: Option<String>,
    attributes: IndexMap<String, AttrValue>,
    children: Vec<Node>,
}

impl Element {
    pub fn template(&self) -> ElementTemplate {
        self.template
    }

    pub fn tag(&self) -> &'static str {
        self.template.tag()
    }

    pub fn is_self_closing(&self) -> bool {
        self.template.is_self_closing()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Render with default options, consuming the element.
    pub fn render(self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Render with `options`, consuming the element.
    pub fn render_with(self, options: &RenderOptions) -> String {
        let mut out = String::new();
        render::render_element(self, options, &mut out);
        out
    }

    /// Render cooperatively, yielding to the runtime between children.
    pub fn render_async(
        self,
        options: RenderOptions,
    ) -> Pin<Box<dyn Future<Output = String> + Send>> {
        render::render_element_async(self, options)
    }

    /// Debug rendering without children: `<div class="x">...</div>`.
    ///
    /// Does not consume the element.
    pub fn preview(&self) -> String {
        let mut out = String::new();
        render::open_tag(self, &mut out);
        out.push_str("...");
        if !self.is_self_closing() {
            render::close_tag(self.tag(), &mut out);
        }
        out
    }

    /// Drop the configuration, keeping only the template.
    pub fn into_template(self) -> ElementTemplate {
        self.template
    }

    pub(crate) fn into_parts(self) -> (ElementTemplate, Vec<Node>) {
        (self.template, self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::tags::{A, BR, DIV, IMG, P, SPAN};
    use pretty_assertions::assert_eq;

    #[test]
    fn call_with_text() {
        assert_eq!(DIV.call(["x"]).render(), "<div>x</div>");
    }

    #[test]
    fn chained_class() {
        assert_eq!(DIV.class("foo").unwrap().build().render(), r#"<div class="foo"></div>"#);
    }

    #[test]
    fn chained_classes_keep_access_order() {
        let el = DIV.class("foo").and_then(|b| b.class("bar")).unwrap().build();
        assert_eq!(el.classes(), ["foo", "bar"]);
        assert_eq!(el.render(), r#"<div class="foo bar"></div>"#);
    }

    #[test]
    fn chained_class_keeps_underscores() {
        let el = DIV.class("snake_case").unwrap().build();
        assert_eq!(el.classes(), ["snake_case"]);
    }

    #[test]
    fn reserved_prefix_rejected() {
        let err = DIV.class("_private").unwrap_err();
        assert_eq!(
            err,
            ElementError::InvalidClassName {
                name: "_private".into(),
                reason: "class names cannot begin with an underscore",
            }
        );
        assert!(err.to_string().starts_with("invalid class name `_private`"));
    }

    #[test]
    fn empty_class_rejected() {
        assert!(DIV.class("").is_err());
    }

    #[test]
    fn id_access() {
        assert_eq!(DIV.id("baz").build().render(), r#"<div id="baz"></div>"#);
    }

    #[test]
    fn classes_map_underscores() {
        let el = DIV.classes(["nav_item", "is_active"]).build();
        assert_eq!(el.classes(), ["nav-item", "is-active"]);
        let single = SPAN.classes("text_muted").build();
        assert_eq!(single.classes(), ["text-muted"]);
    }

    #[test]
    fn classes_replace_chained() {
        let el = DIV.class("a").unwrap().classes("b").build();
        assert_eq!(el.classes(), ["b"]);
    }

    #[test]
    fn class_then_id_then_attrs_order() {
        let el = A
            .attr("href", "/home")
            .classes("link")
            .id("home")
            .attr("rel", ["noopener", "external"])
            .call(["Home"]);
        assert_eq!(
            el.render(),
            r#"<a class="link" id="home" href="/home" rel="noopener external">Home</a>"#
        );
    }

    #[test]
    fn attributes_keep_insertion_order() {
        let el = DIV.attr("z", "1").attr("a", "2").attr("m", "3").build();
        let names: Vec<&str> = el.attributes().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn reset_attribute_keeps_position() {
        let el = DIV.attr("a", "1").attr("b", "2").attr("a", "3").build();
        assert_eq!(el.render(), r#"<div a="3" b="2"></div>"#);
    }

    #[test]
    fn list_attribute_joined() {
        assert_eq!(AttrValue::from(vec!["a", "b"]).joined(), "a b");
        assert_eq!(AttrValue::from("x").joined(), "x");
    }

    #[test]
    fn self_closing_renders_no_closing_tag() {
        assert_eq!(BR.build().render(), "<br>");
        assert_eq!(IMG.attr("src", "a.png").build().render(), r#"<img src="a.png">"#);
    }

    #[test]
    fn nested_elements() {
        assert_eq!(DIV.call([DIV.build()]).render(), "<div><div></div></div>");
    }

    #[test]
    fn mixed_children_in_order() {
        let el = P.call::<[Node; 3]>([
            "Hello, ".into(),
            SPAN.classes("name").call(["John"]).into(),
            "!".into(),
        ]);
        assert_eq!(el.render(), r#"<p>Hello, <span class="name">John</span>!</p>"#);
    }

    #[test]
    fn child_and_call_append() {
        let el = DIV.builder().child("a").call(["b"]);
        assert_eq!(el.children().len(), 2);
        assert_eq!(el.render(), "<div>ab</div>");
    }

    #[test]
    fn preview_does_not_consume() {
        let el = DIV.classes("card").call(["body"]);
        assert_eq!(el.preview(), r#"<div class="card">...</div>"#);
        assert_eq!(el.preview(), r#"<div class="card">...</div>"#);
        assert_eq!(el.render(), r#"<div class="card">body</div>"#);
    }

    #[test]
    fn preview_of_void_element() {
        assert_eq!(BR.build().preview(), "<br>...");
    }

    #[test]
    fn into_template_drops_configuration() {
        let el = DIV.classes("x").build();
        assert_eq!(el.into_template(), DIV);
    }
}
