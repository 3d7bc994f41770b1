//! Node: one child slot of an element tree.

use super::element::{Element, ElementBuilder};
use super::render::{self, RenderOptions};
use super::template::ElementTemplate;

/// A child of an element or component.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text content, escaped on render unless escaping is disabled.
    Text(String),
    /// Markup inserted verbatim.
    Raw(String),
    /// A template that was never configured. Renders as the placeholder.
    Template(ElementTemplate),
    /// A finalized element.
    Element(Element),
    /// Several nodes rendered in sequence with no wrapper.
    Fragment(Vec<Node>),
}

impl Node {
    /// Take the configuration out of this slot, leaving only what survives a
    /// render: text stays, an element is replaced by its template.
    pub fn take(&mut self) -> Node {
        match self {
            Node::Element(element) => {
                let template = element.template();
                std::mem::replace(self, Node::Template(template))
            }
            Node::Fragment(nodes) => Node::Fragment(nodes.iter_mut().map(Node::take).collect()),
            other => other.clone(),
        }
    }

    /// Render this slot once.
    ///
    /// The configuration is consumed: rendering the same slot again without
    /// putting a new element in it yields the uninitialized placeholder.
    pub fn render_once(&mut self, options: &RenderOptions) -> String {
        let mut out = String::new();
        render::render_node(self.take(), options, &mut out);
        out
    }

    /// Render an owned node.
    pub fn render_with(self, options: &RenderOptions) -> String {
        let mut out = String::new();
        render::render_node(self, options, &mut out);
        out
    }

    /// Whether this slot holds a finalized element.
    pub fn is_finalized(&self) -> bool {
        matches!(self, Node::Element(_))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&String> for Node {
    fn from(text: &String) -> Self {
        Node::Text(text.clone())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<ElementTemplate> for Node {
    fn from(template: ElementTemplate) -> Self {
        Node::Template(template)
    }
}

/// A builder that was never called is not finalized.
impl From<ElementBuilder> for Node {
    fn from(builder: ElementBuilder) -> Self {
        Node::Template(builder.template())
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

/// Text child.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

/// Verbatim markup child, exempt from escaping.
///
/// Text inside `script` and `style` is already emitted verbatim and does not
/// need this.
pub fn raw(markup: impl Into<String>) -> Node {
    Node::Raw(markup.into())
}

/// Group nodes without a wrapping element.
pub fn fragment<I>(nodes: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::Fragment(nodes.into_iter().map(Into::into).collect())
}

/// Map every item passing `filter` to a node, as one fragment.
///
/// ```ignore
/// let colors = ["red", "green", "blue"];
/// SELECT.call([for_each(colors, |c| *c != "green", |c| OPTION.attr("value", c).call([c]))]);
/// ```
pub fn for_each<I, F, M, N>(items: I, mut filter: F, mut map: M) -> Node
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> bool,
    M: FnMut(I::Item) -> N,
    N: Into<Node>,
{
    Node::Fragment(
        items
            .into_iter()
            .filter(|item| filter(item))
            .map(|item| map(item).into())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::tags::{DIV, LI, OPTION, SELECT, SPAN, UL};
    use pretty_assertions::assert_eq;

    fn defaults() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn template_slot_renders_placeholder() {
        let mut node = Node::from(DIV);
        assert_eq!(node.render_once(&defaults()), "<Uninitialized div Element>");
        assert!(!node.is_finalized());
    }

    #[test]
    fn uncalled_builder_renders_placeholder() {
        let node = Node::from(DIV.class("foo").unwrap());
        assert_eq!(node.render_with(&defaults()), "<Uninitialized div Element>");
    }

    #[test]
    fn second_render_of_a_slot_is_placeholder() {
        let mut node = Node::from(DIV.classes("card").call(["hi"]));
        assert!(node.is_finalized());
        assert_eq!(node.render_once(&defaults()), r#"<div class="card">hi</div>"#);
        assert_eq!(node.render_once(&defaults()), "<Uninitialized div Element>");
    }

    #[test]
    fn text_survives_render() {
        let mut node = text("plain");
        assert_eq!(node.render_once(&defaults()), "plain");
        assert_eq!(node.render_once(&defaults()), "plain");
    }

    #[test]
    fn fragment_take_resets_each_element() {
        let mut node = fragment::<[Node; 2]>([SPAN.call(["a"]).into(), "b".into()]);
        assert_eq!(node.render_once(&defaults()), "<span>a</span>b");
        assert_eq!(node.render_once(&defaults()), "<Uninitialized span Element>b");
    }

    #[test]
    fn for_each_filters_and_maps() {
        let colors = ["red", "green", "blue"];
        let options = for_each(colors, |c| *c != "green", |c| {
            OPTION.attr("value", c).call([c])
        });
        let select = SELECT.call([options]);
        assert_eq!(
            select.render(),
            r#"<select><option value="red">red</option><option value="blue">blue</option></select>"#
        );
    }

    #[test]
    fn for_each_keeps_everything_with_true_filter() {
        let list = UL.call([for_each(1..=3, |_| true, |n| LI.call([n.to_string()]))]);
        assert_eq!(list.render(), "<ul><li>1</li><li>2</li><li>3</li></ul>");
    }

    #[test]
    fn raw_is_not_escaped() {
        let el = DIV.call([raw("<b>bold</b>")]);
        assert_eq!(el.render(), "<div><b>bold</b></div>");
    }
}
