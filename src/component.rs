//! Component and Page: the discoverable units of a route.
//!
//! A [`Component`] is a named, ordered group of nodes. Rendering it renders
//! every slot once, consuming each element's configuration. A [`Page`] wraps a
//! component in a full document shell.

use crate::html::render::{self, RenderOptions};
use crate::html::tags::{BODY, HEAD, HTML, META, TITLE};
use crate::html::{raw, Node};

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A named bundle of nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    name: String,
    elements: Vec<Node>,
}

impl Component {
    /// Create an empty component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Append a node (builder).
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.elements.push(node.into());
        self
    }

    /// Append a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.elements.push(node.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render every slot with default options.
    pub fn render(&mut self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Render every slot once, in order.
    pub fn render_with(&mut self, options: &RenderOptions) -> String {
        tracing::trace!(component = %self.name, nodes = self.elements.len(), "render component");
        self.elements
            .iter_mut()
            .map(|node| node.render_once(options))
            .collect()
    }

    /// Cooperative form of [`render_with`](Self::render_with).
    pub async fn render_async(&mut self, options: RenderOptions) -> String {
        let mut out = String::new();
        for node in &mut self.elements {
            let taken = node.take();
            out.push_str(&render::render_node_async(taken, options).await);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A component inside a complete HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    title: String,
    lang: Option<String>,
    body: Component,
}

impl Page {
    pub fn new(title: impl Into<String>, body: Component) -> Self {
        Self {
            title: title.into(),
            lang: None,
            body,
        }
    }

    /// Set the document language (builder).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn body(&self) -> &Component {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Component {
        &mut self.body
    }

    /// Render the full document. The body component is rendered once.
    pub fn render(&mut self, options: &RenderOptions) -> String {
        let body = self.body.render_with(options);

        let mut html = HTML.builder();
        if let Some(lang) = &self.lang {
            html = html.attr("lang", lang.as_str());
        }
        let document = html.call::<[Node; 2]>([
            HEAD.call::<[Node; 2]>([
                META.attr("charset", "utf-8").build().into(),
                TITLE.call([self.title.as_str()]).into(),
            ])
            .into(),
            BODY.call([raw(body)]).into(),
        ]);

        let mut out = String::new();
        if options.doctype {
            out.push_str("<!DOCTYPE html>");
        }
        out.push_str(&document.render_with(options));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::tags::{DIV, H1, P, STRONG};
    use pretty_assertions::assert_eq;

    fn blue_thing() -> Component {
        Component::new("BlueThing").with(DIV.call([STRONG.classes("blue").call(["Blue thing"])]))
    }

    #[test]
    fn component_renders_nodes_in_order() {
        let mut c = Component::new("Intro")
            .with(H1.call(["Title"]))
            .with(P.call(["Body"]));
        assert_eq!(c.len(), 2);
        assert_eq!(c.render(), "<h1>Title</h1><p>Body</p>");
    }

    #[test]
    fn component_render_is_one_shot() {
        let mut c = blue_thing();
        assert_eq!(
            c.render(),
            r#"<div><strong class="blue">Blue thing</strong></div>"#
        );
        assert_eq!(c.render(), "<Uninitialized div Element>");
    }

    #[test]
    fn push_appends() {
        let mut c = Component::new("List");
        assert!(c.is_empty());
        c.push("text");
        c.push(P.build());
        assert_eq!(c.render(), "text<p></p>");
    }

    #[tokio::test]
    async fn component_async_render() {
        let mut c = blue_thing();
        let out = c.render_async(RenderOptions::default()).await;
        assert_eq!(out, r#"<div><strong class="blue">Blue thing</strong></div>"#);
        assert_eq!(
            c.render_async(RenderOptions::default()).await,
            "<Uninitialized div Element>"
        );
    }

    #[test]
    fn page_wraps_body() {
        let mut page = Page::new("My Title", blue_thing()).with_lang("en");
        insta::assert_snapshot!(
            page.render(&RenderOptions::default()),
            @r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>My Title</title></head><body><div><strong class="blue">Blue thing</strong></div></body></html>"#
        );
    }

    #[test]
    fn page_without_doctype() {
        let mut page = Page::new("T", Component::new("Empty"));
        let options = RenderOptions::new().with_doctype(false);
        assert_eq!(
            page.render(&options),
            r#"<html><head><meta charset="utf-8"><title>T</title></head><body></body></html>"#
        );
    }

    #[test]
    fn page_title_is_escaped() {
        let mut page = Page::new("Tom & Jerry", Component::new("Empty"));
        let out = page.render(&RenderOptions::default());
        assert!(out.contains("<title>Tom &amp; Jerry</title>"));
    }
}
