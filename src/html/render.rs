//! Recursive markup serialization.
//!
//! Depth-first, pre-order: an element's opening tag, then each child in
//! declaration order, then the closing tag unless the element is void. The
//! async entry point yields to the runtime at every child boundary but keeps
//! the same output order.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;

use super::element::Element;
use super::node::Node;
use super::template::ElementTemplate;

// ---------------------------------------------------------------------------
// RenderOptions
// ---------------------------------------------------------------------------

/// Knobs for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape `& < >` in text children. Raw nodes and the text of raw-text
    /// elements (`script`, `style`) are never escaped.
    pub escape_text: bool,
    /// Prefix full pages with `<!DOCTYPE html>`.
    pub doctype: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_text: true,
            doctype: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text escaping (builder).
    pub fn with_escape_text(mut self, escape_text: bool) -> Self {
        self.escape_text = escape_text;
        self
    }

    /// Set the doctype prefix (builder).
    pub fn with_doctype(mut self, doctype: bool) -> Self {
        self.doctype = doctype;
        self
    }
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escape a text child. Borrows when nothing changes.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    html_escape::encode_text(input)
}

/// Escape a value placed inside `"..."`. Borrows when nothing changes.
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(input)
}

// ---------------------------------------------------------------------------
// Synchronous walk
// ---------------------------------------------------------------------------

/// `<tag class=".." id=".." attr="..">`
pub(crate) fn open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag());
    if !element.classes().is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_attribute(&element.classes().join(" ")));
        out.push('"');
    }
    if let Some(id) = element.id().filter(|id| !id.is_empty()) {
        out.push_str(" id=\"");
        out.push_str(&escape_attribute(id));
        out.push('"');
    }
    for (name, value) in element.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&value.joined()));
        out.push('"');
    }
    out.push('>');
}

pub(crate) fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

pub(crate) fn render_element(element: Element, options: &RenderOptions, out: &mut String) {
    tracing::trace!(tag = element.tag(), "render element");
    open_tag(&element, out);
    let (template, children) = element.into_parts();
    if template.is_self_closing() {
        warn_dropped_children(template.tag(), children.len());
        return;
    }
    let options = child_options(template, options);
    for child in children {
        render_node(child, &options, out);
    }
    close_tag(template.tag(), out);
}

pub(crate) fn render_node(node: Node, options: &RenderOptions, out: &mut String) {
    match node {
        Node::Text(text) if options.escape_text => out.push_str(&escape_text(&text)),
        Node::Text(text) | Node::Raw(text) => out.push_str(&text),
        Node::Template(template) => out.push_str(&template.placeholder()),
        Node::Element(element) => render_element(element, options, out),
        Node::Fragment(nodes) => {
            for node in nodes {
                render_node(node, options, out);
            }
        }
    }
}

/// Text inside `script`/`style` is not markup and must stay verbatim.
fn child_options(template: ElementTemplate, options: &RenderOptions) -> RenderOptions {
    if template.is_raw_text() {
        options.with_escape_text(false)
    } else {
        *options
    }
}

fn warn_dropped_children(tag: &str, count: usize) {
    if count > 0 {
        tracing::warn!(tag, dropped = count, "void element cannot hold children; dropped");
    }
}

// ---------------------------------------------------------------------------
// Cooperative walk
// ---------------------------------------------------------------------------

type RenderFuture = Pin<Box<dyn Future<Output = String> + Send>>;

pub(crate) fn render_element_async(element: Element, options: RenderOptions) -> RenderFuture {
    Box::pin(async move {
        let mut out = String::new();
        open_tag(&element, &mut out);
        let (template, children) = element.into_parts();
        if template.is_self_closing() {
            warn_dropped_children(template.tag(), children.len());
            return out;
        }
        let options = child_options(template, &options);
        for child in children {
            tokio::task::yield_now().await;
            out.push_str(&render_node_async(child, options).await);
        }
        close_tag(template.tag(), &mut out);
        out
    })
}

pub(crate) fn render_node_async(node: Node, options: RenderOptions) -> RenderFuture {
    Box::pin(async move {
        match node {
            Node::Element(element) => render_element_async(element, options).await,
            Node::Fragment(nodes) => {
                let mut out = String::new();
                for node in nodes {
                    out.push_str(&render_node_async(node, options).await);
                }
                out
            }
            leaf => {
                let mut out = String::new();
                render_node(leaf, &options, &mut out);
                out
            }
        }
    })
}
