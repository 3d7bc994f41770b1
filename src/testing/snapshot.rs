//! Snapshot rendering helpers.
//!
//! Functions for turning element trees into strings suitable for snapshot
//! testing and assertions.

use crate::component::Component;
use crate::html::{tags, Node, RenderOptions};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render anything node-like with default options.
///
/// # Examples
///
/// ```
/// use netic::html::tags::P;
/// use netic::testing::render_to_string;
///
/// assert_eq!(render_to_string(P.call(["Hello"])), "<p>Hello</p>");
/// ```
pub fn render_to_string(node: impl Into<Node>) -> String {
    node.into().render_with(&RenderOptions::default())
}

/// Render a component's slots once with default options.
pub fn render_component(component: &mut Component) -> String {
    component.render_with(&RenderOptions::default())
}

/// Break flat markup into one tag or text run per line, indented two spaces
/// per nesting level.
///
/// Void tags, placeholders and `<!...>` declarations do not open a level.
/// Whitespace-only text between tags is dropped.
pub fn pretty_markup(markup: &str) -> String {
    let mut lines = Vec::new();
    let mut depth = 0usize;
    let mut rest = markup;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let token = &rest[..end];
            rest = &rest[end..];

            if token.starts_with("</") {
                depth = depth.saturating_sub(1);
                lines.push(indent(depth, token));
            } else {
                lines.push(indent(depth, token));
                if opens_level(token) {
                    depth += 1;
                }
            }
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = rest[..end].trim();
            if !text.is_empty() {
                lines.push(indent(depth, text));
            }
            rest = &rest[end..];
        }
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn indent(depth: usize, token: &str) -> String {
    format!("{}{token}", "  ".repeat(depth))
}

fn opens_level(token: &str) -> bool {
    if token.starts_with("<!") || token.starts_with("<Uninitialized ") || token.ends_with("/>") {
        return false;
    }
    let name = token[1..]
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default();
    !tags::lookup(name).is_some_and(|template| template.is_self_closing())
}
