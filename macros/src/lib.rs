//! Proc macros for netic: the `view!` markup macro.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `netic`.

use proc_macro::TokenStream;

mod view_macro;

/// Markup-style element composition macro.
///
/// Transforms tag syntax into netic builder calls.
///
/// # Syntax
///
/// - `<tag />`: element with no children
/// - `<tag attr="val"> ... </tag>`: element with children
/// - children may be elements, string literals, or `{expr}` (anything `Into<Node>`)
///
/// # Attributes
///
/// - `class="a b"` becomes `.classes(["a", "b"])`
/// - `id="value"` becomes `.id("value")`
/// - anything else becomes `.attr("name", value)`; hyphenated names such as
///   `data-role` and keywords such as `type` are accepted
/// - values are string literals or `{expr}`; a bare name renders as `name=""`
///
/// One root yields an `Element`; several roots yield a `Node::Fragment`.
///
/// # Example
///
/// ```ignore
/// let page = view! {
///     <div class="card" id="main">
///         <h1>"Title"</h1>
///         <input type="text" data-role={role} />
///         {body}
///     </div>
/// };
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
