//! view! macro: parse tag syntax and generate netic element builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, token, Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// An attribute value: `"literal"` or `{expr}`.
#[derive(Clone)]
pub(crate) enum Value {
    Lit(LitStr),
    Expr(Expr),
    /// Bare attribute with no `=`.
    Empty,
}

/// A parsed attribute: `name="value"`, `name={expr}` or `name`.
#[derive(Clone)]
pub(crate) struct Attribute {
    /// Hyphen-joined name, e.g. `data-role`.
    pub name: String,
    pub span: Span,
    pub value: Value,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            Value::Lit(lit) => lit.value(),
            Value::Expr(_) => "{expr}".to_owned(),
            Value::Empty => String::new(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("value", &value)
            .finish()
    }
}

/// One child of an element.
#[derive(Clone)]
pub(crate) enum Child {
    Element(Element),
    Text(LitStr),
    Expr(Expr),
}

impl std::fmt::Debug for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Child::Element(element) => std::fmt::Debug::fmt(element, f),
            Child::Text(lit) => write!(f, "Text({:?})", lit.value()),
            Child::Expr(_) => f.write_str("Expr"),
        }
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Child>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level view! input: a sequence of root elements.
#[derive(Debug)]
struct ViewInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(ViewInput { elements })
    }
}

/// `data-role`, `aria-label`, `type`, `for`.
fn parse_attr_name(input: ParseStream) -> Result<(String, Span)> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    let mut name = first.to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        let part = Ident::parse_any(input)?;
        name.push('-');
        name.push_str(&part.to_string());
    }
    Ok((name, span))
}

fn parse_braced_expr(input: ParseStream) -> Result<Expr> {
    let content;
    braced!(content in input);
    content.parse()
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag = Ident::parse_any(input)?;

    // Attributes until `/>` or `>`.
    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let (name, span) = parse_attr_name(input)?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            if input.peek(token::Brace) {
                Value::Expr(parse_braced_expr(input)?)
            } else {
                Value::Lit(input.parse()?)
            }
        } else {
            Value::Empty
        };
        attrs.push(Attribute { name, span, value });
    }

    // Children until `</tag>`.
    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag = Ident::parse_any(input)?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag, closing_tag
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(Child::Element(parse_element(input)?));
        } else if input.peek(LitStr) {
            children.push(Child::Text(input.parse()?));
        } else if input.peek(token::Brace) {
            children.push(Child::Expr(parse_braced_expr(input)?));
        } else {
            return Err(input.error(format!(
                "expected a child element, a string literal, `{{expr}}` or `</{}>`",
                tag
            )));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn value_tokens(value: &Value) -> TokenStream {
    match value {
        Value::Lit(lit) => quote! { #lit },
        Value::Expr(expr) => quote! { #expr },
        Value::Empty => quote! { "" },
    }
}

/// Generate the builder chain for a single element.
fn generate_element(elem: &Element) -> TokenStream {
    let constant = Ident::new(&elem.tag.to_string().to_uppercase(), elem.tag.span());
    let mut builder_calls = Vec::new();

    for attr in &elem.attrs {
        match (attr.name.as_str(), &attr.value) {
            ("class", Value::Lit(lit)) => {
                let names = lit
                    .value()
                    .split_whitespace()
                    .map(|name| LitStr::new(name, lit.span()))
                    .collect::<Vec<_>>();
                builder_calls.push(quote! { .classes([#(#names),*]) });
            }
            ("class", value) => {
                let value = value_tokens(value);
                builder_calls.push(quote! { .classes(#value) });
            }
            ("id", value) => {
                let value = value_tokens(value);
                builder_calls.push(quote! { .id(#value) });
            }
            (name, value) => {
                let name = LitStr::new(name, attr.span);
                let value = value_tokens(value);
                builder_calls.push(quote! { .attr(#name, #value) });
            }
        }
    }

    for child in &elem.children {
        let child_code = match child {
            Child::Element(element) => generate_element(element),
            Child::Text(lit) => quote! { #lit },
            Child::Expr(expr) => quote! { #expr },
        };
        builder_calls.push(quote! { .child(#child_code) });
    }

    quote! {
        ::netic::html::tags::#constant.builder() #(#builder_calls)* .build()
    }
}

/// Entry point: generate code for the entire view! macro.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    match parsed.elements.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one element",
        )),
        [single] => Ok(generate_element(single)),
        many => {
            let roots = many.iter().map(generate_element);
            Ok(quote! {
                ::netic::html::Node::Fragment(::std::vec![
                    #(::core::convert::Into::<::netic::html::Node>::into(#roots)),*
                ])
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
