//! # netic
//!
//! Declarative HTML element building with one-shot rendering, plus a
//! registry of named reactive references.
//!
//! Elements are described by composing `Copy` tag templates into owned
//! element trees; rendering consumes the tree and produces markup. Reactive
//! state lives in a session-scoped registry under globally unique names, and
//! every read is attributed to an explicit computation.
//!
//! ## Core Systems
//!
//! - **[`html`]**: Tag catalogue, element builder, nodes, sync and async renderer
//! - **[`reactive`]**: References, scopes, the name registry and compact aliases
//! - **[`component`]**: Named node bundles and full-document pages
//! - **[`route`]**: Route modules and component discovery
//! - **[`app`]**: Application struct tying routes, references and builds together
//! - **[`testing`]**: Render-to-string and markup pretty-printing helpers

// Markup
pub mod component;
pub mod html;

// State
pub mod reactive;

// Application
pub mod app;
pub mod route;

pub mod testing;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use netic_macros::view;
