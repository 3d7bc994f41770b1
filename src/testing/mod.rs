//! Test helpers: render nodes and components to strings, and pretty-print
//! markup for snapshot assertions.

pub mod snapshot;

pub use snapshot::{pretty_markup, render_component, render_to_string};
