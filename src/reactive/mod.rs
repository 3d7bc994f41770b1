//! Reactive state: named references with explicit read tracking.
//!
//! - [`Registry`]: the session-wide name -> reference table.
//! - [`Scope`]: an ordered block of bindings registered atomically.
//! - [`Reference`]: the cell itself, recording which computations read it.
//! - [`Ref`]: `Copy` typed handle resolved through the registry.

pub mod alias;
pub mod reference;
pub mod registry;

pub use alias::ShortNames;
pub use reference::{ComputationId, Reference};
pub use registry::{
    Ref, ReferenceId, ReferenceSummary, Registry, RegistryError, RegistryId, Scope, ScopeBindings,
};
