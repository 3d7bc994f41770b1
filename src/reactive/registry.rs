//! Session-wide reference registry and scoped bindings.
//!
//! The [`Registry`] exclusively owns every [`Reference`]. User code holds
//! [`Ref<T>`] handles, which are `Copy` and store a slot tagged with the
//! owning registry, and goes through the registry for every read and write.
//! Handles and computation tokens from another registry are rejected as
//! stale. New references enter the registry by closing a [`Scope`]: every
//! pending `(name, value)` pair is validated first and then inserted
//! together, so a naming conflict leaves the registry untouched.

use std::any::{type_name, Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};
use slotmap::{new_key_type, SlotMap};

use super::alias::ShortNames;
use super::reference::{ComputationId, ComputationKey, Reference};

new_key_type! {
    /// Slot of a reference inside the [`Registry`].
    pub struct ReferenceId;
}

/// Process-unique identity of one [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId(u64);

impl RegistryId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Errors from reference registration and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a reference named `{name}` is already registered")]
    NameConflict { name: String },
    #[error("no reference named `{name}`")]
    UnknownReference { name: String },
    #[error("reference `{name}` holds {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("reference handle does not belong to this registry")]
    StaleHandle,
}

// ---------------------------------------------------------------------------
// Type-erased storage
// ---------------------------------------------------------------------------

trait AnyReference {
    fn name(&self) -> &str;
    fn value_type(&self) -> TypeId;
    fn value_type_name(&self) -> &'static str;
    fn readers(&self) -> &IndexSet<ComputationId>;
    fn debug_value(&self) -> String;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: fmt::Debug + 'static> AnyReference for Reference<T> {
    fn name(&self) -> &str {
        Reference::name(self)
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn readers(&self) -> &IndexSet<ComputationId> {
        self.reader_set()
    }

    fn debug_value(&self) -> String {
        format!("{:?}", self.peek())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Ref<T>
// ---------------------------------------------------------------------------

/// Typed handle to a registered reference. `Copy`: stores the owning
/// registry and the slot.
pub struct Ref<T: 'static> {
    registry: RegistryId,
    id: ReferenceId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Ref<T> {
    fn new(registry: RegistryId, id: ReferenceId) -> Self {
        Self {
            registry,
            id,
            _marker: PhantomData,
        }
    }

    /// The slot this handle points at.
    pub fn id(&self) -> ReferenceId {
        self.id
    }
}

// Manual impls so we don't require T: Copy/Clone for the handle itself.
impl<T: 'static> Copy for Ref<T> {}
impl<T: 'static> Clone for Ref<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry && self.id == other.id
    }
}

impl<T: 'static> Eq for Ref<T> {}

impl<T: 'static> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("registry", &self.registry)
            .field("id", &self.id)
            .field("type", &type_name::<T>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// An open binding block: ordered `(name, value)` pairs waiting to be
/// registered by [`Registry::end_scope`].
#[derive(Default)]
pub struct Scope {
    pending: Vec<(String, Box<dyn AnyReference>)>,
}

impl Scope {
    /// Begin a new, empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a binding. Names are checked when the scope ends.
    pub fn bind<T: fmt::Debug + 'static>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> &mut Self {
        let name = name.into();
        let reference = Reference::new(name.clone(), value);
        self.pending.push((name, Box::new(reference)));
        self
    }

    /// Queued names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// ScopeBindings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct BindingEntry {
    id: ReferenceId,
    value_type: TypeId,
    value_type_name: &'static str,
}

/// The references created by one closed scope, in binding order.
#[derive(Debug, Clone)]
pub struct ScopeBindings {
    registry: RegistryId,
    entries: IndexMap<String, BindingEntry>,
}

impl ScopeBindings {
    /// Typed handle for `name`.
    pub fn get<T: 'static>(&self, name: &str) -> Result<Ref<T>, RegistryError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownReference {
                name: name.to_owned(),
            })?;
        if entry.value_type != TypeId::of::<T>() {
            return Err(RegistryError::TypeMismatch {
                name: name.to_owned(),
                expected: type_name::<T>(),
                found: entry.value_type_name,
            });
        }
        Ok(Ref::new(self.registry, entry.id))
    }

    /// Names created by the scope, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// One entry of [`Registry::manifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSummary {
    pub name: String,
    pub alias: String,
    pub type_name: &'static str,
    pub value: String,
    pub readers: usize,
}

/// The name -> reference table for one build or session.
pub struct Registry {
    id: RegistryId,
    references: SlotMap<ReferenceId, Box<dyn AnyReference>>,
    names: IndexMap<String, ReferenceId>,
    computations: SlotMap<ComputationKey, String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            id: RegistryId::next(),
            references: SlotMap::with_key(),
            names: IndexMap::new(),
            computations: SlotMap::with_key(),
        }
    }
}

impl Registry {
    /// Create an empty registry with a fresh identity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    // -- computations ------------------------------------------------------

    /// Mint the identity token for a computation that will read references.
    pub fn computation(&mut self, label: impl Into<String>) -> ComputationId {
        ComputationId::new(self.id, self.computations.insert(label.into()))
    }

    /// Label given to a computation when it was minted. `None` for tokens
    /// from another registry or from before a [`clear`](Self::clear).
    pub fn computation_label(&self, id: ComputationId) -> Option<&str> {
        if id.registry() != self.id {
            return None;
        }
        self.computations.get(id.key()).map(String::as_str)
    }

    fn check_computation(&self, id: ComputationId) -> Result<(), RegistryError> {
        if id.registry() != self.id || !self.computations.contains_key(id.key()) {
            return Err(RegistryError::StaleHandle);
        }
        Ok(())
    }

    // -- registration ------------------------------------------------------

    /// Close `scope`, registering each of its bindings.
    ///
    /// Fails with [`RegistryError::NameConflict`] if any name is already
    /// registered or bound twice in the scope. On failure nothing from the
    /// scope is registered.
    pub fn end_scope(&mut self, scope: Scope) -> Result<ScopeBindings, RegistryError> {
        let mut seen = HashSet::new();
        for (name, _) in &scope.pending {
            if self.names.contains_key(name) || !seen.insert(name.as_str()) {
                tracing::debug!(name = %name, "reference name conflict");
                return Err(RegistryError::NameConflict { name: name.clone() });
            }
        }

        let mut bindings = ScopeBindings {
            registry: self.id,
            entries: IndexMap::new(),
        };
        for (name, reference) in scope.pending {
            let value_type = reference.value_type();
            let value_type_name = reference.value_type_name();
            let id = self.references.insert(reference);
            self.names.insert(name.clone(), id);
            tracing::debug!(name = %name, ty = value_type_name, "registered reference");
            bindings.entries.insert(
                name,
                BindingEntry {
                    id,
                    value_type,
                    value_type_name,
                },
            );
        }
        Ok(bindings)
    }

    /// Open a scope, let `f` bind names into it, then close it.
    pub fn bind_scope(
        &mut self,
        f: impl FnOnce(&mut Scope),
    ) -> Result<ScopeBindings, RegistryError> {
        let mut scope = Scope::new();
        f(&mut scope);
        self.end_scope(scope)
    }

    // -- lookup ------------------------------------------------------------

    /// Typed handle for a registered name.
    pub fn lookup<T: 'static>(&self, name: &str) -> Result<Ref<T>, RegistryError> {
        let id = *self
            .names
            .get(name)
            .ok_or_else(|| RegistryError::UnknownReference {
                name: name.to_owned(),
            })?;
        let slot = &self.references[id];
        if slot.value_type() != TypeId::of::<T>() {
            return Err(RegistryError::TypeMismatch {
                name: name.to_owned(),
                expected: type_name::<T>(),
                found: slot.value_type_name(),
            });
        }
        Ok(Ref::new(self.id, id))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Borrow the reference behind a handle.
    pub fn reference<T: 'static>(&self, handle: Ref<T>) -> Result<&Reference<T>, RegistryError> {
        if handle.registry != self.id {
            return Err(RegistryError::StaleHandle);
        }
        let slot = self
            .references
            .get(handle.id)
            .ok_or(RegistryError::StaleHandle)?;
        let name = slot.name().to_owned();
        let found = slot.value_type_name();
        slot.as_any()
            .downcast_ref::<Reference<T>>()
            .ok_or(RegistryError::TypeMismatch {
                name,
                expected: type_name::<T>(),
                found,
            })
    }

    /// Mutably borrow the reference behind a handle.
    pub fn reference_mut<T: 'static>(
        &mut self,
        handle: Ref<T>,
    ) -> Result<&mut Reference<T>, RegistryError> {
        if handle.registry != self.id {
            return Err(RegistryError::StaleHandle);
        }
        let slot = self
            .references
            .get_mut(handle.id)
            .ok_or(RegistryError::StaleHandle)?;
        let name = slot.name().to_owned();
        let found = slot.value_type_name();
        slot.as_any_mut()
            .downcast_mut::<Reference<T>>()
            .ok_or(RegistryError::TypeMismatch {
                name,
                expected: type_name::<T>(),
                found,
            })
    }

    // -- reads and writes --------------------------------------------------

    /// Read a clone of the value, recording `by` as a reader.
    pub fn get<T: Clone + 'static>(
        &mut self,
        handle: Ref<T>,
        by: ComputationId,
    ) -> Result<T, RegistryError> {
        self.check_computation(by)?;
        Ok(self.reference_mut(handle)?.get(by))
    }

    /// Read by reference, recording `by` as a reader.
    pub fn with<T: 'static, R>(
        &mut self,
        handle: Ref<T>,
        by: ComputationId,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, RegistryError> {
        self.check_computation(by)?;
        Ok(f(self.reference_mut(handle)?.read(by)))
    }

    /// Read without tracking.
    pub fn peek<T: Clone + 'static>(&self, handle: Ref<T>) -> Result<T, RegistryError> {
        Ok(self.reference(handle)?.peek().clone())
    }

    /// Replace the value, returning the previous one.
    pub fn write<T: 'static>(&mut self, handle: Ref<T>, value: T) -> Result<T, RegistryError> {
        Ok(self.reference_mut(handle)?.write(value))
    }

    /// Mutate the value in place.
    pub fn update<T: 'static>(
        &mut self,
        handle: Ref<T>,
        f: impl FnOnce(&mut T),
    ) -> Result<(), RegistryError> {
        self.reference_mut(handle)?.update(f);
        Ok(())
    }

    // -- dependency bookkeeping --------------------------------------------

    /// Computations that read `name`, in first-read order.
    pub fn readers_of(&self, name: &str) -> Result<Vec<ComputationId>, RegistryError> {
        let id = self
            .names
            .get(name)
            .ok_or_else(|| RegistryError::UnknownReference {
                name: name.to_owned(),
            })?;
        Ok(self.references[*id].readers().iter().copied().collect())
    }

    /// Labels of the computations that depend on `name`.
    pub fn dependents(&self, name: &str) -> Result<Vec<&str>, RegistryError> {
        Ok(self
            .readers_of(name)?
            .into_iter()
            .filter_map(|id| self.computation_label(id))
            .collect())
    }

    /// Names of the references `computation` has read, in registration order.
    pub fn dependencies_of(&self, computation: ComputationId) -> Vec<&str> {
        if computation.registry() != self.id {
            return Vec::new();
        }
        self.names
            .iter()
            .filter(|(_, id)| self.references[**id].readers().contains(&computation))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    // -- build support -----------------------------------------------------

    /// Pair every registered name with a compact alias, in registration order.
    pub fn aliases(&self) -> Vec<(&str, String)> {
        self.names().zip(ShortNames::new()).collect()
    }

    /// Summaries of every reference, in registration order.
    pub fn manifest(&self) -> Vec<ReferenceSummary> {
        self.names
            .iter()
            .zip(ShortNames::new())
            .map(|((name, id), alias)| {
                let slot = &self.references[*id];
                ReferenceSummary {
                    name: name.clone(),
                    alias,
                    type_name: slot.value_type_name(),
                    value: slot.debug_value(),
                    readers: slot.readers().len(),
                }
            })
            .collect()
    }

    /// Drop every reference and computation, starting a fresh session.
    pub fn clear(&mut self) {
        self.references.clear();
        self.names.clear();
        self.computations.clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.names
                    .iter()
                    .map(|(name, id)| (name, self.references[*id].debug_value())),
            )
            .finish()
    }
}
