//! Reference<T>: a named reactive cell with read tracking.
//!
//! A reference wraps one value and remembers every computation that read it
//! (its "modification checkpoints"). Reads are attributed explicitly: the
//! reader passes its own [`ComputationId`], minted by
//! [`Registry::computation`](super::Registry::computation). Writes replace the
//! value but never notify anyone; the recorded readers are the bookkeeping a
//! scheduler would consult.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexSet;
use slotmap::new_key_type;

use super::registry::RegistryId;

new_key_type! {
    /// Slot of a computation inside its registry.
    pub(crate) struct ComputationKey;
}

/// Identity token of a computation that reads references.
///
/// Tokens are minted by one registry and are only accepted by that registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputationId {
    registry: RegistryId,
    key: ComputationKey,
}

impl ComputationId {
    pub(crate) fn new(registry: RegistryId, key: ComputationKey) -> Self {
        Self { registry, key }
    }

    pub(crate) fn registry(&self) -> RegistryId {
        self.registry
    }

    pub(crate) fn key(&self) -> ComputationKey {
        self.key
    }
}

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// A named reactive cell.
///
/// References are created by closing a [`Scope`](super::Scope) and are owned
/// by the [`Registry`](super::Registry) from then on.
pub struct Reference<T> {
    name: String,
    value: T,
    readers: IndexSet<ComputationId>,
}

impl<T> Reference<T> {
    /// Create an unregistered reference with no readers.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            readers: IndexSet::new(),
        }
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the value, recording `by` as a reader.
    ///
    /// A computation is recorded once no matter how often it reads.
    pub fn read(&mut self, by: ComputationId) -> &T {
        self.readers.insert(by);
        &self.value
    }

    /// Owned form of [`read`](Self::read).
    pub fn get(&mut self, by: ComputationId) -> T
    where
        T: Clone,
    {
        self.read(by).clone()
    }

    /// Read without recording a reader.
    pub fn peek(&self) -> &T {
        &self.value
    }

    /// Replace the value and return the previous one. Readers are kept and
    /// not notified.
    pub fn write(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Mutate the value in place. Readers are not notified.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
    }

    /// Computations that have read this reference, in first-read order.
    pub fn readers(&self) -> impl Iterator<Item = ComputationId> + '_ {
        self.readers.iter().copied()
    }

    /// Whether `computation` has read this reference.
    pub fn is_read_by(&self, computation: ComputationId) -> bool {
        self.readers.contains(&computation)
    }

    pub(crate) fn reader_set(&self) -> &IndexSet<ComputationId> {
        &self.readers
    }
}

// Comparisons look at the wrapped values only and never record a reader.
impl<T: PartialEq> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialOrd> PartialOrd for Reference<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: fmt::Display> fmt::Display for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reference({}: {} = {:?})",
            self.name,
            std::any::type_name::<T>(),
            self.value
        )
    }
}
