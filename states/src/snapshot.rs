use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

#[derive(Default)]
struct SnapshotMap {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl SnapshotMap {
    fn insert(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owned copies of states and computes handed to a command.
///
/// Commands run on the async runtime and must not borrow from `StateCtx`, so
/// everything they read is cloned when the command is flushed.
#[derive(Default)]
pub struct CommandSnapshot {
    states: SnapshotMap,
    computes: SnapshotMap,
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .finish()
    }
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_state(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub(crate) fn insert_compute(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.computes.insert(id, value);
    }

    /// Add a state by value. Mostly useful when driving a command by hand in tests.
    pub fn with_state<T: State + Clone>(mut self, state: T) -> Self {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
        self
    }

    pub fn try_state<T: State + Clone>(&self) -> Option<T> {
        self.states.get::<T>()
    }

    pub fn try_compute<T: Compute + Clone>(&self) -> Option<T> {
        self.computes.get::<T>()
    }

    /// # Panics
    /// Panics if `T` was not registered or does not implement a snapshot.
    pub fn state<T: State + Clone>(&self) -> T {
        self.try_state::<T>()
            .unwrap_or_else(|| panic!("State snapshot for {} is missing", type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` was not registered or does not implement a snapshot.
    pub fn compute<T: Compute + Clone>(&self) -> T {
        self.try_compute::<T>()
            .unwrap_or_else(|| panic!("Compute snapshot for {} is missing", type_name::<T>()))
    }
}
