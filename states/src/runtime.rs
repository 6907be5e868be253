use std::any::{Any, TypeId};

use flume::{Receiver, Sender};
use log::warn;

use crate::{Compute, State, TaskId};

type StateMutation = Box<dyn FnOnce(&mut dyn Any) + Send>;

pub(crate) enum UpdateOp {
    Compute {
        id: TypeId,
        name: &'static str,
        value: Box<dyn Any + Send>,
    },
    State {
        id: TypeId,
        name: &'static str,
        apply: StateMutation,
    },
}

/// A group of updates applied together in one `sync_computes` pass.
#[derive(Default)]
pub struct UpdateBatch {
    ops: Vec<UpdateOp>,
}

impl std::fmt::Debug for UpdateBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateBatch")
            .field("ops", &self.ops.len())
            .finish()
    }
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the compute `T` with `value`.
    pub fn set<T: Compute>(mut self, value: T) -> Self {
        self.ops.push(UpdateOp::Compute {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            value: Box::new(value),
        });
        self
    }

    /// Mutate the state `T` in place on the UI thread.
    pub fn update_state<T, F>(mut self, f: F) -> Self
    where
        T: State,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.ops.push(UpdateOp::State {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            apply: Box::new(move |any: &mut dyn Any| {
                if let Some(state) = any.downcast_mut::<T>() {
                    f(state);
                }
            }),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn into_ops(self) -> Vec<UpdateOp> {
        self.ops
    }
}

pub(crate) struct UpdateMessage {
    pub(crate) origin: Option<TaskId>,
    pub(crate) batch: UpdateBatch,
}

/// Sends updates back to `StateCtx` from any thread.
#[derive(Clone)]
pub struct Updater {
    send: Sender<UpdateMessage>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater").finish_non_exhaustive()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMessage>) -> Self {
        Self { send }
    }

    pub fn set<T: Compute>(&self, value: T) {
        self.send(UpdateBatch::new().set(value));
    }

    pub fn update_state<T, F>(&self, f: F)
    where
        T: State,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.send(UpdateBatch::new().update_state(f));
    }

    pub fn send(&self, batch: UpdateBatch) {
        self.send_from(None, batch);
    }

    fn send_from(&self, origin: Option<TaskId>, batch: UpdateBatch) {
        if batch.is_empty() {
            return;
        }
        if self.send.send(UpdateMessage { origin, batch }).is_err() {
            warn!("Updater: state context dropped, update discarded");
        }
    }
}

/// An [`Updater`] bound to the task that owns it.
///
/// Every batch is tagged with the task's [`TaskId`]; `StateCtx::sync_computes`
/// discards it if a newer task of the same command type has been flushed since.
#[derive(Debug, Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
}

impl LatestOnlyUpdater {
    pub fn new(inner: Updater, task: TaskId) -> Self {
        Self { inner, task }
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }

    pub fn set<T: Compute>(&self, value: T) {
        self.send(UpdateBatch::new().set(value));
    }

    pub fn update_state<T, F>(&self, f: F)
    where
        T: State,
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.send(UpdateBatch::new().update_state(f));
    }

    pub fn send(&self, batch: UpdateBatch) {
        self.inner.send_from(Some(self.task), batch);
    }
}

/// Owns the update channel shared by every [`Updater`] of one `StateCtx`.
pub(crate) struct StateRuntime {
    send: Sender<UpdateMessage>,
    recv: Receiver<UpdateMessage>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub(crate) fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub(crate) fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub(crate) fn drain(&self) -> Vec<UpdateMessage> {
        self.recv.try_iter().collect()
    }
}
