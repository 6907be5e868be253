//! Identity and cancellation handles for command tasks.
//!
//! Every flushed command gets a [`TaskId`]: the command's `TypeId` plus a
//! generation drawn from a counter that only grows. `StateCtx` remembers the
//! newest generation per command type and drops updates from older ones, so
//! overlapping requests resolve to the most recently issued one.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    /// The `TypeId` of the command that spawned the task.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations were issued later.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if `self` was issued before `other` for the same command type.
    pub fn is_older_than(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.generation < other.generation
    }
}

/// A spawned task's id together with its cancellation token.
///
/// Cancellation is cooperative; it is only requested on `StateCtx::shutdown`.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
