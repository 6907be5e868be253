use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::runtime::{StateRuntime, UpdateOp};
use crate::{
    Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, StateError, TaskHandle, TaskId,
    Updater,
};

/// Owns every state, compute and command of the application.
///
/// Frame loop contract:
/// 1. `sync_computes()` applies whatever commands have published.
/// 2. The UI reads `state` / `cached` and calls `update` / `enqueue_command`.
/// 3. `flush_commands()` spawns the enqueued commands.
///
/// Spawning needs a tokio runtime in scope (`Runtime::enter` in the binary,
/// `#[tokio::test]` in tests).
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    queue: Vec<(TypeId, &'static str)>,
    runtime: StateRuntime,

    // newest flushed task per command type; older results are dropped
    latest: BTreeMap<TypeId, TaskId>,
    next_generation: u64,

    tasks: JoinSet<TaskId>,
    handles: BTreeMap<TaskId, TaskHandle>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            runtime: StateRuntime::new(),
            latest: BTreeMap::new(),
            next_generation: 0,
            tasks: JoinSet::new(),
            handles: BTreeMap::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(TypeId::of::<T>(), Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, StateError> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never added with [`Self::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` was never added with [`Self::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutate a state in place.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never recorded with [`Self::record_compute`].
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("{}", StateError::compute_not_found::<T>()))
    }

    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    pub fn enqueue_command<T: Command>(&mut self) {
        self.queue
            .push((TypeId::of::<T>(), std::any::type_name::<T>()));
    }

    /// Enqueue and flush immediately.
    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    pub fn queued_commands(&self) -> usize {
        self.queue.len()
    }

    /// Spawn every enqueued command on the current tokio runtime.
    pub fn flush_commands(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let queue = std::mem::take(&mut self.queue);
        if tokio::runtime::Handle::try_current().is_err() {
            error!(
                "flush_commands: no tokio runtime in scope, dropping {} command(s)",
                queue.len()
            );
            return;
        }

        for (id, name) in queue {
            let Some(command) = self.commands.get(&id).map(Arc::clone) else {
                error!("flush_commands: {}", StateError::CommandNotFound(name));
                continue;
            };

            self.next_generation += 1;
            let task = TaskId::new(id, self.next_generation);
            self.latest.insert(id, task);

            let handle = TaskHandle::new(task, CancellationToken::new());
            let token = handle.cancellation_token();
            self.handles.insert(task, handle);

            let updater = LatestOnlyUpdater::new(self.runtime.updater(), task);
            let future = command.run(self.snapshot(), updater, token);
            debug!(
                "flush_commands: spawned {name} generation {}",
                task.generation()
            );
            self.tasks.spawn(async move {
                future.await;
                task
            });
        }
    }

    /// Apply every update published since the last call.
    ///
    /// Returns how many update batches were applied. Batches from a task
    /// older than the newest flushed task of the same command are dropped.
    pub fn sync_computes(&mut self) -> usize {
        self.reap_finished();

        let mut applied = 0;
        for message in self.runtime.drain() {
            if let Some(origin) = message.origin
                && let Some(latest) = self.latest.get(&origin.type_id())
                && origin.is_older_than(latest)
            {
                warn!(
                    "sync_computes: discarding stale update from generation {} (latest {})",
                    origin.generation(),
                    latest.generation()
                );
                continue;
            }

            for op in message.batch.into_ops() {
                self.apply(op);
            }
            applied += 1;
        }
        applied
    }

    /// The newest task flushed for command `T`, if any.
    pub fn latest_task<T: Command>(&self) -> Option<TaskId> {
        self.latest.get(&TypeId::of::<T>()).copied()
    }

    /// Number of spawned tasks that have not been joined yet.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<TaskId> {
        &mut self.tasks
    }

    /// Cancel all running tasks and wait for them to finish.
    pub async fn shutdown(&mut self) {
        for handle in self.handles.values() {
            if !handle.is_cancelled() {
                debug!("shutdown: cancelling generation {}", handle.id().generation());
                handle.cancel();
            }
        }
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                warn!("shutdown: task ended abnormally: {err}");
            }
        }
        self.handles.clear();
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.clone_boxed() {
                snap.insert_state(*id, value);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(value) = compute.clone_boxed() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn apply(&mut self, op: UpdateOp) {
        match op {
            UpdateOp::Compute { id, name, value } => match self.computes.get_mut(&id) {
                Some(compute) => compute.assign_box(value),
                None => warn!("sync_computes: {}", StateError::ComputeNotFound(name)),
            },
            UpdateOp::State { id, name, apply } => match self.states.get_mut(&id) {
                Some(state) => apply(state.as_any_mut()),
                None => warn!("sync_computes: {}", StateError::StateNotFound(name)),
            },
        }
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            match result {
                Ok(task) => {
                    self.handles.remove(&task);
                }
                Err(err) => error!("command task failed: {err}"),
            }
        }
    }
}
