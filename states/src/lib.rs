//! Application state container shared by the business and UI crates.
//!
//! - [`State`]: plain data mutated on the UI thread.
//! - [`Compute`]: a cache only commands write to.
//! - [`Command`]: an explicitly dispatched side effect running on tokio.
//! - [`StateCtx`]: owns all of the above and applies published updates.

mod command;
mod compute;
mod ctx;
mod error;
mod runtime;
mod snapshot;
mod state;
mod task;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, assign_impl};
pub use ctx::StateCtx;
pub use error::StateError;
pub use runtime::{LatestOnlyUpdater, UpdateBatch, Updater};
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
