//! Users result set cache and the command that fills it.
//!
//! Fetching is network IO, so it lives in [`FetchUsersCommand`], a manual-only
//! command. The loaded rows live in [`UsersCompute`], which nothing but the
//! command writes.
//!
//! 1) Register once (see [`crate::build_state_ctx`]).
//! 2) Put the request into [`FetchUsersInput`], then
//!    `ctx.enqueue_command::<FetchUsersCommand>()` and `ctx.flush_commands()`.
//! 3) `ctx.sync_computes()` in the frame loop applies the result.
//!
//! A successful response replaces the rows, resets the view to page 1 and,
//! for a search, clears the search box, all in one batch. A failed response
//! is logged and leaves the rows and the view untouched.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rolodex_states::{
    Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, SnapshotClone, State,
    UpdateBatch, assign_impl, state_assign_impl,
};
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::users_api::{FetchError, fetch_users};
use crate::{BusinessConfig, UserRecord, UsersQuery, ViewState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch attempted yet.
    #[default]
    Idle,
    Loading,
    Loaded {
        count: usize,
        at: DateTime<Utc>,
    },
    /// The last fetch failed; rows are those of the last success.
    Failed(String),
}

/// The current result set, in server order.
#[derive(Debug, Clone, Default)]
pub struct UsersCompute {
    pub users: Vec<UserRecord>,
    pub status: FetchStatus,
}

impl UsersCompute {
    pub fn loaded(users: Vec<UserRecord>) -> Self {
        let count = users.len();
        Self {
            users,
            status: FetchStatus::Loaded {
                count,
                at: Utc::now(),
            },
        }
    }

    fn with_status(&self, status: FetchStatus) -> Self {
        Self {
            users: self.users.clone(),
            status,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            FetchStatus::Loaded { at, .. } => Some(at),
            _ => None,
        }
    }
}

impl SnapshotClone for UsersCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for UsersCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// What the next [`FetchUsersCommand`] should request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchUsersInput {
    pub query: UsersQuery,
    /// Overrides [`BusinessConfig::api_url`] when set.
    pub api_base_url: Option<Ustr>,
}

impl SnapshotClone for FetchUsersInput {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for FetchUsersInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Manual-only command: GET `/users` for [`FetchUsersInput::query`].
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<FetchUsersInput>();
        let config = snap.state::<BusinessConfig>();
        let previous = snap.compute::<UsersCompute>();
        let base_url = input.api_base_url.unwrap_or_else(|| config.api_url());
        let query = input.query;
        let generation = updater.task_id().generation();

        Box::pin(async move {
            info!("FetchUsersCommand: {query:?} (generation {generation})");
            updater.set(previous.with_status(FetchStatus::Loading));

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    warn!("FetchUsersCommand: generation {generation} cancelled");
                    return;
                }
                result = fetch_users(base_url.as_str(), &query) => result,
            };

            updater.send(outcome_batch(&previous, query, result));
        })
    }
}

/// Updates to apply once a fetch for `query` has finished.
pub fn outcome_batch(
    previous: &UsersCompute,
    query: UsersQuery,
    result: Result<Vec<UserRecord>, FetchError>,
) -> UpdateBatch {
    match result {
        Ok(users) => {
            info!("FetchUsersCommand: loaded {} users", users.len());
            UpdateBatch::new()
                .set(UsersCompute::loaded(users))
                .update_state::<ViewState, _>(move |view| view.on_results_replaced(&query))
        }
        Err(err) => {
            error!("FetchUsersCommand: {query:?} failed: {err}");
            UpdateBatch::new().set(previous.with_status(FetchStatus::Failed(err.to_string())))
        }
    }
}
