//! Wiring between user events, view state and the users fetch.

use log::debug;
use rolodex_states::StateCtx;

use crate::{
    BusinessConfig, FetchUsersCommand, FetchUsersInput, PageWindow, UserRecord, UsersCompute,
    ViewEvent, ViewState, pagination,
};

/// A context with every users-view state, compute and command registered.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();
    ctx.add_state(config);
    ctx.add_state(ViewState::default());
    ctx.add_state(FetchUsersInput::default());
    ctx.record_compute(UsersCompute::default());
    ctx.record_command(FetchUsersCommand);
    ctx
}

/// Apply `event` to the view state and enqueue the fetch it needs.
///
/// Returns whether a fetch was enqueued. The caller flushes commands.
pub fn dispatch_view_event(ctx: &mut StateCtx, event: ViewEvent) -> bool {
    let total_pages = loaded_users(ctx).map_or(1, |users| {
        pagination::total_pages(users.len(), pagination::PAGE_SIZE)
    });

    let Some(query) = ctx.state_mut::<ViewState>().reduce(event, total_pages) else {
        return false;
    };

    debug!("dispatch_view_event: fetching {query:?}");
    ctx.update::<FetchUsersInput>(|input| input.query = query);
    ctx.enqueue_command::<FetchUsersCommand>();
    true
}

/// The page of the loaded result set the view is on.
pub fn page_window(ctx: &StateCtx) -> PageWindow<'_, UserRecord> {
    let users = loaded_users(ctx).unwrap_or(&[]);
    PageWindow::of(users, ctx.state::<ViewState>().current_page)
}

fn loaded_users(ctx: &StateCtx) -> Option<&[UserRecord]> {
    ctx.cached::<UsersCompute>()
        .map(|compute| compute.users.as_slice())
}
