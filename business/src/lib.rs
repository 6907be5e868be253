mod config;
pub mod http;
pub mod pagination;
mod user;
mod users_api;
mod users_compute;
mod view_state;
mod workflow;

#[cfg(test)]
mod test_utils;

pub use config::{BusinessConfig, DEFAULT_API_BASE_URL};
pub use pagination::{PAGE_SIZE, PageWindow};
pub use user::{SortField, UserId, UserRecord, UserStatus};
pub use users_api::{
    FetchError, FetchResult, UsersQuery, build_request, fetch_users, filter_by_status, load_all,
    search, sort_by, users_url,
};
pub use users_compute::{
    FetchStatus, FetchUsersCommand, FetchUsersInput, UsersCompute, outcome_batch,
};
pub use view_state::{ViewEvent, ViewState};
pub use workflow::{build_state_ctx, dispatch_view_event, page_window};
