//! `/users` API client.
//!
//! Four request shapes, all `GET <base>/users` with different query parameters.
//! A non-2xx status or a body that is not an array of valid [`UserRecord`]s is
//! a failure of the whole request.

use thiserror::Error;

use crate::http::{Client, HttpError, RequestBuilder};
use crate::{SortField, UserRecord, UserStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersQuery {
    /// Unfiltered, server order.
    #[default]
    All,
    /// Free-text match, `q=<text>`.
    Search(String),
    /// Ascending sort, `_sort=<field>&_order=asc`.
    Sort(SortField),
    /// Exact status match, `status=<Active|Inactive>`.
    Filter(UserStatus),
}

impl UsersQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::All => Vec::new(),
            Self::Search(text) => vec![("q", text.clone())],
            Self::Sort(field) => vec![
                ("_sort", field.as_str().to_owned()),
                ("_order", "asc".to_owned()),
            ],
            Self::Filter(status) => vec![("status", status.as_str().to_owned())],
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("missing api base url")]
    MissingBaseUrl,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("failed to parse users: {0}")]
    Decode(String),
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message)
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

pub fn users_url(api_base_url: &str) -> String {
    format!("{}/users", api_base_url.trim_end_matches('/'))
}

pub fn build_request(api_base_url: &str, query: &UsersQuery) -> FetchResult<RequestBuilder> {
    if api_base_url.trim().is_empty() {
        return Err(FetchError::MissingBaseUrl);
    }
    Ok(Client::get(users_url(api_base_url))
        .header("accept", "application/json")
        .query(query.query_pairs()))
}

/// GET `/users` with the parameters of `query`.
pub async fn fetch_users(api_base_url: &str, query: &UsersQuery) -> FetchResult<Vec<UserRecord>> {
    let response = build_request(api_base_url, query)?.send().await?;

    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }

    response
        .json::<Vec<UserRecord>>()
        .map_err(|e| FetchError::Decode(e.to_string()))
}

pub async fn load_all(api_base_url: &str) -> FetchResult<Vec<UserRecord>> {
    fetch_users(api_base_url, &UsersQuery::All).await
}

pub async fn search(api_base_url: &str, text: &str) -> FetchResult<Vec<UserRecord>> {
    fetch_users(api_base_url, &UsersQuery::Search(text.to_owned())).await
}

pub async fn sort_by(api_base_url: &str, field: SortField) -> FetchResult<Vec<UserRecord>> {
    fetch_users(api_base_url, &UsersQuery::Sort(field)).await
}

pub async fn filter_by_status(
    api_base_url: &str,
    status: UserStatus,
) -> FetchResult<Vec<UserRecord>> {
    fetch_users(api_base_url, &UsersQuery::Filter(status)).await
}
