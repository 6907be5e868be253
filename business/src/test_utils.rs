//! Test utilities for driving the users view against a mock `/users` API.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_users(&[], sample_users(3)).await;
//!
//! test_ctx.dispatch(ViewEvent::Startup);
//! test_ctx.flush_and_wait().await;
//!
//! assert_eq!(test_ctx.users().len(), 3);
//! ```

#![cfg(test)]

use std::time::Duration;

use rolodex_states::StateCtx;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{
    BusinessConfig, UserId, UserRecord, UserStatus, UsersCompute, ViewEvent, ViewState,
    build_state_ctx, dispatch_view_event,
};

/// Test context that holds a mock server and a `StateCtx` pointed at it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(BusinessConfig::new(mock_server.uri()));

        Self { mock_server, ctx }
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> bool {
        dispatch_view_event(&mut self.ctx, event)
    }

    /// Flush queued commands and wait until every spawned task has finished.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();
        self.wait().await;
    }

    /// Wait for already spawned tasks, syncing after each one.
    pub async fn wait(&mut self) {
        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();

        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "Timed out waiting for pending tasks ({} still in JoinSet)",
                    self.ctx.task_count()
                );
            }
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
    }

    pub async fn shutdown(&mut self) {
        self.ctx.shutdown().await;
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.ctx.compute::<UsersCompute>().users
    }

    pub fn view(&self) -> &ViewState {
        self.ctx.state::<ViewState>()
    }

    // =========================================================================
    // Mock endpoint helpers
    // =========================================================================

    /// `GET /users` with exactly the given query parameters answers `users`.
    pub async fn mock_users(&self, params: &[(&str, &str)], users: Vec<UserRecord>) {
        self.mock_users_with(params, ResponseTemplate::new(200).set_body_json(users))
            .await;
    }

    /// Like [`Self::mock_users`], answering after `delay`.
    pub async fn mock_users_delayed(
        &self,
        params: &[(&str, &str)],
        users: Vec<UserRecord>,
        delay: Duration,
    ) {
        self.mock_users_with(
            params,
            ResponseTemplate::new(200)
                .set_body_json(users)
                .set_delay(delay),
        )
        .await;
    }

    pub async fn mock_users_error(&self, params: &[(&str, &str)], status: u16) {
        self.mock_users_with(
            params,
            ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": "server error"
            })),
        )
        .await;
    }

    pub async fn mock_users_body(&self, params: &[(&str, &str)], body: &str) {
        self.mock_users_with(
            params,
            ResponseTemplate::new(200).set_body_string(body.to_owned()),
        )
        .await;
    }

    async fn mock_users_with(&self, params: &[(&str, &str)], response: ResponseTemplate) {
        let mut mock = Mock::given(method("GET")).and(path("/users"));
        for (key, value) in params {
            mock = mock.and(query_param(*key, *value));
        }
        mock.respond_with(response).mount(&self.mock_server).await;
    }
}

pub fn sample_user(id: u64, status: UserStatus) -> UserRecord {
    UserRecord {
        id: UserId::Number(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        phone: format!("555-01{id:02}"),
        address: format!("{id} Main St"),
        status,
    }
}

/// `count` users with ids `1..=count`, alternating Active and Inactive.
pub fn sample_users(count: u64) -> Vec<UserRecord> {
    (1..=count)
        .map(|id| {
            let status = if id % 2 == 1 {
                UserStatus::Active
            } else {
                UserStatus::Inactive
            };
            sample_user(id, status)
        })
        .collect()
}
