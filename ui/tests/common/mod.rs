use std::time::Duration;

use egui_kittest::Harness;
use rolodex_ui::RolodexApp;
use rolodex_ui::state::State;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Frames run after waiting, enough for results to reach the screen.
pub const UI_PROPAGATION_FRAMES: usize = 5;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, RolodexApp>,
}

impl<'a> TestCtx<'a> {
    /// App pointed at a fresh mock server. Mount mocks before the first `settle`.
    pub async fn new_app() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let app = RolodexApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, RolodexApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, RolodexApp> {
        &self.harness
    }

    /// Step once so enqueued fetches are flushed, let them finish, then
    /// step until the results are drawn.
    pub async fn settle(&mut self) {
        self.harness.step();
        tokio::time::sleep(Duration::from_millis(200)).await;
        for _ in 0..UI_PROPAGATION_FRAMES {
            self.harness.step();
        }
    }

    #[allow(unused)]
    pub async fn mock_users(&self, params: &[(&str, &str)], body: serde_json::Value) {
        self.mock_users_with(params, ResponseTemplate::new(200).set_body_json(body))
            .await;
    }

    #[allow(unused)]
    pub async fn mock_users_error(&self, params: &[(&str, &str)], status: u16) {
        self.mock_users_with(params, ResponseTemplate::new(status))
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

/// JSON array of users `1..=count`, odd ids Active and even ids Inactive.
#[allow(unused)]
pub fn users_json(count: u64) -> serde_json::Value {
    let users: Vec<serde_json::Value> = (1..=count)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("User {id}"),
                "email": format!("user{id}@example.com"),
                "phone": format!("555-01{id:02}"),
                "address": format!("{id} Main St"),
                "status": if id % 2 == 1 { "Active" } else { "Inactive" },
            })
        })
        .collect();
    serde_json::Value::Array(users)
}
