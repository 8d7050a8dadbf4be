use std::time::Duration;

use egui_kittest::Harness;
use usertable_ui::UserTableApp;
use usertable_ui::state::State;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Big enough for a full page of ten rows.
const WINDOW_SIZE: egui::Vec2 = egui::vec2(1024.0, 1000.0);

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, UserTableApp>,
}

impl<'a> TestCtx<'a> {
    /// App pointed at a fresh mock server. Mount mocks before the first `settle`.
    pub async fn new_app() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let app = UserTableApp::new(State::test(mock_server.uri()));
        let harness = Harness::builder()
            .with_size(WINDOW_SIZE)
            .build_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, UserTableApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Step frames, giving spawned fetches time to finish in between.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        for _ in 0..5 {
            self.harness.step();
        }
    }

    pub async fn mock_users(&self, count: u64) {
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("results", count.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_body(count)))
            .mount(&self.mock_server)
            .await;
    }

    #[allow(unused)]
    pub async fn mock_status(&self, count: u64, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("results", count.to_string()))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }
}

/// `count` users in fetch order `First{count-1} .. First000`, so name sorting reverses them.
pub fn users_body(count: u64) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "name": {
                    "title": "Ms",
                    "first": format!("First{:03}", count - 1 - i),
                    "last": "Tester"
                },
                "login": { "username": format!("user{i:03}") },
                "picture": { "thumbnail": format!("http://127.0.0.1:9/thumb/{i}.jpg") }
            })
        })
        .collect();
    serde_json::json!({ "results": results })
}
