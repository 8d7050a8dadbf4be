//! Test utilities for driving the users table against a mock randomuser server.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_users(100).await;
//! test_ctx.flush_and_wait().await;
//! let page = test_ctx.ctx.cached::<VisiblePageCompute>();
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::time::Duration;

use usertable_states::StateCtx;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{BusinessConfig, controller};

/// Give up on a command task after this long.
const TASK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let mut ctx = StateCtx::new();
        controller::register(&mut ctx, BusinessConfig::new(mock_server.uri()));

        Self { mock_server, ctx }
    }

    /// Run frames until no command task is left, awaiting each spawned task.
    ///
    /// Each frame mirrors the UI loop: sync, drive, compute, flush.
    pub async fn flush_and_wait(&mut self) {
        loop {
            self.ctx.sync_computes();
            controller::drive(&mut self.ctx);
            self.ctx.run_computed();
            self.ctx.flush_commands();

            if self.ctx.task_count() == 0 {
                break;
            }
            while self.ctx.task_count() > 0 {
                match tokio::time::timeout(TASK_TIMEOUT, self.ctx.join_next_task()).await {
                    Ok(_) => self.ctx.sync_computes(),
                    Err(_) => panic!(
                        "Timed out waiting for pending tasks ({} still running)",
                        self.ctx.task_count()
                    ),
                }
            }
        }

        // apply compute outputs of the last frame
        self.ctx.sync_computes();
    }

    /// Serve `count` generated users for `GET /api/?results={count}`.
    pub async fn mock_users(&self, count: u64) {
        let response = ResponseTemplate::new(200).set_body_json(random_users_body(count));
        self.mock_users_with(count, response).await;
    }

    pub async fn mock_users_with(&self, count: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("results", count.to_string()))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_users_error(&self, count: u64, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("results", count.to_string()))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }
}

/// A randomuser-shaped body with `count` users named `user000`, `user001`, ...
///
/// First names run backwards (`count-1` first) so sorting is observable.
pub fn random_users_body(count: u64) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let first = format!("First{:03}", count - 1 - i);
            serde_json::json!({
                "gender": "female",
                "name": { "title": "Ms", "first": first, "last": "Tester" },
                "login": { "uuid": format!("uuid-{i}"), "username": format!("user{i:03}") },
                "picture": {
                    "large": format!("https://img.example/large/{i}.jpg"),
                    "thumbnail": format!("https://img.example/thumb/{i}.jpg")
                }
            })
        })
        .collect();

    serde_json::json!({
        "results": results,
        "info": { "seed": "test", "results": count, "page": 1, "version": "1.4" }
    })
}
