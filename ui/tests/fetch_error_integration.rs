//! A failing endpoint shows the error line and a Retry button.

mod common;

use common::TestCtx;
use kittest::Queryable;
use usertable_business::{FetchStatus, TableState};

#[tokio::test]
async fn test_server_error_shows_error_line() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_status(100, 500).await;

    ctx.settle().await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(
        harness.query_by_label_contains("status 500").is_some(),
        "error line should name the status"
    );
    assert!(harness.query_by_label("Retry").is_some());

    let requests = ctx
        .mock_server()
        .received_requests()
        .await
        .unwrap_or_default();
    assert_eq!(requests.len(), 1, "a failure must not be retried on its own");
}

#[tokio::test]
async fn test_retry_recovers() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_status(100, 503).await;
    ctx.settle().await;

    ctx.mock_server().reset().await;
    ctx.mock_users(100).await;
    ctx.harness_mut().get_by_label("Retry").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert_eq!(
        harness.state().state.ctx.state::<TableState>().status(),
        &FetchStatus::Loaded
    );
    assert!(harness.query_by_label_contains("Ms First000 Tester").is_some());
}
