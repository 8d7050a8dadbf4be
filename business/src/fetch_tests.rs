//! Fetch-to-render flow tests against a mock randomuser server.

use std::time::Duration;

use wiremock::ResponseTemplate;

use crate::test_utils::{TestContext, random_users_body};
use crate::{FetchStatus, SortKey, TableAction, TableState, VisiblePageCompute, controller};

fn visible_firsts(test_ctx: &TestContext) -> Vec<String> {
    test_ctx
        .ctx
        .cached::<VisiblePageCompute>()
        .map(|page| page.rows.iter().map(|u| u.name.first.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn initial_fetch_shows_first_ten_sorted_users() {
    let mut test_ctx = TestContext::new().await;
    test_ctx.mock_users(100).await;

    test_ctx.flush_and_wait().await;

    let state = test_ctx.ctx.state::<TableState>();
    assert_eq!(state.status(), &FetchStatus::Loaded);
    assert_eq!(state.store().users().len(), 100);
    assert_eq!(state.config().total_pages, 10);

    let expected: Vec<String> = (0..10).map(|i| format!("First{i:03}")).collect();
    assert_eq!(visible_firsts(&test_ctx), expected);
}

#[tokio::test]
async fn reinitialize_requests_rows_times_pages() {
    let mut test_ctx = TestContext::new().await;
    test_ctx.mock_users(100).await;
    test_ctx.mock_users(15).await;
    test_ctx.flush_and_wait().await;

    controller::apply(&mut test_ctx.ctx, TableAction::LastPage);
    controller::apply(
        &mut test_ctx.ctx,
        TableAction::Reinitialize {
            rows_per_page: 5,
            total_users: 12,
        },
    );
    test_ctx.flush_and_wait().await;

    let state = test_ctx.ctx.state::<TableState>();
    assert_eq!(state.config().total_pages, 3);
    assert_eq!(state.config().page, 1);
    assert_eq!(state.store().users().len(), 15);
    assert_eq!(visible_firsts(&test_ctx).len(), 5);
}

#[tokio::test]
async fn sort_change_rederives_without_network() {
    let mut test_ctx = TestContext::new().await;
    test_ctx
        .mock_users_with(
            100,
            ResponseTemplate::new(200).set_body_json(random_users_body(100)),
        )
        .await;
    test_ctx.flush_and_wait().await;
    let requests_after_fetch = test_ctx
        .mock_server
        .received_requests()
        .await
        .map(|r| r.len());

    controller::apply(&mut test_ctx.ctx, TableAction::SetSort(SortKey::UsernameDesc));
    test_ctx.flush_and_wait().await;

    let page = test_ctx
        .ctx
        .cached::<VisiblePageCompute>()
        .expect("page computed");
    assert_eq!(page.rows[0].username, "user099");
    assert_eq!(
        test_ctx.mock_server.received_requests().await.map(|r| r.len()),
        requests_after_fetch
    );
}

#[tokio::test]
async fn server_error_is_reported_and_not_retried() {
    let mut test_ctx = TestContext::new().await;
    test_ctx.mock_users_error(100, 500).await;

    test_ctx.flush_and_wait().await;
    // a second frame must not refetch
    test_ctx.flush_and_wait().await;

    let state = test_ctx.ctx.state::<TableState>();
    match state.status() {
        FetchStatus::Failed(message) => assert!(message.contains("500"), "{message}"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(state.store().is_empty());
}

#[tokio::test]
async fn retry_after_failure_fetches_again() {
    let mut test_ctx = TestContext::new().await;
    test_ctx.mock_users_error(100, 503).await;
    test_ctx.flush_and_wait().await;

    test_ctx.mock_server.reset().await;
    test_ctx.mock_users(100).await;
    controller::apply(&mut test_ctx.ctx, TableAction::Retry);
    test_ctx.flush_and_wait().await;

    let state = test_ctx.ctx.state::<TableState>();
    assert_eq!(state.status(), &FetchStatus::Loaded);
    assert_eq!(state.store().users().len(), 100);
}

#[tokio::test]
async fn superseded_fetch_never_overwrites_newer_result() {
    let mut test_ctx = TestContext::new().await;
    test_ctx
        .mock_users_with(
            100,
            ResponseTemplate::new(200)
                .set_body_json(random_users_body(100))
                .set_delay(Duration::from_millis(300)),
        )
        .await;
    test_ctx.mock_users(5).await;

    // frame 1: initial fetch of 100 goes out
    test_ctx.ctx.sync_computes();
    controller::drive(&mut test_ctx.ctx);
    test_ctx.ctx.flush_commands();

    // user reinitializes before it answers
    controller::apply(
        &mut test_ctx.ctx,
        TableAction::Reinitialize {
            rows_per_page: 5,
            total_users: 5,
        },
    );
    test_ctx.flush_and_wait().await;

    let state = test_ctx.ctx.state::<TableState>();
    assert_eq!(state.status(), &FetchStatus::Loaded);
    assert_eq!(state.store().users().len(), 5);
    assert!(!state.is_loading());
}
