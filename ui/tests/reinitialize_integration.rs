//! Re-initialize refetches `rows per page * total pages` users.

mod common;

use common::TestCtx;
use kittest::Queryable;
use usertable_business::TableState;
use usertable_ui::widgets::ControlsInput;

fn set_inputs(ctx: &mut TestCtx<'_>, total_users: &str, rows_per_page: &str) {
    let input = ctx
        .harness_mut()
        .state_mut()
        .state
        .ctx
        .state_mut::<ControlsInput>();
    input.total_users = total_users.to_owned();
    input.rows_per_page = rows_per_page.to_owned();
}

#[tokio::test]
async fn test_reinitialize_requests_new_count() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_users(100).await;
    ctx.mock_users(15).await;
    ctx.settle().await;

    set_inputs(&mut ctx, "12", "5");
    ctx.harness_mut().get_by_label("Re-Initialize").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    let config = *harness.state().state.ctx.state::<TableState>().config();
    assert_eq!(config.total_pages, 3);
    assert_eq!(config.rows_per_page, 5);
    assert!(harness.query_by_label_contains("Ms First004 Tester").is_some());
    assert!(
        harness.query_by_label_contains("Ms First005 Tester").is_none(),
        "only five rows per page"
    );

    let counts: Vec<String> = ctx
        .mock_server()
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(name, _)| name == "results")
                .map(|(_, value)| value.into_owned())
        })
        .collect();
    assert_eq!(counts, ["100", "15"]);
}

#[tokio::test]
async fn test_invalid_input_is_ignored() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_users(100).await;
    ctx.settle().await;

    set_inputs(&mut ctx, "abc", "0");
    ctx.harness_mut().get_by_label("Re-Initialize").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    let config = *harness.state().state.ctx.state::<TableState>().config();
    assert_eq!(config.total_pages, 10);
    assert_eq!(config.rows_per_page, 10);
    assert!(harness.query_by_label_contains("Ms First000 Tester").is_some());
}

#[tokio::test]
async fn test_oversized_fetch_is_rejected() {
    let mut ctx = TestCtx::new_app().await;
    ctx.mock_users(100).await;
    ctx.settle().await;

    set_inputs(&mut ctx, "4294967295", "1");
    ctx.harness_mut().get_by_label("Re-Initialize").click();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    let config = *harness.state().state.ctx.state::<TableState>().config();
    assert_eq!(config.total_pages, 10, "page count must stay bounded");
    assert!(harness.query_by_label("4294967295").is_none());

    let requests = ctx
        .mock_server()
        .received_requests()
        .await
        .unwrap_or_default();
    assert_eq!(requests.len(), 1, "no request for an oversized fetch");
}
