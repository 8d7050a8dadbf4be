//! Per-frame glue between `TableState` and the fetch command.

use log::info;
use usertable_states::StateCtx;

use crate::{
    BusinessConfig, FetchUsersCommand, FetchUsersCompute, TableAction, TableState,
    VisiblePageCompute,
};

/// Register everything the users table needs.
pub fn register(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(TableState::default());
    ctx.record_compute(VisiblePageCompute::default());
    ctx.record_compute(FetchUsersCompute::default());
    ctx.record_command(FetchUsersCommand);
}

/// Run a reducer action against the registered `TableState`.
pub fn apply(ctx: &mut StateCtx, action: TableAction) {
    ctx.update::<TableState>(|state| state.apply(action));
}

/// Fold a finished fetch into the state, then start a new fetch if one is due.
///
/// Call once per frame after `StateCtx::sync_computes`. The fetch command is only
/// enqueued; `StateCtx::flush_commands` spawns it.
pub fn drive(ctx: &mut StateCtx) {
    let settled = ctx
        .cached::<FetchUsersCompute>()
        .and_then(|fetch| fetch.settle(ctx.state::<TableState>()));
    if let Some(action) = settled {
        apply(ctx, action);
    }

    if ctx.state::<TableState>().pending_fetch() {
        apply(ctx, TableAction::BeginFetch);
        if let Some(request) = ctx.state::<TableState>().in_flight() {
            info!(
                "Requesting {} users (generation {})",
                request.count, request.generation
            );
        }
        ctx.enqueue_command::<FetchUsersCommand>();
    }
}
