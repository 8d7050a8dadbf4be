use std::{any::Any, future::Future, pin::Pin};

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A side effect dispatched explicitly by the UI (network IO and the like).
///
/// `run` reads everything it needs from the snapshot up front and reports back
/// through the updater; it never touches the `StateCtx` directly.
pub trait Command: Any {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
