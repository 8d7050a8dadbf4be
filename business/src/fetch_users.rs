//! Fetch users command + compute cache.
//!
//! Fetching is a side effect, so it lives in a command rather than a compute
//! (computes run implicitly whenever a dependency changes):
//! - `FetchUsersCompute`: compute-shaped cache holding the latest outcome, tagged
//!   with the `TableState` fetch generation it answers.
//! - `FetchUsersCommand`: reads the in-flight `FetchRequest` from the snapshot,
//!   performs the request and writes the outcome via its `LatestOnlyUpdater`.
//!
//! `controller::drive` folds a settled outcome back into `TableState`.

use std::any::Any;

use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;
use usertable_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater,
    SnapshotClone, Updater, assign_impl,
};

use crate::api::fetch_users;
use crate::{BusinessConfig, TableAction, TableState, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchUsersResult {
    #[default]
    Idle,
    Loaded { generation: u64, users: Vec<User> },
    Failed { generation: u64, error: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchUsersCompute {
    pub result: FetchUsersResult,
}

impl FetchUsersCompute {
    /// The reducer action for a settled outcome `state` is still waiting on.
    ///
    /// Loading and error display read `TableState::status`, never this cache.
    pub fn settle(&self, state: &TableState) -> Option<TableAction> {
        match &self.result {
            FetchUsersResult::Loaded { generation, users } if state.awaits(*generation) => {
                Some(TableAction::FetchLoaded {
                    generation: *generation,
                    users: users.clone(),
                })
            }
            FetchUsersResult::Failed { generation, error } if state.awaits(*generation) => {
                Some(TableAction::FetchFailed {
                    generation: *generation,
                    error: error.clone(),
                })
            }
            _ => None,
        }
    }
}

impl SnapshotClone for FetchUsersCompute {}

impl Compute for FetchUsersCompute {
    fn deps(&self) -> ComputeDeps {
        // written by FetchUsersCommand only
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Fetch `rows_per_page * total_pages` users for the in-flight request.
///
/// Enqueued by `controller::drive` right after `TableAction::BeginFetch`.
#[derive(Default, Debug)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let request = snap.state::<TableState>().map(TableState::in_flight);
        let api_url = snap
            .state::<BusinessConfig>()
            .map(|config| config.api_url().as_str().to_owned());

        Box::pin(async move {
            let (request, api_url) = match (request, api_url) {
                (Ok(Some(request)), Ok(api_url)) => (request, api_url),
                (Ok(None), _) => {
                    warn!("FetchUsersCommand: no fetch in flight, nothing to do");
                    return;
                }
                (Err(err), _) | (_, Err(err)) => {
                    error!("FetchUsersCommand: {err}");
                    return;
                }
            };
            let generation = request.generation;

            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("FetchUsersCommand: generation {generation} cancelled");
                }
                result = fetch_users(&api_url, request.count) => {
                    let result = match result {
                        Ok(users) => FetchUsersResult::Loaded { generation, users },
                        Err(err) => {
                            error!("FetchUsersCommand: {err}");
                            FetchUsersResult::Failed { generation, error: err.to_string() }
                        }
                    };
                    updater.set(FetchUsersCompute { result });
                }
            }
        })
    }
}
