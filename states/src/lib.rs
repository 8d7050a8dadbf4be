//! Reactive state runtime shared by the business and UI crates.
//!
//! - `State`: plain data owned by the `StateCtx`, mutated via `StateCtx::update`.
//! - `Compute`: derived data, recomputed when a dependency changes.
//! - `Command`: an explicitly dispatched side effect that reports back through an updater.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod snapshot;
mod state;
mod state_sync_status;
mod task;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use snapshot::CommandSnapshot;
pub use state::{SnapshotClone, State, assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};
pub use updater::{LatestOnlyUpdater, Updater};
