//! Task identity for spawned commands.
//!
//! Each command spawned by `StateCtx::flush_commands` gets a `TaskId`
//! (`TypeId` of the command plus a generation counter) and a `CancellationToken`.
//! Spawning the same command type again cancels the previous task, and any update
//! it still sends is dropped in `StateCtx::sync_computes` because its generation is
//! no longer the latest.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a spawned task.
///
/// Two tasks of the same command type share `type_id` and differ by `generation`;
/// higher generations were spawned later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned task with cooperative cancellation.
///
/// Cancelling does not abort the future; the command is expected to `select!` on
/// `cancelled()` around its await points.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }
}
