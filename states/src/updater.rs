use std::any::{Any, TypeId, type_name};

use flume::Sender;
use log::debug;

use crate::TaskId;

/// A value sent back to the `StateCtx`, applied on the next `sync_computes`.
pub(crate) struct Update {
    pub(crate) id: TypeId,
    pub(crate) value: Box<dyn Any + Send>,
    pub(crate) task: Option<TaskId>,
}

/// Sends replacement values for registered states or computes.
///
/// Cheap to clone and `Send`, so it can be moved into async work.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        self.send_update(Update {
            id: TypeId::of::<T>(),
            value: Box::new(value),
            task: None,
        });
    }

    fn send_update(&self, update: Update) {
        if self.send.send(update).is_err() {
            debug!("StateCtx dropped, discarding update");
        }
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater").finish_non_exhaustive()
    }
}

/// `Updater` bound to the task that owns it.
///
/// Updates are tagged with the task's generation; once a newer task of the same
/// command type has been spawned they are dropped instead of applied.
#[derive(Clone, Debug)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, task: TaskId) -> Self {
        Self { inner, task }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        debug!(
            "{} from task generation {}",
            type_name::<T>(),
            self.task.generation()
        );
        self.inner.send_update(Update {
            id: TypeId::of::<T>(),
            value: Box::new(value),
            task: Some(self.task),
        });
    }
}
