use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use crate::{Error, State};

/// Cloned states and computes handed to a `Command` when it is spawned.
#[derive(Default)]
pub struct CommandSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn state<T: State>(&self) -> Result<&T, Error> {
        self.get::<T>().ok_or_else(Error::state_not_found::<T>)
    }

    fn get<T: Any>(&self) -> Option<&T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }
}

impl std::fmt::Debug for CommandSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSnapshot")
            .field("entries", &self.inner.len())
            .finish()
    }
}
