use std::{any::TypeId, collections::BTreeMap};

use crate::{Error, State};

/// Read-only view of the registered states, handed to `Compute::compute`.
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(states: &'a BTreeMap<TypeId, Box<dyn State>>) -> Self {
        Self { states }
    }

    pub fn state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }
}

impl std::fmt::Debug for Dep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dep")
            .field("states", &self.states.len())
            .finish()
    }
}
