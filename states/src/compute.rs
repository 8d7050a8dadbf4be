use std::any::{Any, TypeId};

use crate::{Dep, SnapshotClone, State, Updater};

/// A derived value. `compute` runs when one of its dependencies changed and
/// publishes the new value through the `Updater`; it must not perform IO.
pub trait Compute: Any + SnapshotClone {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// States a compute reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    states: Vec<TypeId>,
}

impl ComputeDeps {
    /// No dependencies: the compute is a cache written only by commands.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.states.iter().copied()
    }
}
