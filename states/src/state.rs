use std::any::{Any, type_name};

use log::error;

/// Opt-in cloning of a value into a `CommandSnapshot`.
///
/// Commands run off the UI frame, so they only see states and computes that
/// return `Some` here.
pub trait SnapshotClone {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

pub trait State: Any + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a value sent through an `Updater`.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for states and computes.
pub fn assign_impl<T: Any>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("assign_box: update is not a {}", type_name::<T>()),
    }
}
