use std::any::Any;

use log::error;
use usertable_states::{Compute, ComputeDeps, Dep, SnapshotClone, Updater, assign_impl};

use crate::{TableConfig, TableState, User};

/// The sorted, sliced page the table renders.
///
/// Derived from `TableState` whenever it changes; sorting happens here, never in
/// the store, so the store keeps fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisiblePageCompute {
    pub rows: Vec<User>,
    pub config: TableConfig,
}

impl VisiblePageCompute {
    pub fn derive(state: &TableState) -> Self {
        let config = *state.config();
        let mut sorted = state.store().users().to_vec();
        config.sort.sort(&mut sorted);

        Self {
            rows: config.window(&sorted).to_vec(),
            config,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SnapshotClone for VisiblePageCompute {}

impl Compute for VisiblePageCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none().state::<TableState>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        match deps.state::<TableState>() {
            Ok(state) => updater.set(Self::derive(state)),
            Err(err) => error!("VisiblePageCompute: {err}"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
