//! Single owned state of the users table and its reducer.
//!
//! Every change goes through [`reduce`], a pure `(TableState, TableAction) -> TableState`
//! transition, so the refresh rules can be tested without a `StateCtx` or a UI.
//!
//! Fetches are tagged with a generation. Only the outcome of the latest issued
//! request is accepted; anything else is a superseded response and is ignored.

use std::any::Any;

use log::debug;
use thiserror::Error;
use usertable_states::{SnapshotClone, State, assign_impl};

use crate::{
    MAX_FETCH_SIZE, SortKey, TableConfig, User, UserStore, parse_positive, total_pages_for,
};

/// A fetch that has been issued and not yet settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetPage(u32),
    FirstPage,
    LastPage,
    SetSort(SortKey),
    Reinitialize { rows_per_page: u32, total_users: u32 },
    /// Fetch again after a failure.
    Retry,
    /// Issue a new fetch generation for the current configuration.
    BeginFetch,
    FetchLoaded { generation: u64, users: Vec<User> },
    FetchFailed { generation: u64, error: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReinitError {
    #[error("rows per page must be a positive integer, got {0:?}")]
    InvalidRowsPerPage(String),
    #[error("total users must be a positive integer, got {0:?}")]
    InvalidTotalUsers(String),
    #[error("would fetch {requested} users, at most {max} are allowed")]
    FetchTooLarge { requested: u64, max: u64 },
}

/// Build a `Reinitialize` action from the two text inputs.
///
/// Rejects configurations whose fetch size exceeds [`MAX_FETCH_SIZE`].
pub fn reinitialize_action(
    rows_per_page: &str,
    total_users: &str,
) -> Result<TableAction, ReinitError> {
    let rows = parse_positive(rows_per_page)
        .ok_or_else(|| ReinitError::InvalidRowsPerPage(rows_per_page.to_owned()))?;
    let total = parse_positive(total_users)
        .ok_or_else(|| ReinitError::InvalidTotalUsers(total_users.to_owned()))?;
    let requested = TableConfig::fetch_size_for(total, rows);
    if requested > MAX_FETCH_SIZE {
        return Err(ReinitError::FetchTooLarge {
            requested,
            max: MAX_FETCH_SIZE,
        });
    }
    Ok(TableAction::Reinitialize {
        rows_per_page: rows,
        total_users: total,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    config: TableConfig,
    store: UserStore,
    refresh_needed: bool,
    in_flight: Option<FetchRequest>,
    last_generation: u64,
    status: FetchStatus,
}

impl TableState {
    pub fn with_config(config: TableConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn in_flight(&self) -> Option<FetchRequest> {
        self.in_flight
    }

    pub fn refresh_needed(&self) -> bool {
        self.refresh_needed
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a new fetch should be issued now.
    ///
    /// A requested refresh always wins, even over an in-flight fetch (which it
    /// supersedes). Otherwise an empty store fetches only if nothing was ever
    /// attempted, so a failing or empty endpoint is not hammered every frame.
    pub fn pending_fetch(&self) -> bool {
        self.refresh_needed || (self.store.is_empty() && self.status == FetchStatus::Idle)
    }

    /// Whether `generation` is the fetch we are waiting for.
    pub fn awaits(&self, generation: u64) -> bool {
        self.in_flight.is_some_and(|req| req.generation == generation)
    }

    pub fn apply(&mut self, action: TableAction) {
        *self = reduce(std::mem::take(self), action);
    }
}

pub fn reduce(mut state: TableState, action: TableAction) -> TableState {
    match action {
        TableAction::SetPage(page) => {
            if state.config.contains_page(page) {
                state.config.page = page;
            } else {
                debug!(
                    "Ignoring page {page}, outside 1..={}",
                    state.config.total_pages
                );
            }
        }
        TableAction::FirstPage => state.config.page = 1,
        TableAction::LastPage => state.config.page = state.config.total_pages,
        TableAction::SetSort(sort) => state.config.sort = sort,
        TableAction::Reinitialize {
            rows_per_page,
            total_users,
        } => {
            if rows_per_page == 0
                || total_users == 0
                || TableConfig::fetch_size_for(total_users, rows_per_page) > MAX_FETCH_SIZE
            {
                debug!("Ignoring reinitialize with {rows_per_page} rows, {total_users} users");
                return state;
            }
            let total_pages = total_pages_for(total_users, rows_per_page);
            state.config.rows_per_page = rows_per_page;
            state.config.total_pages = total_pages;
            if state.config.page > total_pages {
                state.config.page = 1;
            }
            state.refresh_needed = true;
        }
        TableAction::Retry => state.refresh_needed = true,
        TableAction::BeginFetch => {
            let generation = state.last_generation + 1;
            if let Some(previous) = state.in_flight {
                debug!(
                    "Fetch generation {} superseded by {generation}",
                    previous.generation
                );
            }
            state.last_generation = generation;
            state.in_flight = Some(FetchRequest {
                generation,
                count: state.config.fetch_size(),
            });
            state.refresh_needed = false;
            state.status = FetchStatus::Loading;
        }
        TableAction::FetchLoaded { generation, users } => {
            if state.awaits(generation) {
                let config = state.config;
                state.store.replace(users, config);
                state.in_flight = None;
                state.status = FetchStatus::Loaded;
            } else {
                debug!("Discarding stale fetch result, generation {generation}");
            }
        }
        TableAction::FetchFailed { generation, error } => {
            if state.awaits(generation) {
                state.in_flight = None;
                state.status = FetchStatus::Failed(error);
            } else {
                debug!("Discarding stale fetch failure, generation {generation}");
            }
        }
    }
    state
}

impl SnapshotClone for TableState {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for TableState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
