//! Users table domain: records, sorting, pagination, the table reducer and the
//! fetch command that fills it.

mod api;
mod config;
pub mod controller;
mod fetch_users;
pub mod http;
mod sort;
mod store;
mod table_config;
mod table_state;
mod user;
mod visible_page;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod fetch_tests;
#[cfg(test)]
mod test_utils;

pub use api::{FetchError, fetch_users};
pub use config::{BusinessConfig, DEFAULT_API_BASE_URL, ENV_PREFIX, EnvOverrides};
pub use fetch_users::{FetchUsersCommand, FetchUsersCompute, FetchUsersResult};
pub use sort::SortKey;
pub use store::{StoreSnapshot, UserStore};
pub use table_config::{
    DEFAULT_ROWS_PER_PAGE, DEFAULT_TOTAL_PAGES, MAX_FETCH_SIZE, TableConfig, page_window,
    parse_positive, total_pages_for,
};
pub use table_state::{
    FetchRequest, FetchStatus, ReinitError, TableAction, TableState, reduce, reinitialize_action,
};
pub use user::{
    RandomUserItem, RandomUserLogin, RandomUserName, RandomUserPicture, RandomUserResponse, User,
    UserName,
};
pub use visible_page::VisiblePageCompute;
