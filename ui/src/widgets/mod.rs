mod controls;
mod pagination;
mod status;
pub mod users_table;

pub use controls::{ControlsInput, controls};
pub use pagination::pagination;
pub use status::status_line;
pub use users_table::users_table;
