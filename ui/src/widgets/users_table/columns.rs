//! Column definitions for the users table.

use egui_extras::Column;

pub const USERNAME_WIDTH: f32 = 180.0;
pub const THUMBNAIL_WIDTH: f32 = 64.0;
pub const THUMBNAIL_SIZE: f32 = 48.0;
pub const ROW_HEIGHT: f32 = 56.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Full Name (flexible), Username, Thumbnail.
#[inline]
pub fn table_columns() -> impl IntoIterator<Item = Column> {
    [
        Column::remainder().at_least(160.0),
        Column::exact(USERNAME_WIDTH),
        Column::exact(THUMBNAIL_WIDTH),
    ]
}
