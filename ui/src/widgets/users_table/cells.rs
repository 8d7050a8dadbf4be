//! Cell rendering functions for the users table.

use egui::{CornerRadius, Image, RichText, Ui, vec2};

use super::columns::THUMBNAIL_SIZE;

#[inline]
pub fn render_full_name_cell(ui: &mut Ui, full_name: &str) {
    ui.label(full_name);
}

#[inline]
pub fn render_username_cell(ui: &mut Ui, username: &str) {
    ui.label(RichText::new(username).monospace());
}

/// Thumbnails are fetched and decoded by the installed `egui_extras` loaders.
#[inline]
pub fn render_thumbnail_cell(ui: &mut Ui, url: &str) {
    ui.add(
        Image::new(url)
            .fit_to_exact_size(vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE))
            .corner_radius(CornerRadius::same(4)),
    );
}
