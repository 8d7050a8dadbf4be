//! The users table.
//!
//! Split the same way as the rest of the widgets:
//! - `columns`: column definitions and widths
//! - `header`: header row
//! - `cells`: one function per column

mod cells;
pub mod columns;
pub mod header;

use egui::{Frame, Margin, Stroke, Ui};
use egui_extras::TableBuilder;
use usertable_business::VisiblePageCompute;

use crate::utils::colors::TABLE_BORDER_COLOR;
use cells::{render_full_name_cell, render_thumbnail_cell, render_username_cell};
use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;

/// Renders the rows of `page` in a bordered, striped table.
pub fn users_table(ui: &mut Ui, page: &VisiblePageCompute) {
    if page.is_empty() {
        ui.label("No users to show.");
        return;
    }

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::same(4))
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .id_salt("users_table")
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
            for column in table_columns() {
                table = table.column(column);
            }

            table
                .header(HEADER_HEIGHT, |mut header| render_table_header(&mut header))
                .body(|body| {
                    body.rows(ROW_HEIGHT, page.rows.len(), |mut row| {
                        let Some(user) = page.rows.get(row.index()) else {
                            return;
                        };
                        row.col(|ui| render_full_name_cell(ui, &user.full_name()));
                        row.col(|ui| render_username_cell(ui, &user.username));
                        row.col(|ui| render_thumbnail_cell(ui, &user.thumbnail_url));
                    });
                });
        });
}
