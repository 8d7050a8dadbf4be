//! Numbered page links with first/last shortcuts.

use egui::Ui;
use usertable_business::{TableAction, TableConfig};

/// Renders `« 1 2 … N »` for `config`. Returns the navigation the user picked.
pub fn pagination(ui: &mut Ui, config: &TableConfig) -> Option<TableAction> {
    ui.horizontal_wrapped(|ui| {
        let mut action = None;

        if ui.button("«").on_hover_text("First page").clicked() {
            action = Some(TableAction::FirstPage);
        }

        for page in 1..=config.total_pages {
            if ui
                .selectable_label(page == config.page, page.to_string())
                .clicked()
            {
                action = Some(TableAction::SetPage(page));
            }
        }

        if ui.button("»").on_hover_text("Last page").clicked() {
            action = Some(TableAction::LastPage);
        }

        action
    })
    .inner
}
