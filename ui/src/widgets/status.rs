use egui::{RichText, Ui};
use usertable_business::{FetchStatus, TableAction, TableState};

use crate::utils::colors::{COLOR_AMBER, COLOR_RED};

/// Loading spinner, error with Retry, or a short summary of what is shown.
pub fn status_line(ui: &mut Ui, state: &TableState) -> Option<TableAction> {
    ui.horizontal(|ui| match state.status() {
        FetchStatus::Idle => None,
        FetchStatus::Loading => {
            ui.spinner();
            ui.label(RichText::new("Loading users…").color(COLOR_AMBER));
            None
        }
        FetchStatus::Loaded => {
            let config = state.config();
            ui.label(format!(
                "{} users, page {} of {}",
                state.store().users().len(),
                config.page,
                config.total_pages
            ));
            None
        }
        FetchStatus::Failed(error) => {
            ui.colored_label(COLOR_RED, format!("Failed to load users: {error}"));
            ui.button("Retry").clicked().then_some(TableAction::Retry)
        }
    })
    .inner
}
