//! Sort selector and the re-initialize form.

use std::any::Any;

use egui::{TextEdit, Ui};
use log::warn;
use usertable_business::{
    DEFAULT_ROWS_PER_PAGE, DEFAULT_TOTAL_PAGES, SortKey, TableAction, TableState,
    reinitialize_action,
};
use usertable_states::{SnapshotClone, State, StateCtx, assign_impl};

const INPUT_WIDTH: f32 = 64.0;

/// Text typed into the re-initialize form, kept until the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsInput {
    pub total_users: String,
    pub rows_per_page: String,
}

impl Default for ControlsInput {
    fn default() -> Self {
        Self {
            total_users: (DEFAULT_ROWS_PER_PAGE * DEFAULT_TOTAL_PAGES).to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE.to_string(),
        }
    }
}

impl SnapshotClone for ControlsInput {}

impl State for ControlsInput {
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

/// Renders the controls row. Returns the action the user triggered, if any.
pub fn controls(state_ctx: &mut StateCtx, ui: &mut Ui) -> Option<TableAction> {
    let current = state_ctx.state::<TableState>().config().sort;
    let input = state_ctx.state_mut::<ControlsInput>();

    ui.horizontal(|ui| {
        let mut action = None;

        let mut selected = current;
        ui.label("Sort by");
        egui::ComboBox::from_id_salt("sort_key")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for key in SortKey::ALL {
                    ui.selectable_value(&mut selected, key, key.label());
                }
            });
        if selected != current {
            action = Some(TableAction::SetSort(selected));
        }

        ui.separator();

        let total_label = ui.label("Total users");
        ui.add(
            TextEdit::singleline(&mut input.total_users)
                .desired_width(INPUT_WIDTH)
                .hint_text("100"),
        )
        .labelled_by(total_label.id);

        let rows_label = ui.label("Rows per page");
        ui.add(
            TextEdit::singleline(&mut input.rows_per_page)
                .desired_width(INPUT_WIDTH)
                .hint_text("10"),
        )
        .labelled_by(rows_label.id);

        if ui.button("Re-Initialize").clicked() {
            match reinitialize_action(&input.rows_per_page, &input.total_users) {
                Ok(reinit) => action = Some(reinit),
                Err(err) => warn!("Re-initialize ignored: {err}"),
            }
        }

        action
    })
    .inner
}
