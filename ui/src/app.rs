use std::time::Duration;

use usertable_business::{TableAction, TableState, VisiblePageCompute, controller};

use crate::{state::State, widgets};

/// Repaint interval while a fetch is in flight, so its result is picked up.
const LOADING_REPAINT: Duration = Duration::from_millis(100);

pub struct UserTableApp {
    pub state: State,
}

impl UserTableApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for UserTableApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Sync Compute for render
        self.state.ctx.sync_computes();

        let mut actions: Vec<TableAction> = Vec::new();

        egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Random Users");
            actions.extend(widgets::controls(&mut self.state.ctx, ui));
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("pagination_panel").show(ctx, |ui| {
            if let Some(page) = self.state.ctx.cached::<VisiblePageCompute>() {
                actions.extend(widgets::pagination(ui, &page.config));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(widgets::status_line(
                ui,
                self.state.ctx.state::<TableState>(),
            ));
            if let Some(page) = self.state.ctx.cached::<VisiblePageCompute>() {
                widgets::users_table(ui, page);
            }
        });

        if !actions.is_empty() {
            for action in actions {
                controller::apply(&mut self.state.ctx, action);
            }
            ctx.request_repaint();
        }

        controller::drive(&mut self.state.ctx);

        // Run background jobs
        self.state.ctx.run_computed();
        self.state.ctx.flush_commands();

        if self.state.ctx.has_pending_updates() {
            ctx.request_repaint();
        } else if self.state.ctx.state::<TableState>().is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
    }
}
