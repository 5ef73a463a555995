use std::time::Duration;

use eframe::egui;
use knn_scatter::ExplorerConfig;

use crate::state::{AppState, LoadState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct KnnScatterApp {
    pub state: AppState,
}

impl KnnScatterApp {
    /// Create the app and kick off the dataset load.
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for KnnScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Pick up a finished background load ----
        if self.state.poll_load() {
            ctx.request_repaint();
        } else if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- One snapshot per frame, shared by every panel ----
        let mut actions = Vec::new();
        {
            let state = &self.state;
            let snapshot = state.explorer().map(|e| e.snapshot(&state.selection));
            let snapshot = snapshot.as_ref();

            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
                panels::top_bar(ui, state, snapshot, &mut actions);
            });

            egui::SidePanel::left("selection_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, state, snapshot, &mut actions);
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                plot::scatter_plot(ui, state, snapshot);
            });
        }

        // ---- Inputs take effect on the next snapshot ----
        if !actions.is_empty() {
            for action in actions {
                self.state.apply(action);
            }
            ctx.request_repaint();
        }

        if let LoadState::Unavailable(message) = &self.state.load {
            panels::unavailable_notice(ctx, message);
        }
    }
}
