use eframe::egui::{self, Color32, DragValue, RichText, Ui};
use knn_scatter::{DataSource, Snapshot};

use crate::state::{Action, AppState, LoadState};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the category / query / k controls and the prediction.
pub fn side_panel(
    ui: &mut Ui,
    state: &AppState,
    snapshot: Option<&Snapshot<'_>>,
    actions: &mut Vec<Action>,
) {
    ui.heading("Explorer");
    ui.separator();

    let (Some(explorer), Some(snapshot)) = (state.explorer(), snapshot) else {
        ui.label(if state.is_loading() {
            "Loading dataset…"
        } else {
            "No dataset loaded."
        });
        return;
    };
    let current = &state.selection;

    // ---- Category ----
    ui.strong("Season");
    egui::ComboBox::from_id_salt("category")
        .selected_text(&current.category)
        .show_ui(ui, |ui: &mut Ui| {
            for cat in explorer.categories() {
                if ui.selectable_label(current.category == cat, cat).clicked() {
                    actions.push(Action::SelectCategory(cat.to_string()));
                }
            }
        });
    ui.separator();

    // ---- Query ----
    ui.strong(&state.config.x_title);
    let mut query_x = current.query_x;
    if ui.add(DragValue::new(&mut query_x).speed(1.0)).changed() {
        actions.push(Action::SetQuery(query_x));
    }
    ui.separator();

    // ---- Neighbour count ----
    ui.strong("Neighbours (k)");
    egui::ComboBox::from_id_salt("k")
        .selected_text(current.k.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in snapshot.valid_k_range() {
                if ui.selectable_label(option == current.k, option.to_string()).clicked() {
                    actions.push(Action::SetK(option));
                }
            }
        });
    ui.separator();

    // ---- Prediction ----
    ui.strong(format!("Predicted {}", state.config.y_title.to_lowercase()));
    ui.label(RichText::new(format!("{:.2}", snapshot.prediction())).size(22.0));
    if snapshot.fell_back() {
        ui.label(
            RichText::new(format!(
                "No records for {:?}; showing all seasons.",
                current.category
            ))
            .color(Color32::YELLOW),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(
    ui: &mut Ui,
    state: &AppState,
    snapshot: Option<&Snapshot<'_>>,
    actions: &mut Vec<Action>,
) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                actions.extend(open_file_dialog().map(Action::Open));
                ui.close_menu();
            }
        });

        ui.separator();

        match (&state.load, snapshot) {
            (LoadState::Ready(explorer), Some(snapshot)) => {
                ui.label(format!(
                    "{} records loaded, {} shown",
                    explorer.dataset().len(),
                    snapshot.active_subset().len()
                ));
            }
            (LoadState::Ready(explorer), None) => {
                ui.label(format!("{} records loaded", explorer.dataset().len()));
            }
            (LoadState::Loading { source, .. }, _) => {
                ui.spinner();
                ui.label(format!("Loading {source}"));
            }
            (LoadState::Unavailable(msg), _) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unavailable notice
// ---------------------------------------------------------------------------

/// Notice shown once a load has failed; the menu bar stays usable.
pub fn unavailable_notice(ctx: &egui::Context, message: &str) {
    egui::Window::new("Dataset unavailable")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label("Could not load the dataset. Check that the file exists and is readable.");
            ui.label(RichText::new(message).color(Color32::RED));
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for a local dataset file.
pub fn open_file_dialog() -> Option<DataSource> {
    rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file()
        .map(DataSource::File)
}
