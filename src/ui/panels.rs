use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Air Quality Dashboard");
    ui.separator();
    ui.strong("Filter Data");

    let Some(range) = state.range else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut start = range.start;
    let mut end = range.end;

    ui.label("Start Date");
    ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
    ui.add_space(4.0);
    ui.label("End Date");
    ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));

    if start != range.start || end != range.end {
        log::debug!("Date range changed to {start}..={end}");
        state.set_range(Some(start), Some(end));
    }

    ui.separator();
    if let Some(report) = &state.report {
        ui.label(format!(
            "{} of {} observations in range",
            report.row_count, report.total_rows
        ));
        if start > end {
            ui.label(RichText::new("Start date is after end date").color(Color32::YELLOW));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.data_path.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air quality data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
