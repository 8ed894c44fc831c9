use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use glucose_dashboard::data::export::DOWNLOAD_FILE_NAME;

use crate::state::AppState;
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Left side panel – subject visibility
// ---------------------------------------------------------------------------

/// Render the left subject panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Subjects");
    ui.separator();

    let subjects: Vec<String> = match &state.analysis {
        Some(a) => a.series.subject_names().map(str::to_string).collect(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    if subjects.is_empty() {
        ui.label("No subject columns.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &subjects {
                let text = RichText::new(name).color(state.colors.color_for(name));
                let mut checked = state.is_visible(name);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_subject(name);
                }
            }
        });
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
            let can_save = state.analysis.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Download data as CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{}: {} subjects, {} time points",
                state.file_name.as_deref().unwrap_or("data"),
                analysis.series.series.len(),
                analysis.table.n_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – dashboard sections
// ---------------------------------------------------------------------------

/// Render preview, charts, alerts, summary and download, top to bottom.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sweat Glucose Dashboard");
    ui.label("Upload your CSV file to see glucose trends, alerts, and stats.");
    ui.separator();

    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Please upload a CSV file to see the dashboard.  (File → Open…)");
        });
        return;
    };

    let mut download = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data Preview");
            tables::preview_table(ui, analysis);
            ui.add_space(12.0);

            let no_subjects = analysis.series.require_subjects().err();

            ui.heading("Static Plot");
            match &no_subjects {
                Some(e) => {
                    ui.label(e.to_string());
                }
                None => plot::static_plot(ui, state, &analysis.series),
            }
            ui.add_space(12.0);

            ui.heading("Interactive Plot");
            match &no_subjects {
                Some(e) => {
                    ui.label(e.to_string());
                }
                None => plot::interactive_plot(ui, state, &analysis.series),
            }
            ui.add_space(12.0);

            ui.heading(format!(
                "Alerts (High Glucose > {} mg/dL)",
                glucose_dashboard::data::alerts::ALERT_THRESHOLD_MG_DL
            ));
            match &no_subjects {
                Some(e) => {
                    ui.label(e.to_string());
                }
                None => tables::alerts_list(ui, &analysis.alerts),
            }
            ui.add_space(12.0);

            ui.heading("Statistical Summary");
            match &no_subjects {
                Some(e) => {
                    ui.label(e.to_string());
                }
                None => tables::summary_table(ui, &analysis.summary),
            }
            ui.add_space(12.0);

            ui.heading("Download Processed Data");
            download = ui.button("Download data as CSV").clicked();
        });

    if download {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open glucose data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download processed data")
        .set_file_name(DOWNLOAD_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_csv(&path);
    }
}
