use eframe::egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};
use glucose_dashboard::data::alerts::Alert;
use glucose_dashboard::data::analysis::{Analysis, PREVIEW_ROWS};
use glucose_dashboard::data::summary::SummaryRow;

const WARNING: Color32 = Color32::from_rgb(0xE0, 0xA0, 0x00);
const SUCCESS: Color32 = Color32::from_rgb(0x2E, 0xA0, 0x43);
const ROW_HEIGHT: f32 = 18.0;

/// First rows of the loaded table, every column.
pub fn preview_table(ui: &mut Ui, analysis: &Analysis) {
    let rows = analysis.preview(PREVIEW_ROWS);

    ui.push_id("preview_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), analysis.table.n_columns())
            .header(20.0, |mut header| {
                for name in analysis.table.column_names() {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in &rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        for cell in row {
                            table_row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });

    if analysis.table.n_rows() > rows.len() {
        ui.weak(format!("… {} rows in total", analysis.table.n_rows()));
    }
}

/// One line per subject: warning colour when the threshold was exceeded.
pub fn alerts_list(ui: &mut Ui, alerts: &[Alert]) {
    for alert in alerts {
        let color = if alert.exceeded { WARNING } else { SUCCESS };
        let icon = if alert.exceeded { "⚠" } else { "✔" };
        ui.colored_label(color, format!("{icon} {}", alert.message()));
    }
}

/// Subject | Mean | Max | Min | Std Dev, in subject order.
pub fn summary_table(ui: &mut Ui, summary: &[SummaryRow]) {
    ui.push_id("summary_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(100.0))
            .columns(Column::auto().at_least(80.0), 4)
            .header(20.0, |mut header| {
                for title in ["Subject", "Mean", "Max", "Min", "Std Dev"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in summary {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(&row.subject);
                        });
                        for v in [row.mean, row.max, row.min, row.std_dev] {
                            table_row.col(|ui| {
                                ui.label(format!("{v:.4}"));
                            });
                        }
                    });
                }
            });
    });
}
