use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, VLine};
use glucose_dashboard::data::series::{Series, SeriesSet};

use crate::state::AppState;

const X_AXIS_LABEL: &str = "Time (hours)";
const Y_AXIS_LABEL: &str = "Sweat Glucose Level (mg/dL)";
const CHART_TITLE: &str = "Simulated Sweat Glucose Levels Over Time";
const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Static plot
// ---------------------------------------------------------------------------

/// Fixed view: no pan, zoom or hover coordinates.
pub fn static_plot(ui: &mut Ui, state: &AppState, set: &SeriesSet) {
    ui.label(RichText::new(CHART_TITLE).strong());

    Plot::new("static_plot")
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .height(PLOT_HEIGHT)
        .show_grid(true)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            for s in visible_series(state, set) {
                let points: PlotPoints = set.points(s).into_iter().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&s.name)
                        .color(state.colors.color_for(&s.name))
                        .width(1.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Interactive plot
// ---------------------------------------------------------------------------

/// Zoomable view with a unified hover readout of every visible subject at
/// the time point nearest the pointer.
pub fn interactive_plot(ui: &mut Ui, state: &AppState, set: &SeriesSet) {
    let response = Plot::new("interactive_plot")
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .height(PLOT_HEIGHT)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("t = {:.2} h\n{:.1} mg/dL", value.x, value.y)
            } else {
                format!("{name}\nt = {:.2} h\n{:.1} mg/dL", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for s in visible_series(state, set) {
                let points: PlotPoints = set.points(s).into_iter().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&s.name)
                        .color(state.colors.color_for(&s.name))
                        .width(1.5),
                );
            }

            let hovered = plot_ui
                .pointer_coordinate()
                .and_then(|p| nearest_index(&set.time.hours, p.x));
            if let Some(idx) = hovered {
                plot_ui.vline(VLine::new(set.time.hours[idx]).color(Color32::GRAY));
            }
            hovered
        });

    match response.inner {
        Some(idx) => {
            ui.label(hover_readout(set, idx, |name| state.is_visible(name)));
        }
        None => {
            ui.weak("Hover the chart to compare subjects at one time point.");
        }
    }
}

fn visible_series<'a>(
    state: &'a AppState,
    set: &'a SeriesSet,
) -> impl Iterator<Item = &'a Series> {
    set.series.iter().filter(|s| state.is_visible(&s.name))
}

/// Index of the time point closest to `x`.
fn nearest_index(hours: &[f64], x: f64) -> Option<usize> {
    hours
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
        .map(|(i, _)| i)
}

/// `t = 1.00 h | A: 101.2 | B: 130.0`
fn hover_readout(set: &SeriesSet, idx: usize, visible: impl Fn(&str) -> bool) -> String {
    let mut parts = vec![format!("t = {:.2} h", set.time.hours[idx])];
    for s in set.series.iter().filter(|s| visible(&s.name)) {
        if let Some(v) = s.values.get(idx) {
            parts.push(format!("{}: {v:.1}", s.name));
        }
    }
    parts.join(" | ")
}
