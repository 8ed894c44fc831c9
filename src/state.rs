use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use glucose_dashboard::data::analysis::Analysis;
use glucose_dashboard::data::loader::load_file;

use crate::color::SubjectColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Result of the last successful load (None until a file is opened).
    pub analysis: Option<Analysis>,

    /// File name of the loaded table, for the top bar.
    pub file_name: Option<String>,

    /// Palette colour per subject.
    pub colors: SubjectColors,

    /// Subjects hidden from the charts.  Alerts and summary ignore this.
    pub hidden: BTreeSet<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load and analyse a file.  On failure the previous analysis is
    /// dropped so stale results are never shown for the new file.
    pub fn open(&mut self, path: &Path) {
        match load_analysis(path) {
            Ok(analysis) => {
                log::info!(
                    "Loaded {} with {} subjects over {} time points",
                    path.display(),
                    analysis.series.series.len(),
                    analysis.table.n_rows()
                );
                if let Err(e) = analysis.series.require_subjects() {
                    log::warn!("{}: {e}", path.display());
                }
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                self.set_analysis(analysis, file_name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.analysis = None;
                self.file_name = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a fresh analysis: recolour subjects and show all of them.
    pub fn set_analysis(&mut self, analysis: Analysis, file_name: Option<String>) {
        self.colors = SubjectColors::new(analysis.series.subject_names());
        self.hidden.clear();
        self.analysis = Some(analysis);
        self.file_name = file_name;
        self.status_message = None;
    }

    /// Write the loaded table as CSV.
    pub fn save_csv(&mut self, path: &Path) {
        let result = self
            .analysis
            .as_ref()
            .context("no data loaded")
            .and_then(|a| a.to_csv_bytes())
            .and_then(|bytes| {
                std::fs::write(path, bytes)
                    .with_context(|| format!("writing {}", path.display()))
            });

        match result {
            Ok(()) => {
                log::info!("Saved data to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save CSV: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn is_visible(&self, subject: &str) -> bool {
        !self.hidden.contains(subject)
    }

    /// Show or hide a single subject in the charts.
    pub fn toggle_subject(&mut self, subject: &str) {
        if !self.hidden.remove(subject) {
            self.hidden.insert(subject.to_string());
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hide_all(&mut self) {
        if let Some(analysis) = &self.analysis {
            self.hidden = analysis
                .series
                .subject_names()
                .map(str::to_string)
                .collect();
        }
    }
}

fn load_analysis(path: &Path) -> anyhow::Result<Analysis> {
    let table = load_file(path)?;
    Analysis::from_table(table).context("analysing table")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(text: &str) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glucose.csv");
        std::fs::write(&path, text).unwrap();
        let mut state = AppState::default();
        state.open(&path);
        (state, dir)
    }

    #[test]
    fn open_populates_analysis() {
        let (state, _dir) = state_with("Time,A,B\n0,100,130\n1,110,140\n");
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.alerts.len(), 2);
        assert_eq!(state.file_name.as_deref(), Some("glucose.csv"));
        assert!(state.status_message.is_none());
        assert!(state.is_visible("A"));
    }

    #[test]
    fn failed_open_clears_previous_data() {
        let (mut state, dir) = state_with("Time,A\n0,100\n");
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "Time,A\n0,foo\n").unwrap();

        state.open(&bad);
        assert!(state.analysis.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("not a number"), "{msg}");
    }

    #[test]
    fn visibility_toggles() {
        let (mut state, _dir) = state_with("Time,A,B\n0,100,130\n");
        state.toggle_subject("A");
        assert!(!state.is_visible("A"));
        assert!(state.is_visible("B"));
        state.toggle_subject("A");
        assert!(state.is_visible("A"));

        state.hide_all();
        assert!(!state.is_visible("A") && !state.is_visible("B"));
        state.show_all();
        assert!(state.is_visible("A") && state.is_visible("B"));
    }

    #[test]
    fn save_csv_writes_loaded_table() {
        let input = "Time,A\n0,100\n0.5,121.5\n";
        let (mut state, dir) = state_with(input);
        let out = dir.path().join("processed_glucose_data.csv");

        state.save_csv(&out);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), input);
    }

    #[test]
    fn save_without_data_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.save_csv(&dir.path().join("out.csv"));
        assert!(state.status_message.unwrap().contains("no data loaded"));
    }
}
