use super::alerts::{Alert, evaluate_alerts};
use super::error::Result;
use super::export;
use super::loader::load_bytes;
use super::model::Table;
use super::series::SeriesSet;
use super::summary::{SummaryRow, summarize};

/// Rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

/// Everything the dashboard renders for one loaded table.
///
/// Built in a single pass; any failing stage fails the whole analysis, so a
/// partial alert list or summary is never produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: Table,
    pub series: SeriesSet,
    pub alerts: Vec<Alert>,
    pub summary: Vec<SummaryRow>,
}

impl Analysis {
    /// Parse delimited text and analyse it.
    pub fn from_bytes(bytes: &[u8], delimiter: u8) -> Result<Self> {
        Self::from_table(load_bytes(bytes, delimiter)?)
    }

    pub fn from_table(table: Table) -> Result<Self> {
        let series = SeriesSet::extract(&table)?;
        let alerts = evaluate_alerts(&series.series)?;
        let summary = summarize(&series.series)?;

        Ok(Analysis {
            table,
            series,
            alerts,
            summary,
        })
    }

    /// First `n` rows as display strings, header excluded.
    pub fn preview(&self, n: usize) -> Vec<Vec<String>> {
        (0..self.table.n_rows().min(n))
            .map(|row| self.table.row(row).map(|c| c.to_string()).collect())
            .collect()
    }

    /// The loaded table as CSV, for download.
    pub fn to_csv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        export::to_csv_bytes(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DashboardError;

    #[test]
    fn two_subject_scenario() {
        let analysis = Analysis::from_bytes(b"Time,A,B\n0,100,130\n1,110,140\n", b',').unwrap();

        assert_eq!(analysis.series.series.len(), 2);
        assert_eq!(analysis.alerts.len(), analysis.table.n_columns() - 1);
        assert_eq!(analysis.summary.len(), analysis.table.n_columns() - 1);

        let flags: Vec<_> = analysis
            .alerts
            .iter()
            .map(|a| (a.subject.as_str(), a.max_value, a.exceeded))
            .collect();
        assert_eq!(flags, [("A", 110.0, false), ("B", 140.0, true)]);

        let a = &analysis.summary[0];
        assert_eq!((a.mean, a.max, a.min, a.std_dev), (105.0, 110.0, 100.0, 5.0));
        let b = &analysis.summary[1];
        assert_eq!((b.mean, b.max, b.min, b.std_dev), (135.0, 140.0, 130.0, 5.0));
    }

    #[test]
    fn time_only_table_is_empty_not_an_error() {
        let analysis = Analysis::from_bytes(b"Time\n0\n1\n", b',').unwrap();
        assert!(analysis.series.series.is_empty());
        assert!(analysis.alerts.is_empty());
        assert!(analysis.summary.is_empty());
        assert_eq!(
            analysis.series.require_subjects(),
            Err(DashboardError::EmptyTable)
        );
    }

    #[test]
    fn non_numeric_cell_fails_before_alerts() {
        let err = Analysis::from_bytes(b"Time,A\n0,foo\n", b',').unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(_)));
    }

    #[test]
    fn header_only_table_fails_with_empty_series() {
        let err = Analysis::from_bytes(b"Time,A\n", b',').unwrap_err();
        assert_eq!(err, DashboardError::EmptySeries { subject: "A".into() });
    }

    #[test]
    fn preview_is_capped() {
        let mut text = String::from("Time,A\n");
        for i in 0..8 {
            text.push_str(&format!("{i},{}\n", 100 + i));
        }
        let analysis = Analysis::from_bytes(text.as_bytes(), b',').unwrap();

        let preview = analysis.preview(PREVIEW_ROWS);
        assert_eq!(preview.len(), 5);
        assert_eq!(preview[0], ["0", "100"]);
        assert_eq!(preview[4], ["4", "104"]);
        assert_eq!(analysis.preview(50).len(), 8);
    }

    #[test]
    fn download_matches_input() {
        let input = "Time,A,B\n0,100,130\n1,110,140\n";
        let analysis = Analysis::from_bytes(input.as_bytes(), b',').unwrap();
        assert_eq!(analysis.to_csv_bytes().unwrap(), input.as_bytes());
    }
}
