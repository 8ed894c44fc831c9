use super::error::{DashboardError, Result};
use super::series::Series;

/// Descriptive statistics of one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub subject: String,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Population standard deviation (divides by N).
    pub std_dev: f64,
}

impl SummaryRow {
    pub fn compute(series: &Series) -> Result<Self> {
        let vals = &series.values;
        if vals.is_empty() {
            return Err(DashboardError::EmptySeries {
                subject: series.name.clone(),
            });
        }

        let n = vals.len() as f64;
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = vals.iter().sum::<f64>() / n;
        let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Ok(SummaryRow {
            subject: series.name.clone(),
            mean,
            max,
            min,
            std_dev: variance.sqrt(),
        })
    }
}

/// One row per series, in series order (never sorted).
pub fn summarize(series: &[Series]) -> Result<Vec<SummaryRow>> {
    series.iter().map(SummaryRow::compute).collect()
}
