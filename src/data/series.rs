use super::error::{DashboardError, Result};
use super::model::{Column, Table};

/// The time axis (hours): column 0 of the table as real numbers.
///
/// Not checked for monotonicity; the charts plot points in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub label: String,
    pub hours: Vec<f64>,
}

/// One subject's measurements, positionally aligned with the [`TimeAxis`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Time axis plus one [`Series`] per subject column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    pub time: TimeAxis,
    pub series: Vec<Series>,
}

impl SeriesSet {
    /// Split a table into its time axis and subject series.
    ///
    /// Every cell must be numeric.  A table with only the time column is not
    /// an error: the result simply has no series.
    pub fn extract(table: &Table) -> Result<Self> {
        let (time_col, subject_cols) = table
            .columns()
            .split_first()
            .ok_or_else(|| DashboardError::malformed("table has no columns"))?;

        let time = TimeAxis {
            label: time_col.name.clone(),
            hours: numeric_column(time_col)?,
        };
        let series = subject_cols
            .iter()
            .map(|col| {
                Ok(Series {
                    name: col.name.clone(),
                    values: numeric_column(col)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "extracted {} series over {} time points",
            series.len(),
            time.hours.len()
        );
        Ok(SeriesSet { time, series })
    }

    /// `Err(EmptyTable)` when there is nothing to plot.
    pub fn require_subjects(&self) -> Result<()> {
        if self.series.is_empty() {
            Err(DashboardError::EmptyTable)
        } else {
            Ok(())
        }
    }

    pub fn subject_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// `(time, value)` pairs of a series, ready for a line chart.
    pub fn points(&self, series: &Series) -> Vec<[f64; 2]> {
        self.time
            .hours
            .iter()
            .zip(&series.values)
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

fn numeric_column(col: &Column) -> Result<Vec<f64>> {
    col.cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            cell.as_f64().ok_or_else(|| {
                DashboardError::malformed(format!(
                    "column '{}', row {row}: '{cell}' is not a number",
                    col.name
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    fn extract(text: &str) -> Result<SeriesSet> {
        SeriesSet::extract(&load_bytes(text.as_bytes(), b',')?)
    }

    #[test]
    fn splits_time_and_subjects_in_column_order() {
        let set = extract("Time,A,B\n0,100,130\n1,110,140\n").unwrap();
        assert_eq!(set.time.label, "Time");
        assert_eq!(set.time.hours, [0.0, 1.0]);
        assert_eq!(set.subject_names().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(set.series[0].values, [100.0, 110.0]);
        assert_eq!(set.series[1].values, [130.0, 140.0]);
        assert!(set.require_subjects().is_ok());
    }

    #[test]
    fn single_column_yields_no_series() {
        let set = extract("Time\n0\n1\n").unwrap();
        assert!(set.series.is_empty());
        assert_eq!(set.require_subjects(), Err(DashboardError::EmptyTable));
    }

    #[test]
    fn non_numeric_subject_cell_is_malformed() {
        let err = extract("Time,A\n0,foo\n").unwrap_err();
        assert_eq!(
            err,
            DashboardError::MalformedInput("column 'A', row 0: 'foo' is not a number".into())
        );
    }

    #[test]
    fn non_numeric_time_cell_is_malformed() {
        let err = extract("Time,A\nnoon,100\n").unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(_)));
    }

    #[test]
    fn empty_cell_is_malformed() {
        let err = extract("Time,A\n0,\n").unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(_)));
    }

    #[test]
    fn time_axis_is_not_reordered() {
        let set = extract("Time,A\n2,1\n0,2\n1,3\n").unwrap();
        assert_eq!(set.time.hours, [2.0, 0.0, 1.0]);
        assert_eq!(
            set.points(&set.series[0]),
            [[2.0, 1.0], [0.0, 2.0], [1.0, 3.0]]
        );
    }
}
