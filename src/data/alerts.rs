use super::error::{DashboardError, Result};
use super::series::Series;

/// Glucose level above which a subject is flagged.  A maximum of exactly
/// this value is still normal.
pub const ALERT_THRESHOLD_MG_DL: f64 = 120.0;

/// Threshold classification of one subject's maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub subject: String,
    pub max_value: f64,
    pub exceeded: bool,
}

impl Alert {
    /// Evaluate a single series.
    pub fn evaluate(series: &Series) -> Result<Self> {
        let max_value = series
            .values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| DashboardError::EmptySeries {
                subject: series.name.clone(),
            })?;

        Ok(Alert {
            subject: series.name.clone(),
            max_value,
            exceeded: max_value > ALERT_THRESHOLD_MG_DL,
        })
    }

    /// User-facing line, with the maximum to one decimal place.
    pub fn message(&self) -> String {
        if self.exceeded {
            format!(
                "{}: glucose exceeded {ALERT_THRESHOLD_MG_DL} mg/dL (max: {:.1})",
                self.subject, self.max_value
            )
        } else {
            format!(
                "{}: glucose stayed normal (max: {:.1})",
                self.subject, self.max_value
            )
        }
    }
}

/// One alert per series, in series order.  The first empty series aborts the
/// whole evaluation.
pub fn evaluate_alerts(series: &[Series]) -> Result<Vec<Alert>> {
    series.iter().map(Alert::evaluate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, values: &[f64]) -> Series {
        Series {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn flags_strictly_above_threshold() {
        let alerts = evaluate_alerts(&[
            series("A", &[100.0, 110.0]),
            series("B", &[130.0, 140.0]),
        ])
        .unwrap();

        assert_eq!(
            alerts,
            [
                Alert { subject: "A".into(), max_value: 110.0, exceeded: false },
                Alert { subject: "B".into(), max_value: 140.0, exceeded: true },
            ]
        );
    }

    #[test]
    fn exactly_at_threshold_is_normal() {
        let alert = Alert::evaluate(&series("A", &[90.0, 120.0, 119.9])).unwrap();
        assert_eq!(alert.max_value, 120.0);
        assert!(!alert.exceeded);

        let alert = Alert::evaluate(&series("A", &[120.0001])).unwrap();
        assert!(alert.exceeded);
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = evaluate_alerts(&[series("A", &[1.0]), series("B", &[])]).unwrap_err();
        assert_eq!(err, DashboardError::EmptySeries { subject: "B".into() });
    }

    #[test]
    fn preserves_input_order() {
        let alerts =
            evaluate_alerts(&[series("Zed", &[1.0]), series("Amy", &[2.0])]).unwrap();
        let names: Vec<_> = alerts.iter().map(|a| a.subject.as_str()).collect();
        assert_eq!(names, ["Zed", "Amy"]);
    }

    #[test]
    fn messages_use_one_decimal() {
        let high = Alert::evaluate(&series("B", &[130.0, 140.04])).unwrap();
        assert_eq!(high.message(), "B: glucose exceeded 120 mg/dL (max: 140.0)");

        let normal = Alert::evaluate(&series("A", &[99.96])).unwrap();
        assert_eq!(normal.message(), "A: glucose stayed normal (max: 100.0)");
    }
}
