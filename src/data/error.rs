use thiserror::Error;

/// Failures of the in-memory pipeline (load → extract → alerts / summary).
///
/// File-level problems (unreadable path, unknown extension, broken Parquet)
/// are reported through `anyhow` by [`super::loader::load_file`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Unparseable or structurally inconsistent input.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The table has a time column but no subject columns.
    #[error("no subject columns to plot")]
    EmptyTable,

    /// A series has zero data rows.
    #[error("subject '{subject}' has no data rows")]
    EmptySeries { subject: String },
}

impl DashboardError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        DashboardError::MalformedInput(msg.into())
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
