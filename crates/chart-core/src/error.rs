// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for chart pipelines; every variant stays local to one chart.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The CSV could not be opened, fetched, or parsed.
    #[error("failed to load {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The CSV parsed but held no data rows.
    #[error("No rows found in {source_name}")]
    EmptySource { source_name: String },

    /// Rows exist but none survived row transformation.
    #[error("no valid rows in {source_name}: {detail}")]
    NoValidRows { source_name: String, detail: String },

    #[error("invalid geometry: width={width}, height={height}, inner={inner_width}x{inner_height}")]
    InvalidGeometry {
        width: u32,
        height: u32,
        inner_width: i64,
        inner_height: i64,
    },

    #[error("invalid column pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("render failed: {0}")]
    Render(String),
}

impl ChartError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable { source_name: source_name.into(), reason: reason.to_string() }
    }

    /// True for the variants that end in an in-canvas message instead of no chart.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::EmptySource { .. } | Self::NoValidRows { .. })
    }
}
