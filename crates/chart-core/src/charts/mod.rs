// File: crates/chart-core/src/charts/mod.rs
// Summary: The four chart configurations and name-based dispatch used by the binaries.

mod bar;
mod donut;
mod line;
mod scatter;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::assembly::{assemble, assemble_table, RenderedChart};
use crate::columns::ColumnSpec;
use crate::error::ChartResult;
use crate::source::{DataSource, RawTable};
use crate::toolkit::ChartToolkit;
use crate::transform::{FieldSpec, RecordSpec};

pub use bar::{BarChart, BarRecord};
pub use donut::{pie, DonutChart, DonutRecord, Slice};
pub use line::{monotone_x, LineChart, YearlyPrice};
pub use scatter::{ProductPoint, ScatterChart};

pub const SCREEN_TECH: &str = "Screen_Tech";
pub const MEAN_ENERGY: &str = "Mean(Labelled energy consumption (kWh/year))";

/// `Screen_Tech` text plus the mean-energy number, with header-drift fallbacks.
fn energy_by_tech_spec(patterns: &[&str]) -> ChartResult<RecordSpec> {
    let mut value = ColumnSpec::single(MEAN_ENERGY);
    for p in patterns {
        value = value.with_pattern(p)?;
    }
    Ok(RecordSpec::new()
        .field(FieldSpec::text("tech", ColumnSpec::single(SCREEN_TECH)))
        .field(FieldSpec::numeric("value", value)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Donut,
    Line,
    Scatter,
}

#[derive(Debug, Error)]
#[error("unknown chart '{0}' (expected bar, donut, line or scatter)")]
pub struct UnknownChart(pub String);

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Donut, ChartKind::Line, ChartKind::Scatter];

    /// Mount name, also used as the output file stem.
    pub fn mount(self) -> &'static str {
        match self {
            ChartKind::Bar => bar::MOUNT,
            ChartKind::Donut => donut::MOUNT,
            ChartKind::Line => line::MOUNT,
            ChartKind::Scatter => scatter::MOUNT,
        }
    }

    /// CSV file the chart reads by default.
    pub fn default_file(self) -> &'static str {
        match self {
            ChartKind::Bar => bar::DEFAULT_FILE,
            ChartKind::Donut => donut::DEFAULT_FILE,
            ChartKind::Line => line::DEFAULT_FILE,
            ChartKind::Scatter => scatter::DEFAULT_FILE,
        }
    }

    /// Source under `data_dir` (or a URL base when it starts with http).
    pub fn source_in(self, data_dir: &str) -> DataSource {
        if data_dir.starts_with("http://") || data_dir.starts_with("https://") {
            DataSource::parse(&format!("{}/{}", data_dir.trim_end_matches('/'), self.default_file()))
        } else {
            DataSource::Path(Path::new(data_dir).join(self.default_file()))
        }
    }

    pub fn render(self, toolkit: &ChartToolkit, source: &DataSource) -> ChartResult<RenderedChart> {
        match self {
            ChartKind::Bar => assemble(toolkit, &BarChart::new()?, source),
            ChartKind::Donut => assemble(toolkit, &DonutChart::new()?, source),
            ChartKind::Line => assemble(toolkit, &LineChart::new()?, source),
            ChartKind::Scatter => assemble(toolkit, &ScatterChart::new(), source),
        }
    }

    pub fn render_table(self, toolkit: &ChartToolkit, table: &RawTable) -> ChartResult<RenderedChart> {
        match self {
            ChartKind::Bar => assemble_table(toolkit, &BarChart::new()?, table),
            ChartKind::Donut => assemble_table(toolkit, &DonutChart::new()?, table),
            ChartKind::Line => assemble_table(toolkit, &LineChart::new()?, table),
            ChartKind::Scatter => assemble_table(toolkit, &ScatterChart::new(), table),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mount())
    }
}

impl FromStr for ChartKind {
    type Err = UnknownChart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "bar55" => Ok(ChartKind::Bar),
            "donut" | "pie" => Ok(ChartKind::Donut),
            "line" => Ok(ChartKind::Line),
            "scatter" => Ok(ChartKind::Scatter),
            _ => Err(UnknownChart(s.to_string())),
        }
    }
}
