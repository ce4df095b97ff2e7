// File: crates/chart-core/src/assembly.rs
// Summary: Chart assembly pipeline: load -> transform -> empty-state check -> build RenderModel.
// Notes:
// - State machine: Loading -> (Empty | Ready) -> Rendered. Empty is terminal and draws a message.
// - A load failure yields no chart at all; other charts are unaffected.

use tracing::{debug, error, info, warn};

use crate::error::{ChartError, ChartResult};
use crate::hover::HoverController;
use crate::model::{Canvas, RenderModel};
use crate::source::{DataSource, RawTable};
use crate::toolkit::{ChartToolkit, Notice};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChartState {
    Loading,
    Empty { message: String },
    Ready,
    Rendered,
}

impl ChartState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChartState::Empty { .. } | ChartState::Rendered)
    }
}

/// One chart configuration: which columns it reads and how it draws its records.
pub trait ChartSpec {
    type Record;

    /// Mount name; also the output file stem.
    fn mount(&self) -> &str;

    /// Turn the raw table into plottable records. `Err(NoValidRows)` for
    /// structural problems (e.g. a missing key column); an empty `Vec` when
    /// rows exist but none survived cleaning.
    fn prepare(&self, table: &RawTable) -> ChartResult<Vec<Self::Record>>;

    /// Message shown when `prepare` returns no records.
    fn empty_notice(&self) -> Notice;

    /// Scales, gridlines, axes, marks, hover bindings and annotations. `records` is never empty.
    fn build(&self, toolkit: &ChartToolkit, canvas: &mut Canvas, records: &[Self::Record]) -> ChartResult<()>;
}

/// Result of assembling one chart.
#[derive(Debug)]
pub struct RenderedChart {
    pub state: ChartState,
    pub model: RenderModel,
    /// Why the chart ended in `Empty`, when it did.
    pub empty_reason: Option<ChartError>,
}

impl RenderedChart {
    pub fn mount(&self) -> &str { &self.model.mount }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, ChartState::Empty { .. })
    }

    /// Interaction state for a live viewer, with a fresh hidden tooltip.
    pub fn hover_controller(&self, toolkit: &ChartToolkit) -> HoverController {
        HoverController::new(&self.model, toolkit.create_tooltip())
    }
}

/// Load `source` and assemble the chart. `SourceUnavailable` is the only data error returned.
pub fn assemble<C: ChartSpec>(toolkit: &ChartToolkit, chart: &C, source: &DataSource) -> ChartResult<RenderedChart> {
    debug!(chart = chart.mount(), source = %source.display_name(), "loading");
    let table = source.load().map_err(|e| {
        error!(chart = chart.mount(), error = %e, "failed to load chart data");
        e
    })?;
    assemble_table(toolkit, chart, &table)
}

/// Assemble from an already loaded table.
pub fn assemble_table<C: ChartSpec>(toolkit: &ChartToolkit, chart: &C, table: &RawTable) -> ChartResult<RenderedChart> {
    let mut canvas = toolkit.create_canvas(chart.mount());

    if table.is_empty() {
        let err = ChartError::EmptySource { source_name: table.source_name().to_string() };
        return Ok(empty(toolkit, canvas, Notice::error(err.to_string()), err));
    }

    let records = match chart.prepare(table) {
        Ok(r) if r.is_empty() => {
            let notice = chart.empty_notice();
            let err = ChartError::NoValidRows {
                source_name: table.source_name().to_string(),
                detail: notice.text.clone(),
            };
            return Ok(empty(toolkit, canvas, notice, err));
        }
        Ok(r) => r,
        Err(ChartError::NoValidRows { source_name, detail }) => {
            let notice = Notice::error(detail.clone());
            return Ok(empty(toolkit, canvas, notice, ChartError::NoValidRows { source_name, detail }));
        }
        Err(e) => return Err(e),
    };

    let mut state = ChartState::Ready;
    debug!(chart = chart.mount(), records = records.len(), ?state, "building");
    chart.build(toolkit, &mut canvas, &records)?;
    state = ChartState::Rendered;
    let model = canvas.finish();
    info!(
        chart = model.mount.as_str(),
        marks = model.marks.len(),
        interactive = model.interactive.len(),
        "chart rendered"
    );
    Ok(RenderedChart { state, model, empty_reason: None })
}

fn empty(toolkit: &ChartToolkit, mut canvas: Canvas, notice: Notice, reason: ChartError) -> RenderedChart {
    warn!(chart = canvas.mount(), reason = %reason, "empty chart");
    toolkit.message(&mut canvas, &notice);
    RenderedChart {
        state: ChartState::Empty { message: notice.text },
        model: canvas.finish(),
        empty_reason: Some(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::model::Shape;

    /// Counts rows with a non-empty `v` cell; draws one dot per record.
    struct Dots;

    impl ChartSpec for Dots {
        type Record = f64;
        fn mount(&self) -> &str { "dots" }
        fn prepare(&self, table: &RawTable) -> ChartResult<Vec<f64>> {
            if !table.has_column("v") {
                return Err(ChartError::NoValidRows {
                    source_name: table.source_name().into(),
                    detail: "No 'v' column.".into(),
                });
            }
            Ok(table.rows().filter_map(|r| crate::coerce::coerce(r.get("v"))).collect())
        }
        fn empty_notice(&self) -> Notice { Notice::muted("nothing to plot") }
        fn build(&self, tk: &ChartToolkit, canvas: &mut Canvas, records: &[f64]) -> ChartResult<()> {
            for &v in records {
                canvas.push_mark(
                    Shape::Circle { center: Point::new(v as f32, 0.0), radius: 2.0, fill: tk.theme().primary },
                    1.0,
                );
            }
            Ok(())
        }
    }

    fn table(csv: &str) -> RawTable {
        RawTable::from_csv_str("d.csv", csv).unwrap()
    }

    #[test]
    fn header_only_is_empty_source() {
        let out = assemble_table(&ChartToolkit::default(), &Dots, &table("v\n")).unwrap();
        assert_eq!(out.state, ChartState::Empty { message: "No rows found in d.csv".into() });
        assert!(out.model.marks.is_empty());
        assert!(matches!(out.empty_reason, Some(ChartError::EmptySource { .. })));
    }

    #[test]
    fn structural_failure_shows_detail() {
        let out = assemble_table(&ChartToolkit::default(), &Dots, &table("w\n1\n")).unwrap();
        assert_eq!(out.model.annotation_texts(), ["No 'v' column."]);
    }

    #[test]
    fn all_invalid_uses_chart_notice() {
        let out = assemble_table(&ChartToolkit::default(), &Dots, &table("v\nabc\n")).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.model.annotation_texts(), ["nothing to plot"]);
    }

    #[test]
    fn valid_rows_render() {
        let out = assemble_table(&ChartToolkit::default(), &Dots, &table("v\n1\n2\n")).unwrap();
        assert_eq!(out.state, ChartState::Rendered);
        assert_eq!(out.model.marks.len(), 2);
        assert!(out.state.is_terminal());
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let src = DataSource::parse("/definitely/not/here.csv");
        let err = assemble(&ChartToolkit::default(), &Dots, &src).unwrap_err();
        assert!(matches!(err, ChartError::SourceUnavailable { .. }));
    }
}
