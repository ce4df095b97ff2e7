// File: crates/chart-core/src/charts/bar.rs
// Summary: Mean energy per screen technology (55" TVs): band x, zero-anchored y, value labels.

use crate::assembly::ChartSpec;
use crate::axis::AxisTitles;
use crate::error::{ChartError, ChartResult};
use crate::format::fmt1d;
use crate::geometry::{Point, RectF};
use crate::model::{Canvas, Shape, TextAnchor, TextStyle};
use crate::scale::DomainPolicy;
use crate::source::RawTable;
use crate::toolkit::{ChartToolkit, Notice};
use crate::transform::{transform_all, RecordSpec};

pub(crate) const MOUNT: &str = "bar55";
pub(crate) const DEFAULT_FILE: &str = "Ex5_TV_energy_55inchtv_byScreenType.csv";

const PADDING: f32 = 0.3;
/// Gap between a bar top and its value label.
const LABEL_GAP: f32 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct BarRecord {
    pub tech: String,
    pub mean: f64,
}

#[derive(Clone, Debug)]
pub struct BarChart {
    spec: RecordSpec,
}

impl BarChart {
    pub fn new() -> ChartResult<Self> {
        let spec = super::energy_by_tech_spec(&[
            r"^Mean\(Labelled energy consumption \(kWh/year\)\)",
            "Labelled energy",
        ])?;
        Ok(Self { spec })
    }
}

impl ChartSpec for BarChart {
    type Record = BarRecord;

    fn mount(&self) -> &str { MOUNT }

    fn prepare(&self, table: &RawTable) -> ChartResult<Vec<BarRecord>> {
        Ok(transform_all(table, &self.spec)
            .into_iter()
            .filter_map(|r| Some(BarRecord { tech: r.text("tech")?.to_string(), mean: r.number("value")? }))
            .collect())
    }

    fn empty_notice(&self) -> Notice {
        Notice::error("No valid rows (missing Screen_Tech or numeric Mean...).")
    }

    fn build(&self, tk: &ChartToolkit, canvas: &mut Canvas, records: &[BarRecord]) -> ChartResult<()> {
        let x = tk.band_x(records.iter().map(|r| r.tech.as_str()), PADDING);
        let y = tk
            .linear_y(records.iter().map(|r| r.mean), DomainPolicy::zero_anchored())
            .ok_or_else(|| ChartError::Render("bar chart has no finite values".into()))?;

        tk.draw_axis(canvas, &tk.bottom_band_axis(&x));
        tk.draw_axis(canvas, &tk.default_left_axis(&y));
        tk.add_axis_labels(canvas, &AxisTitles::new("Screen technology", "Mean annual energy (kWh/year)"));

        let theme = tk.theme();
        let bw = x.bandwidth();
        let base = tk.inner_height();
        let label = TextStyle::new(tk.label_font_size(), theme.value_label).anchor(TextAnchor::Middle);
        for r in records {
            // duplicate techs share a band; every record still gets its bar
            let Some(left) = x.to_px(&r.tech) else { continue };
            let top = y.to_px(r.mean);
            canvas.push_mark(
                Shape::Rect {
                    rect: RectF::from_ltrb(left, top.min(base), left + bw, top.max(base)),
                    fill: Some(theme.primary),
                    stroke: None,
                    corner_radius: 0.0,
                },
                1.0,
            );
            canvas.push_label(Shape::text(Point::new(left + bw / 2.0, top - LABEL_GAP), fmt1d(r.mean), label));
        }
        Ok(())
    }
}
