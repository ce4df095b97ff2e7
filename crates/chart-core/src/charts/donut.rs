// File: crates/chart-core/src/charts/donut.rs
// Summary: Technology mix donut: pie layout in input order, share labels, legend, slice tooltips.

use std::f32::consts::TAU;

use indexmap::IndexSet;

use crate::assembly::ChartSpec;
use crate::axis::AxisTitles;
use crate::error::ChartResult;
use crate::format::fmt_percent;
use crate::geometry::{Point, RectF};
use crate::model::{polar, Canvas, HitRegion, HoverEffect, PathCmd, Shape, Stroke, TextAnchor, TextStyle};
use crate::source::RawTable;
use crate::toolkit::{ChartToolkit, Notice};
use crate::transform::{transform_all, RecordSpec};

pub(crate) const MOUNT: &str = "donut";
pub(crate) const DEFAULT_FILE: &str = "Ex5_TV_energy_Allsizes_byScreenType.csv";

const INNER_RATIO: f32 = 0.55;
/// Slices below this share get no label.
const LABEL_MIN_SHARE: f64 = 0.05;
const HOVER_OPACITY: f32 = 0.9;
const LEGEND_COLUMNS: usize = 4;
const LEGEND_ROW: f32 = 18.0;
const LEGEND_SWATCH: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DonutRecord {
    pub tech: String,
    pub value: f64,
}

/// One pie slice; angles in radians, 0 at 12 o'clock, clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub start: f32,
    pub end: f32,
    /// Share of the positive total.
    pub share: f64,
}

/// Pie layout without sorting. Non-positive values get empty slices.
pub fn pie(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut a0 = 0.0f64;
    values
        .iter()
        .map(|&v| {
            let share = if total > 0.0 && v > 0.0 { v / total } else { 0.0 };
            let a1 = a0 + share * TAU as f64;
            let s = Slice { start: a0 as f32, end: a1 as f32, share };
            a0 = a1;
            s
        })
        .collect()
}

/// Annular sector: outer arc clockwise, inner arc back.
fn annulus_path(center: Point, inner: f32, outer: f32, s: &Slice) -> Vec<PathCmd> {
    vec![
        PathCmd::MoveTo(polar(center, outer, s.start)),
        PathCmd::Arc { center, radius: outer, start: s.start, end: s.end },
        PathCmd::LineTo(polar(center, inner, s.end)),
        PathCmd::Arc { center, radius: inner, start: s.end, end: s.start },
        PathCmd::Close,
    ]
}

#[derive(Clone, Debug)]
pub struct DonutChart {
    spec: RecordSpec,
}

impl DonutChart {
    pub fn new() -> ChartResult<Self> {
        let spec = super::energy_by_tech_spec(&[r"Mean\(Labelled energy consumption \(kWh/year\)\)"])?;
        Ok(Self { spec })
    }
}

impl ChartSpec for DonutChart {
    type Record = DonutRecord;

    fn mount(&self) -> &str { MOUNT }

    /// Records in input order; an all-zero (or negative) total leaves nothing to plot.
    fn prepare(&self, table: &RawTable) -> ChartResult<Vec<DonutRecord>> {
        let records: Vec<DonutRecord> = transform_all(table, &self.spec)
            .into_iter()
            .filter_map(|r| Some(DonutRecord { tech: r.text("tech")?.to_string(), value: r.number("value")? }))
            .collect();
        let total: f64 = records.iter().map(|r| r.value).filter(|v| *v > 0.0).sum();
        if total > 0.0 { Ok(records) } else { Ok(Vec::new()) }
    }

    fn empty_notice(&self) -> Notice {
        Notice::error("No valid rows (missing Screen_Tech or numeric Mean...).")
    }

    fn build(&self, tk: &ChartToolkit, canvas: &mut Canvas, records: &[DonutRecord]) -> ChartResult<()> {
        let theme = tk.theme();
        let (iw, ih) = (tk.inner_width(), tk.inner_height());
        let outer = iw.min(ih) / 2.0;
        let inner = outer * INNER_RATIO;
        let mid = (inner + outer) / 2.0;
        let center = Point::new(iw / 2.0, ih / 2.0);
        let tip_anchor = Point::new(center.x, center.y - outer);

        let techs: IndexSet<&str> = records.iter().map(|r| r.tech.as_str()).collect();
        let color_of = |tech: &str| tk.category_color(techs.get_index_of(tech).unwrap_or(0));

        let values: Vec<f64> = records.iter().map(|r| r.value).collect();
        let slices = pie(&values);
        let label_style = TextStyle::new(tk.label_font_size(), theme.value_label).anchor(TextAnchor::Middle);

        for (r, s) in records.iter().zip(&slices) {
            let m = canvas.push_mark(
                Shape::Path {
                    cmds: annulus_path(center, inner, outer, s),
                    fill: Some(color_of(&r.tech)),
                    stroke: Some(Stroke::new(theme.slice_stroke, 1.0)),
                },
                1.0,
            );
            canvas.bind_hover(
                m,
                HitRegion::Annulus { center, inner, outer, start: s.start, end: s.end },
                format!("{}\n{} of total", r.tech, fmt_percent(s.share, 1)),
                tip_anchor,
                HoverEffect { radius: None, opacity: Some(HOVER_OPACITY) },
            );
            if s.share >= LABEL_MIN_SHARE {
                let at = polar(center, mid, (s.start + s.end) / 2.0);
                canvas.push_label(Shape::text(at, format!("{} {}", r.tech, fmt_percent(s.share, 0)), label_style));
            }
        }

        // legend rows under the ring, one entry per record
        let origin = tk.geometry().inner_origin();
        let legend = Point::new(origin.x, origin.y + ih - 8.0);
        let col_w = iw / LEGEND_COLUMNS as f32;
        let text_style = TextStyle::new(tk.label_font_size(), theme.value_label);
        for (i, r) in records.iter().enumerate() {
            let p = legend.offset((i % LEGEND_COLUMNS) as f32 * col_w, (i / LEGEND_COLUMNS) as f32 * LEGEND_ROW);
            canvas.push_label(Shape::Rect {
                rect: RectF::from_ltwh(p.x, p.y - 10.0, LEGEND_SWATCH, LEGEND_SWATCH),
                fill: Some(color_of(&r.tech)),
                stroke: None,
                corner_radius: 0.0,
            });
            canvas.push_label(Shape::text(p.offset(18.0, 0.0), r.tech.clone(), text_style));
        }

        tk.add_axis_labels(canvas, &AxisTitles::new("Technology mix (by mean energy)", ""));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble_table;
    use approx::assert_relative_eq;

    fn table(rows: &str) -> RawTable {
        RawTable::from_csv_str("donut.csv", &format!("Screen_Tech,Mean(Labelled energy consumption (kWh/year))\n{rows}"))
            .unwrap()
    }

    fn label_texts(model: &crate::model::RenderModel) -> Vec<String> {
        model
            .labels
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn pie_keeps_input_order_and_covers_circle() {
        let s = pie(&[30.0, 70.0]);
        assert_relative_eq!(s[0].start, 0.0);
        assert_relative_eq!(s[0].share, 0.3);
        assert_relative_eq!(s[1].end, TAU, epsilon = 1e-5);
        assert_relative_eq!(s[0].end, s[1].start);
    }

    #[test]
    fn shares_label_both_large_slices() {
        let out = assemble_table(&ChartToolkit::default(), &DonutChart::new().unwrap(), &table("A,30\nB,70\n")).unwrap();
        let labels = label_texts(&out.model);
        assert!(labels.contains(&"A 30%".to_string()));
        assert!(labels.contains(&"B 70%".to_string()));
        assert_eq!(out.model.interactive[0].tooltip, "A\n30.0% of total");
        assert_eq!(out.model.interactive[1].tooltip, "B\n70.0% of total");
    }

    #[test]
    fn tiny_slice_is_not_labelled() {
        let out = assemble_table(&ChartToolkit::default(), &DonutChart::new().unwrap(), &table("A,3\nB,97\n")).unwrap();
        let labels = label_texts(&out.model);
        assert!(!labels.iter().any(|l| l.starts_with("A ")));
        // legend still names it
        assert!(labels.contains(&"A".to_string()));
        assert_eq!(out.model.marks.len(), 2);
    }

    #[test]
    fn zero_total_is_empty() {
        let out = assemble_table(&ChartToolkit::default(), &DonutChart::new().unwrap(), &table("A,0\nB,0\n")).unwrap();
        assert!(out.is_empty());
        assert!(out.model.marks.is_empty());
    }

    #[test]
    fn tooltip_anchors_at_ring_top() {
        let out = assemble_table(&ChartToolkit::default(), &DonutChart::new().unwrap(), &table("A,1\n")).unwrap();
        assert_eq!(out.model.interactive[0].anchor, Point::new(354.0, 356.0 - 354.0));
    }
}
