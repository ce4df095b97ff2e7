// File: crates/chart-core/src/charts/scatter.rs
// Summary: Star rating vs annual energy, one translucent point per product.

use crate::assembly::ChartSpec;
use crate::axis::{AxisTitles, TickFormat};
use crate::columns::ColumnSpec;
use crate::error::{ChartError, ChartResult};
use crate::format::{fmt2d, fmt_int};
use crate::geometry::Point;
use crate::model::{Canvas, HitRegion, HoverEffect, Shape};
use crate::scale::{DomainPolicy, DEFAULT_TICKS};
use crate::source::RawTable;
use crate::toolkit::{ChartToolkit, Notice};
use crate::transform::{transform_all, FieldSpec, RecordSpec};

pub(crate) const MOUNT: &str = "scatter";
pub(crate) const DEFAULT_FILE: &str = "Ex5_TV_energy.csv";

const AXIS_TICKS: usize = 8;
const POINT_RADIUS: f32 = 3.5;
const POINT_OPACITY: f32 = 0.65;
const HOVER_RADIUS: f32 = 5.0;
const HOVER_OPACITY: f32 = 0.95;
const HIT_RADIUS: f32 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductPoint {
    pub star: f64,
    pub kwh: f64,
    pub model: Option<String>,
    pub tech: Option<String>,
    pub size: Option<f64>,
}

impl ProductPoint {
    pub fn tooltip(&self) -> String {
        let mut s = format!("{}★ • {} kWh", fmt2d(self.star), fmt_int(self.kwh));
        if let Some(m) = &self.model {
            s.push('\n');
            s.push_str(m);
        }
        s
    }
}

#[derive(Clone, Debug)]
pub struct ScatterChart {
    spec: RecordSpec,
}

impl Default for ScatterChart {
    fn default() -> Self { Self::new() }
}

impl ScatterChart {
    /// Exact single-alias columns; this table's headers are machine generated.
    pub fn new() -> Self {
        let spec = RecordSpec::new()
            .field(FieldSpec::numeric("star", ColumnSpec::single("star2")))
            .field(FieldSpec::numeric("kwh", ColumnSpec::single("energy_consumpt")))
            .field(FieldSpec::text("model", ColumnSpec::single("model")).optional())
            .field(FieldSpec::text("tech", ColumnSpec::single("screen_tech")).optional())
            .field(FieldSpec::numeric("size", ColumnSpec::single("screensize")).optional());
        Self { spec }
    }
}

impl ChartSpec for ScatterChart {
    type Record = ProductPoint;

    fn mount(&self) -> &str { MOUNT }

    fn prepare(&self, table: &RawTable) -> ChartResult<Vec<ProductPoint>> {
        Ok(transform_all(table, &self.spec)
            .into_iter()
            .filter_map(|r| {
                Some(ProductPoint {
                    star: r.number("star")?,
                    kwh: r.number("kwh")?,
                    model: r.text("model").map(str::to_string),
                    tech: r.text("tech").map(str::to_string),
                    size: r.number("size"),
                })
            })
            .collect())
    }

    fn empty_notice(&self) -> Notice {
        Notice::error(format!("No valid rows (missing {}).", self.spec.required_summary()))
    }

    fn build(&self, tk: &ChartToolkit, canvas: &mut Canvas, records: &[ProductPoint]) -> ChartResult<()> {
        let no_values = || ChartError::Render("scatter chart has no finite values".into());
        let x = tk.linear_x(records.iter().map(|r| r.star), DomainPolicy::extent()).ok_or_else(no_values)?;
        let y = tk.linear_y(records.iter().map(|r| r.kwh), DomainPolicy::zero_anchored()).ok_or_else(no_values)?;

        // gridlines keep the default density, the labelled axes are sparser
        tk.draw_gridlines(
            canvas,
            &tk.bottom_axis(&x, DEFAULT_TICKS, TickFormat::Auto),
            &tk.left_axis(&y, DEFAULT_TICKS),
        );
        tk.draw_axis(canvas, &tk.bottom_axis(&x, AXIS_TICKS, TickFormat::Auto));
        tk.draw_axis(canvas, &tk.left_axis(&y, AXIS_TICKS));
        tk.add_axis_labels(canvas, &AxisTitles::new("Star rating (stars)", "Annual energy (kWh/year)"));

        let fill = tk.theme().primary;
        for r in records {
            let center = Point::new(x.to_px(r.star), y.to_px(r.kwh));
            let m = canvas.push_mark(Shape::Circle { center, radius: POINT_RADIUS, fill }, POINT_OPACITY);
            canvas.bind_hover(
                m,
                HitRegion::Circle { center, radius: HIT_RADIUS },
                r.tooltip(),
                center,
                HoverEffect { radius: Some(HOVER_RADIUS), opacity: Some(HOVER_OPACITY) },
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble_table;

    const CSV: &str = "brand,model,screensize,screen_tech,energy_consumpt,star2\n\
                       Acme,X55,55,LED,\"1,234\",3.5\n\
                       Acme,,32,LCD,150,5\n\
                       Bolt,Q1,40,OLED,,4\n";

    #[test]
    fn requires_star_and_energy() {
        let t = RawTable::from_csv_str("tv.csv", CSV).unwrap();
        let pts = ScatterChart::new().prepare(&t).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].kwh, 1234.0);
        assert_eq!(pts[0].size, Some(55.0));
        assert_eq!(pts[1].model, None);
    }

    #[test]
    fn tooltip_text_includes_model_when_present() {
        let t = RawTable::from_csv_str("tv.csv", CSV).unwrap();
        let pts = ScatterChart::new().prepare(&t).unwrap();
        assert_eq!(pts[0].tooltip(), "3.50★ • 1,234 kWh\nX55");
        assert_eq!(pts[1].tooltip(), "5.00★ • 150 kWh");
    }

    #[test]
    fn points_are_translucent_and_hoverable() {
        let t = RawTable::from_csv_str("tv.csv", CSV).unwrap();
        let out = assemble_table(&ChartToolkit::default(), &ScatterChart::new(), &t).unwrap();
        assert_eq!(out.model.marks.len(), 2);
        assert!(out.model.marks.iter().all(|m| m.opacity == POINT_OPACITY));
        assert_eq!(out.model.interactive[0].effect.opacity, Some(HOVER_OPACITY));
    }

    #[test]
    fn empty_notice_names_required_columns() {
        let t = RawTable::from_csv_str("tv.csv", "model,star2\nX,4\n").unwrap();
        let out = assemble_table(&ChartToolkit::default(), &ScatterChart::new(), &t).unwrap();
        assert_eq!(out.model.annotation_texts(), ["No valid rows (missing numeric star2 or numeric energy_consumpt)."]);
    }
}
