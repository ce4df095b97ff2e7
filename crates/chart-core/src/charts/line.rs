// File: crates/chart-core/src/charts/line.rs
// Summary: Spot price over time: per-row mean across regions, monotone curve, dots, average box.

use crate::assembly::ChartSpec;
use crate::axis::{AxisTitles, TickFormat};
use crate::coerce::{coerce, mean};
use crate::columns::ColumnSpec;
use crate::error::{ChartError, ChartResult};
use crate::format::fmt1d;
use crate::geometry::{Point, RectF};
use crate::model::{Canvas, HitRegion, HoverEffect, PathCmd, Shape, Stroke, TextStyle};
use crate::scale::{DomainPolicy, DEFAULT_TICKS};
use crate::source::RawTable;
use crate::text::estimate_width;
use crate::toolkit::{ChartToolkit, Notice};

pub(crate) const MOUNT: &str = "line";
pub(crate) const DEFAULT_FILE: &str = "Ex5_ARE_Spot_Prices.csv";

const HEADROOM: f64 = 1.1;
const LINE_WIDTH: f32 = 3.0;
const DOT_RADIUS: f32 = 3.0;
const DOT_HOVER_RADIUS: f32 = 5.0;
const DOT_HIT_RADIUS: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearlyPrice {
    pub year: f64,
    pub price: f64,
}

/// Monotone cubic interpolation in x (no overshoot between points).
pub fn monotone_x(points: &[Point]) -> Vec<PathCmd> {
    let p: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    let mut cmds = Vec::with_capacity(p.len() + 1);
    let Some(&(x0, y0)) = p.first() else { return cmds };
    cmds.push(PathCmd::MoveTo(Point::new(x0 as f32, y0 as f32)));
    match p.len() {
        1 => return cmds,
        2 => {
            cmds.push(PathCmd::LineTo(Point::new(p[1].0 as f32, p[1].1 as f32)));
            return cmds;
        }
        _ => {}
    }

    // interior tangents from the neighbouring secants, end tangents from one-sided estimates
    let n = p.len();
    let mut t = vec![0.0f64; n];
    for i in 1..n - 1 {
        t[i] = slope3(p[i - 1], p[i], p[i + 1]);
    }
    t[0] = slope2(p[0], p[1], t[1]);
    t[n - 1] = slope2(p[n - 2], p[n - 1], t[n - 2]);

    for i in 1..n {
        let (xa, ya) = p[i - 1];
        let (xb, yb) = p[i];
        let dx = (xb - xa) / 3.0;
        cmds.push(PathCmd::CubicTo(
            Point::new((xa + dx) as f32, (ya + dx * t[i - 1]) as f32),
            Point::new((xb - dx) as f32, (yb - dx * t[i]) as f32),
            Point::new(xb as f32, yb as f32),
        ));
    }
    cmds
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Zero steps divide by a signed zero so the secant becomes +/-inf like the neighbour's direction.
fn signed_step(h: f64, other: f64) -> f64 {
    if h != 0.0 { h } else if other < 0.0 { -0.0 } else { 0.0 }
}

fn slope3((x0, y0): (f64, f64), (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
    let h0 = x1 - x0;
    let h1 = x2 - x1;
    let s0 = (y1 - y0) / signed_step(h0, h1);
    let s1 = (y2 - y1) / signed_step(h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_nan() { 0.0 } else { t }
}

fn slope2((x0, y0): (f64, f64), (x1, y1): (f64, f64), t: f64) -> f64 {
    let h = x1 - x0;
    if h != 0.0 { (3.0 * (y1 - y0) / h - t) / 2.0 } else { t }
}

#[derive(Clone, Debug)]
pub struct LineChart {
    year: ColumnSpec,
}

impl LineChart {
    pub fn new() -> ChartResult<Self> {
        Ok(Self { year: ColumnSpec::aliases(Vec::<String>::new()).with_pattern("year")? })
    }
}

impl ChartSpec for LineChart {
    type Record = YearlyPrice;

    fn mount(&self) -> &str { MOUNT }

    /// One point per row: the year cell parsed strictly, the price as the mean of every
    /// other coercible cell. Sorted by year.
    fn prepare(&self, table: &RawTable) -> ChartResult<Vec<YearlyPrice>> {
        let Some(year_col) = self.year.resolve_header(table.headers()).resolved() else {
            return Err(ChartError::NoValidRows {
                source_name: table.source_name().to_string(),
                detail: "No 'Year' column found in CSV.".into(),
            });
        };
        let year_key = year_col.primary();

        let mut out: Vec<YearlyPrice> = table
            .rows()
            .filter_map(|row| {
                let year = row.get(year_key)?.trim().parse::<f64>().ok().filter(|y| y.is_finite())?;
                let price = mean(row.cells().filter(|(k, _)| *k != year_key).filter_map(|(_, v)| coerce(Some(v))))?;
                Some(YearlyPrice { year, price })
            })
            .collect();
        out.sort_by(|a, b| a.year.total_cmp(&b.year));
        Ok(out)
    }

    fn empty_notice(&self) -> Notice {
        Notice::muted("All rows were empty/invalid for price values; nothing to plot.")
    }

    fn build(&self, tk: &ChartToolkit, canvas: &mut Canvas, records: &[YearlyPrice]) -> ChartResult<()> {
        let no_values = || ChartError::Render("line chart has no finite values".into());
        let x = tk.linear_x(records.iter().map(|r| r.year), DomainPolicy::extent()).ok_or_else(no_values)?;
        let y = tk
            .linear_y(records.iter().map(|r| r.price), DomainPolicy::zero_anchored().with_headroom(HEADROOM))
            .ok_or_else(no_values)?;

        let x_axis = tk.bottom_axis(&x, DEFAULT_TICKS, TickFormat::Integer);
        let y_axis = tk.default_left_axis(&y);
        tk.draw_gridlines(canvas, &x_axis, &y_axis);
        tk.draw_axis(canvas, &x_axis);
        tk.draw_axis(canvas, &y_axis);
        tk.add_axis_labels(canvas, &AxisTitles::new("Year", "Electricity spot price ($/MWh)"));

        let theme = tk.theme();
        let pts: Vec<Point> = records.iter().map(|r| Point::new(x.to_px(r.year), y.to_px(r.price))).collect();
        canvas.push_mark(
            Shape::Path { cmds: monotone_x(&pts), fill: None, stroke: Some(Stroke::new(theme.line_stroke, LINE_WIDTH)) },
            1.0,
        );
        for (r, &center) in records.iter().zip(&pts) {
            let m = canvas.push_mark(Shape::Circle { center, radius: DOT_RADIUS, fill: theme.line_stroke }, 1.0);
            canvas.bind_hover(
                m,
                HitRegion::Circle { center, radius: DOT_HIT_RADIUS },
                format!("{}: ${} /MWh", r.year, fmt1d(r.price)),
                center,
                HoverEffect { radius: Some(DOT_HOVER_RADIUS), opacity: None },
            );
        }

        if let Some(avg) = mean(records.iter().map(|r| r.price)) {
            average_box(tk, canvas, avg);
        }
        Ok(())
    }
}

/// Rounded summary box just inside the plot's top-left corner, sized to its text.
fn average_box(tk: &ChartToolkit, canvas: &mut Canvas, avg: f64) {
    const PAD_X: f32 = 10.0;
    const PAD_Y: f32 = 8.0;
    let theme = tk.theme();
    let size = tk.label_font_size();
    let text = format!("Average across years: ${} /MWh", fmt1d(avg));
    let origin = tk.geometry().inner_origin().offset(8.0, 8.0);
    let text_h = size * 1.2;
    canvas.annotate(Shape::Rect {
        rect: RectF::from_ltwh(
            origin.x,
            origin.y,
            estimate_width(&text, size, true) + PAD_X * 2.0,
            text_h + PAD_Y * 2.0 + 6.0,
        ),
        fill: Some(theme.summary_fill),
        stroke: Some(Stroke::new(theme.summary_stroke, 1.0)),
        corner_radius: 8.0,
    });
    canvas.annotate(Shape::text(
        origin.offset(PAD_X, PAD_Y + 10.0),
        text,
        TextStyle::new(size, theme.summary_text).bold(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble_table;
    use approx::assert_relative_eq;

    fn chart() -> LineChart {
        LineChart::new().unwrap()
    }

    #[test]
    fn averages_valid_cells_per_row() {
        let t = RawTable::from_csv_str("p.csv", "Year,NSW,VIC,QLD\n2020,$40/MWh,$50/MWh,invalid\n").unwrap();
        let recs = chart().prepare(&t).unwrap();
        assert_eq!(recs.len(), 1);
        assert_relative_eq!(recs[0].price, 45.0);
        assert_eq!(recs[0].year, 2020.0);
    }

    #[test]
    fn sorts_by_year_and_drops_empty_rows() {
        let t = RawTable::from_csv_str("p.csv", "Financial year,A\n2021,10\n2019,5\n2020,\nabc,7\n").unwrap();
        let years: Vec<_> = chart().prepare(&t).unwrap().iter().map(|r| r.year).collect();
        assert_eq!(years, [2019.0, 2021.0]);
    }

    #[test]
    fn missing_year_column_is_reported() {
        let t = RawTable::from_csv_str("p.csv", "Date,A\n1,2\n").unwrap();
        let out = assemble_table(&ChartToolkit::default(), &chart(), &t).unwrap();
        assert_eq!(out.model.annotation_texts(), ["No 'Year' column found in CSV."]);
    }

    #[test]
    fn all_invalid_prices_show_muted_notice() {
        let t = RawTable::from_csv_str("p.csv", "Year,A\n2020,n/a\n").unwrap();
        let out = assemble_table(&ChartToolkit::default(), &chart(), &t).unwrap();
        assert!(out.is_empty());
        assert_eq!(
            out.model.annotation_texts(),
            ["All rows were empty/invalid for price values; nothing to plot."]
        );
    }

    #[test]
    fn renders_line_dots_and_average() {
        let t = RawTable::from_csv_str("p.csv", "Year,A,B\n2019,40,50\n2020,60,60\n2021,80,90\n").unwrap();
        let out = assemble_table(&ChartToolkit::default(), &chart(), &t).unwrap();
        // path + 3 dots
        assert_eq!(out.model.marks.len(), 4);
        assert_eq!(out.model.interactive.len(), 3);
        assert_eq!(out.model.interactive[0].tooltip, "2019: $45.0 /MWh");
        assert!(out.model.annotation_texts().contains(&"Average across years: $63.3 /MWh"));
        assert!(!out.model.grid.is_empty());
    }

    #[test]
    fn monotone_curve_passes_through_points() {
        let pts = [Point::new(0.0, 10.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0), Point::new(30.0, 5.0)];
        let cmds = monotone_x(&pts);
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds[0], PathCmd::MoveTo(pts[0]));
        for (cmd, p) in cmds[1..].iter().zip(&pts[1..]) {
            match cmd {
                PathCmd::CubicTo(c1, c2, end) => {
                    assert_eq!(end, p);
                    // flat segment stays flat: no overshoot below 0
                    assert!(c1.y >= -1e-4 && c2.y >= -1e-4);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn short_series_degrade_to_lines() {
        assert!(monotone_x(&[]).is_empty());
        assert_eq!(monotone_x(&[Point::new(1.0, 1.0)]).len(), 1);
        assert!(matches!(monotone_x(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])[1], PathCmd::LineTo(_)));
    }
}
