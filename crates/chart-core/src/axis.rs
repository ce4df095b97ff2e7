// File: crates/chart-core/src/axis.rs
// Summary: Axis models (domain line, 6px ticks, labels) for bottom/left edges plus axis titles.

use crate::format::{fmt_fixed, fmt_grouped, fmt_plain_int, precision_for_step};
use crate::geometry::Point;
use crate::model::{Baseline, Shape, Stroke, TextAnchor, TextStyle};
use crate::scale::{BandScale, LinearScale};
use crate::theme::Theme;
use crate::toolkit::ChartToolkit;

pub const TICK_SIZE: f32 = 6.0;
/// Distance from the domain line to the tick label.
pub const TICK_PADDING: f32 = 3.0;
pub const TICK_FONT_SIZE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis, inner coordinates.
    pub pos: f32,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickFormat {
    /// Decimals from the tick step, with thousands separators.
    #[default]
    Auto,
    /// Plain rounded integers without grouping (years).
    Integer,
    Fixed(usize),
}

impl TickFormat {
    fn apply(self, v: f64, step: f64) -> String {
        match self {
            TickFormat::Auto => fmt_grouped(v, precision_for_step(step)),
            TickFormat::Integer => fmt_plain_int(v),
            TickFormat::Fixed(n) => fmt_fixed(v, n),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisModel {
    edge: Edge,
    /// Translation of the axis group across its edge: y for bottom axes, x for left axes.
    offset: f32,
    range: (f32, f32),
    ticks: Vec<Tick>,
}

impl AxisModel {
    pub fn linear(edge: Edge, scale: &LinearScale, count: usize, format: TickFormat) -> Self {
        let (d0, d1) = scale.domain();
        let step = scale.tick_step(count);
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick { pos: scale.to_px(v), label: format.apply(v, step) })
            .collect();
        tracing::trace!(?edge, d0, d1, step, "linear axis");
        Self { edge, offset: 0.0, range: scale.range(), ticks }
    }

    /// Ticks at band centers, labelled with the category name.
    pub fn band(edge: Edge, scale: &BandScale, range: (f32, f32)) -> Self {
        let ticks = scale
            .labels()
            .filter_map(|l| scale.center(l).map(|pos| Tick { pos, label: l.to_string() }))
            .collect();
        Self { edge, offset: 0.0, range, ticks }
    }

    /// Move the axis group, e.g. a bottom axis to the inner height.
    pub fn at(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn edge(&self) -> Edge { self.edge }
    pub fn offset(&self) -> f32 { self.offset }
    pub fn ticks(&self) -> &[Tick] { &self.ticks }

    pub fn tick_positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.ticks.iter().map(|t| t.pos)
    }

    /// Domain line, tick marks and tick labels in inner coordinates.
    pub fn shapes(&self, theme: &Theme) -> Vec<Shape> {
        let stroke = Stroke::new(theme.axis_line, 1.0);
        let (r0, r1) = self.range;
        let o = self.offset;
        let mut out = Vec::with_capacity(1 + self.ticks.len() * 2);
        match self.edge {
            Edge::Bottom => {
                out.push(Shape::Line { from: Point::new(r0, o), to: Point::new(r1, o), stroke });
                let style = TextStyle::new(TICK_FONT_SIZE, theme.tick_label)
                    .anchor(TextAnchor::Middle)
                    .baseline(Baseline::Hanging);
                for t in &self.ticks {
                    out.push(Shape::Line { from: Point::new(t.pos, o), to: Point::new(t.pos, o + TICK_SIZE), stroke });
                    out.push(Shape::text(Point::new(t.pos, o + TICK_SIZE + TICK_PADDING), t.label.clone(), style));
                }
            }
            Edge::Left => {
                out.push(Shape::Line { from: Point::new(o, r0), to: Point::new(o, r1), stroke });
                let style = TextStyle::new(TICK_FONT_SIZE, theme.tick_label)
                    .anchor(TextAnchor::End)
                    .baseline(Baseline::Middle);
                for t in &self.ticks {
                    out.push(Shape::Line { from: Point::new(o - TICK_SIZE, t.pos), to: Point::new(o, t.pos), stroke });
                    out.push(Shape::text(Point::new(o - TICK_SIZE - TICK_PADDING, t.pos), t.label.clone(), style));
                }
            }
        }
        out
    }
}

/// Axis titles placed on the full surface, outside the plot area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
}

impl AxisTitles {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Root-coordinate shapes; an empty title is skipped.
    pub fn shapes(&self, toolkit: &ChartToolkit) -> Vec<Shape> {
        let g = toolkit.geometry();
        let theme = toolkit.theme();
        let style = TextStyle::new(toolkit.title_font_size(), theme.axis_label);
        let insets = g.insets();
        let mut out = Vec::new();
        if !self.x.is_empty() {
            let cx = insets.left as f32 + g.inner_width() / 2.0;
            out.push(Shape::text(Point::new(cx, g.height() as f32), self.x.clone(), style.anchor(TextAnchor::Middle)));
        }
        if !self.y.is_empty() {
            // baseline sits a font-height in from the edge, text reads bottom to top
            let cy = insets.top as f32 + g.inner_height() / 1.5;
            out.push(Shape::Text {
                pos: Point::new(toolkit.title_font_size() + 3.0, cy),
                text: self.y.clone(),
                style: style.anchor(TextAnchor::Start),
                rotate: -90.0,
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::DomainPolicy;

    #[test]
    fn linear_ticks_follow_scale() {
        let y = LinearScale::from_values([12.0, 45.0, 7.0], DomainPolicy::zero_anchored(), (712.0, 0.0)).unwrap();
        let axis = AxisModel::linear(Edge::Left, &y, 10, TickFormat::Auto);
        let labels: Vec<_> = axis.ticks().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"0"));
        assert_eq!(labels.last(), Some(&"45"));
        assert_eq!(axis.ticks()[0].pos, 712.0);
    }

    #[test]
    fn year_axis_uses_plain_integers() {
        let x = LinearScale::new((2015.0, 2020.0), (0.0, 708.0));
        let axis = AxisModel::linear(Edge::Bottom, &x, 10, TickFormat::Integer);
        assert!(axis.ticks().iter().any(|t| t.label == "2018"));
        assert!(axis.ticks().iter().all(|t| !t.label.contains(',')));
    }

    #[test]
    fn auto_format_groups_thousands() {
        let y = LinearScale::new((0.0, 1500.0), (712.0, 0.0));
        let axis = AxisModel::linear(Edge::Left, &y, 10, TickFormat::Auto);
        assert!(axis.ticks().iter().any(|t| t.label == "1,000"));
    }

    #[test]
    fn band_axis_ticks_at_centers() {
        let b = BandScale::new(["a", "b", "c"], (0.0, 330.0), 0.3);
        let axis = AxisModel::band(Edge::Bottom, &b, (0.0, 330.0)).at(712.0);
        let pos: Vec<_> = axis.tick_positions().collect();
        assert_eq!(pos.len(), 3);
        assert!((pos[0] - 65.0).abs() < 1e-3);
        // domain line + (tick + label) per category
        assert_eq!(axis.shapes(&Theme::light()).len(), 7);
    }

    #[test]
    fn titles_sit_on_root_surface() {
        let tk = ChartToolkit::default();
        let shapes = AxisTitles::new("Year", "Price").shapes(&tk);
        match &shapes[0] {
            Shape::Text { pos, .. } => assert_eq!(*pos, Point::new(64.0 + 354.0, 800.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(shapes[1], Shape::Text { rotate, .. } if rotate == -90.0));
        assert_eq!(AxisTitles::new("Only x", "").shapes(&tk).len(), 1);
    }
}
