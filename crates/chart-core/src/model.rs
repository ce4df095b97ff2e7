// File: crates/chart-core/src/model.rs
// Summary: RenderModel (positioned shapes per layer + hover bindings) and the Canvas that builds it.
// Notes:
// - Building a model never touches a rendering surface; painters in `paint` consume it.
// - Layer order is fixed: grid, axes, marks, labels, then root-level annotations and the tooltip.

use crate::geometry::{Point, RectF};
use crate::theme::{Rgba, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
    /// Top of the glyphs sits on `pos.y` (labels under an axis).
    Hanging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgba,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgba) -> Self {
        Self { size, color, anchor: TextAnchor::Start, baseline: Baseline::Alphabetic, bold: false }
    }
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f32) -> Self { Self { color, width } }
}

/// Path commands. Angles follow the pie convention: radians, 0 at 12 o'clock, clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    /// Circular arc around `center`; the current point must already sit at `start`.
    Arc { center: Point, radius: f32, start: f32, end: f32 },
    Close,
}

/// Point on a circle for a pie angle.
pub fn polar(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line { from: Point, to: Point, stroke: Stroke },
    Rect { rect: RectF, fill: Option<Rgba>, stroke: Option<Stroke>, corner_radius: f32 },
    Circle { center: Point, radius: f32, fill: Rgba },
    Path { cmds: Vec<PathCmd>, fill: Option<Rgba>, stroke: Option<Stroke> },
    /// `rotate` is in degrees around `pos`. Lines are separated by `\n`.
    Text { pos: Point, text: String, style: TextStyle, rotate: f32 },
}

impl Shape {
    pub fn text(pos: Point, text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text { pos, text: text.into(), style, rotate: 0.0 }
    }
}

/// Data mark plus the opacity it is drawn with when idle.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub opacity: f32,
}

/// Visual change applied to a hovered mark.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverEffect {
    pub radius: Option<f32>,
    pub opacity: Option<f32>,
}

/// Region that counts as "over the mark", in inner coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitRegion {
    Rect(RectF),
    Circle { center: Point, radius: f32 },
    Annulus { center: Point, inner: f32, outer: f32, start: f32, end: f32 },
}

impl HitRegion {
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            HitRegion::Rect(r) => r.contains(p),
            HitRegion::Circle { center, radius } => center.distance(p) <= radius,
            HitRegion::Annulus { center, inner, outer, start, end } => {
                let d = center.distance(p);
                if d < inner || d > outer {
                    return false;
                }
                let mut a = (p.x - center.x).atan2(center.y - p.y);
                if a < 0.0 {
                    a += std::f32::consts::TAU;
                }
                a >= start && a < end
            }
        }
    }
}

/// Hover binding for one mark: tooltip text and anchor are computed up front from the record.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractiveMark {
    pub mark: usize,
    pub hit: HitRegion,
    pub tooltip: String,
    pub anchor: Point,
    pub effect: HoverEffect,
}

/// Everything a painter needs for one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderModel {
    pub mount: String,
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_text: Rgba,
    /// Translation of the inner group (the margins).
    pub inner_origin: Point,
    pub grid: Vec<Shape>,
    pub axes: Vec<Shape>,
    pub marks: Vec<Mark>,
    pub labels: Vec<Shape>,
    /// Root-surface coordinates: axis titles, summary boxes, empty-state messages.
    pub annotations: Vec<Shape>,
    pub interactive: Vec<InteractiveMark>,
}

impl RenderModel {
    /// Text of every root-level text annotation, in draw order.
    pub fn annotation_texts(&self) -> Vec<&str> {
        self.annotations
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Topmost interactive mark under `p` (inner coordinates).
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.interactive.iter().rposition(|m| m.hit.contains(p))
    }
}

/// Drawing surface for one chart: a fixed viewbox root plus an inner group offset by the margins.
/// Shapes pushed through the inner-layer methods use the inner group's local origin.
#[derive(Debug)]
pub struct Canvas {
    model: RenderModel,
}

impl Canvas {
    pub(crate) fn new(mount: &str, width: u32, height: u32, inner_origin: Point, theme: &Theme) -> Self {
        Self {
            model: RenderModel {
                mount: mount.to_string(),
                width,
                height,
                background: theme.background,
                tooltip_fill: theme.tooltip_fill,
                tooltip_text: theme.tooltip_text,
                inner_origin,
                grid: Vec::new(),
                axes: Vec::new(),
                marks: Vec::new(),
                labels: Vec::new(),
                annotations: Vec::new(),
                interactive: Vec::new(),
            },
        }
    }

    pub fn mount(&self) -> &str { &self.model.mount }
    pub fn view_box(&self) -> (u32, u32) { (self.model.width, self.model.height) }
    pub fn inner_origin(&self) -> Point { self.model.inner_origin }

    pub fn push_grid(&mut self, shape: Shape) { self.model.grid.push(shape); }

    pub fn push_axis(&mut self, shape: Shape) { self.model.axes.push(shape); }

    /// Adds a data mark and returns its index for hover binding.
    pub fn push_mark(&mut self, shape: Shape, opacity: f32) -> usize {
        self.model.marks.push(Mark { shape, opacity });
        self.model.marks.len() - 1
    }

    pub fn push_label(&mut self, shape: Shape) { self.model.labels.push(shape); }

    /// Root-surface shape; not clipped by or offset into the plot area.
    pub fn annotate(&mut self, shape: Shape) { self.model.annotations.push(shape); }

    pub fn bind_hover(&mut self, mark: usize, hit: HitRegion, tooltip: impl Into<String>, anchor: Point, effect: HoverEffect) {
        self.model.interactive.push(InteractiveMark { mark, hit, tooltip: tooltip.into(), anchor, effect });
    }

    pub fn finish(self) -> RenderModel { self.model }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn annulus_hit_uses_clockwise_angles_from_top() {
        let hit = HitRegion::Annulus { center: Point::new(0.0, 0.0), inner: 5.0, outer: 10.0, start: 0.0, end: PI / 2.0 };
        // 12 o'clock to 3 o'clock quadrant
        assert!(hit.contains(Point::new(5.0, -5.0)));
        assert!(!hit.contains(Point::new(-5.0, -5.0)));
        assert!(!hit.contains(Point::new(1.0, -1.0)));
    }

    #[test]
    fn polar_zero_is_straight_up() {
        let p = polar(Point::new(10.0, 10.0), 5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5 && (p.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut c = Canvas::new("t", 100, 100, Point::new(0.0, 0.0), &Theme::light());
        let a = c.push_mark(Shape::Circle { center: Point::new(10.0, 10.0), radius: 3.0, fill: Rgba::rgb(0, 0, 0) }, 1.0);
        let b = c.push_mark(Shape::Circle { center: Point::new(12.0, 10.0), radius: 3.0, fill: Rgba::rgb(0, 0, 0) }, 1.0);
        c.bind_hover(a, HitRegion::Circle { center: Point::new(10.0, 10.0), radius: 5.0 }, "a", Point::new(10.0, 10.0), HoverEffect::default());
        c.bind_hover(b, HitRegion::Circle { center: Point::new(12.0, 10.0), radius: 5.0 }, "b", Point::new(12.0, 10.0), HoverEffect::default());
        let m = c.finish();
        assert_eq!(m.hit_test(Point::new(11.0, 10.0)), Some(1));
        assert_eq!(m.hit_test(Point::new(50.0, 50.0)), None);
    }
}
