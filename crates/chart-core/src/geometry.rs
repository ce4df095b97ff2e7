// File: crates/chart-core/src/geometry.rs
// Summary: Surface geometry (outer size, margins, inner plot size) and small pixel-math helpers.

use crate::error::{ChartError, ChartResult};
use crate::types::{Insets, HEIGHT, WIDTH};

/// Point in logical surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }

    pub fn offset(self, dx: f32, dy: f32) -> Self { Self::new(self.x + dx, self.y + dy) }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Outer surface size plus margins. Inner plot width/height are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: u32,
    height: u32,
    insets: Insets,
}

impl Geometry {
    pub fn new(width: u32, height: u32, insets: Insets) -> ChartResult<Self> {
        let inner_width = width as i64 - insets.hsum() as i64;
        let inner_height = height as i64 - insets.vsum() as i64;
        if inner_width <= 0 || inner_height <= 0 {
            return Err(ChartError::InvalidGeometry { width, height, inner_width, inner_height });
        }
        Ok(Self { width, height, insets })
    }

    pub const fn width(&self) -> u32 { self.width }
    pub const fn height(&self) -> u32 { self.height }
    pub const fn insets(&self) -> Insets { self.insets }

    pub fn inner_width(&self) -> f32 { (self.width - self.insets.hsum()) as f32 }
    pub fn inner_height(&self) -> f32 { (self.height - self.insets.vsum()) as f32 }

    /// Offset of the inner group's origin inside the root surface.
    pub fn inner_origin(&self) -> Point {
        Point::new(self.insets.left as f32, self.insets.top as f32)
    }

    /// Plot area in root-surface coordinates.
    pub fn plot_rect(&self) -> RectF {
        let o = self.inner_origin();
        RectF::from_ltwh(o.x, o.y, self.inner_width(), self.inner_height())
    }

    /// Converts a root-surface point into the inner group's local coordinates.
    pub fn to_inner(&self, p: Point) -> Point {
        let o = self.inner_origin();
        Point::new(p.x - o.x, p.y - o.y)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inner_size_subtracts_margins() {
        let g = Geometry::default();
        assert_eq!(g.inner_width(), 708.0);
        assert_eq!(g.inner_height(), 712.0);
        assert_eq!(g.inner_origin(), Point::new(64.0, 40.0));
    }

    #[test]
    fn rejects_non_positive_inner_area() {
        let err = Geometry::new(90, 800, Insets::default()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidGeometry { inner_width: -2, .. }));
        assert!(Geometry::new(92, 800, Insets::default()).is_err());
    }

    #[test]
    fn to_inner_removes_margin_offset() {
        let g = Geometry::default();
        assert_eq!(g.to_inner(Point::new(64.0, 40.0)), Point::new(0.0, 0.0));
        assert!(g.plot_rect().contains(Point::new(100.0, 100.0)));
    }
}
