// File: crates/chart-core/src/grid.rs
// Summary: Gridlines behind the marks, placed at the axes' tick positions.

use crate::axis::AxisModel;
use crate::geometry::Point;
use crate::model::{Shape, Stroke};
use crate::theme::Theme;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gridlines {
    /// Y pixel positions of horizontal lines.
    pub horizontal: Vec<f32>,
    /// X pixel positions of vertical lines.
    pub vertical: Vec<f32>,
    inner_width: f32,
    inner_height: f32,
}

impl Gridlines {
    pub fn from_axes(x: &AxisModel, y: &AxisModel, inner_width: f32, inner_height: f32) -> Self {
        Self {
            horizontal: y.tick_positions().collect(),
            vertical: x.tick_positions().collect(),
            inner_width,
            inner_height,
        }
    }

    pub fn shapes(&self, theme: &Theme) -> Vec<Shape> {
        let h = Stroke::new(theme.grid_y, 1.0);
        let v = Stroke::new(theme.grid_x, 1.0);
        let horizontal = self
            .horizontal
            .iter()
            .map(|&y| Shape::Line { from: Point::new(0.0, y), to: Point::new(self.inner_width, y), stroke: h });
        let vertical = self
            .vertical
            .iter()
            .map(|&x| Shape::Line { from: Point::new(x, 0.0), to: Point::new(x, self.inner_height), stroke: v });
        horizontal.chain(vertical).collect()
    }
}
