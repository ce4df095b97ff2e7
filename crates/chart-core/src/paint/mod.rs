// File: crates/chart-core/src/paint/mod.rs
// Summary: Painters turning a RenderModel into SVG text or Skia raster output.

pub mod raster;
pub mod svg;

use std::f32::consts::PI;

use crate::geometry::Point;
use crate::hover::HoverController;
use crate::model::{polar, HoverEffect, RenderModel};
use crate::tooltip::TooltipOverlay;

pub use raster::{render_to_png, render_to_png_bytes, render_to_rgba8, RasterPainter, RenderOptions};
pub use svg::to_svg;

/// Live hover state layered over a static model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interaction<'a> {
    pub hovered: Option<(usize, HoverEffect)>,
    pub tooltip: Option<&'a TooltipOverlay>,
}

impl<'a> Interaction<'a> {
    pub fn none() -> Self { Self::default() }

    pub fn from_controller(hover: &'a HoverController) -> Self {
        Self {
            hovered: hover.hovered().map(|b| (b.mark, b.effect)),
            tooltip: Some(hover.tooltip()),
        }
    }

    pub(crate) fn effect_for(&self, mark: usize) -> Option<HoverEffect> {
        self.hovered.filter(|(m, _)| *m == mark).map(|(_, e)| e)
    }
}

/// Uniform fit of the model's viewbox into an output surface, centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Viewport {
    pub fn fit(model: &RenderModel, out_w: u32, out_h: u32) -> Self {
        let sx = out_w as f32 / model.width as f32;
        let sy = out_h as f32 / model.height as f32;
        let scale = sx.min(sy);
        Self {
            scale,
            dx: (out_w as f32 - model.width as f32 * scale) / 2.0,
            dy: (out_h as f32 - model.height as f32 * scale) / 2.0,
        }
    }

    /// Output pixel -> model root coordinates.
    pub fn to_model(&self, px: f32, py: f32) -> Point {
        Point::new((px - self.dx) / self.scale, (py - self.dy) / self.scale)
    }
}

/// Points along a pie-convention arc, excluding the start point.
pub(crate) fn flatten_arc(center: Point, radius: f32, start: f32, end: f32) -> Vec<Point> {
    let sweep = end - start;
    let steps = ((sweep.abs() / (PI / 90.0)).ceil() as usize).max(1);
    (1..=steps)
        .map(|i| polar(center, radius, start + sweep * i as f32 / steps as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::ChartToolkit;

    #[test]
    fn viewport_preserves_aspect_ratio() {
        let model = ChartToolkit::default().create_canvas("m").finish();
        let v = Viewport::fit(&model, 1600, 1000);
        assert_eq!(v.scale, 1.25);
        assert_eq!(v.dx, 300.0);
        assert_eq!(v.dy, 0.0);
        assert_eq!(v.to_model(300.0, 0.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn arc_ends_on_target_angle() {
        let pts = flatten_arc(Point::new(0.0, 0.0), 10.0, 0.0, PI);
        let last = pts[pts.len() - 1];
        assert!(last.x.abs() < 1e-3 && (last.y - 10.0).abs() < 1e-3);
        // reversed sweeps walk back
        let back = flatten_arc(Point::new(0.0, 0.0), 10.0, PI, 0.0);
        let end = back[back.len() - 1];
        assert!((end.y + 10.0).abs() < 1e-3);
    }
}
