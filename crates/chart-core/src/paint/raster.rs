// File: crates/chart-core/src/paint/raster.rs
// Summary: Skia CPU raster painter: RenderModel -> PNG bytes/file or an RGBA8 buffer.

use anyhow::{anyhow, bail, Result};
use skia_safe as skia;

use crate::error::{ChartError, ChartResult};
use crate::geometry::Point;
use crate::model::{Baseline, Mark, PathCmd, RenderModel, Shape, TextAnchor};
use crate::paint::{flatten_arc, Interaction, Viewport};
use crate::text::TextShaper;
use crate::theme::Rgba;
use crate::tooltip::TooltipOverlay;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Pixels per viewbox unit when no explicit size is given.
    pub scale: f32,
    /// Explicit output size; the model is fitted inside preserving aspect ratio.
    pub size: Option<(u32, u32)>,
    /// Overrides the model's background.
    pub background: Option<Rgba>,
    /// Skip text (keeps pixel tests independent of installed fonts).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 1.0, size: None, background: None, draw_labels: true }
    }
}

impl RenderOptions {
    pub fn scaled(scale: f32) -> Self {
        Self { scale, ..Self::default() }
    }

    pub fn output_size(&self, model: &RenderModel) -> (u32, u32) {
        self.size.unwrap_or_else(|| {
            let s = self.scale.max(0.01);
            (
                ((model.width as f32 * s).round() as u32).max(1),
                ((model.height as f32 * s).round() as u32).max(1),
            )
        })
    }
}

fn color(c: Rgba, opacity: f32) -> skia::Color {
    let c = c.with_opacity(opacity);
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn fill_paint(c: Rgba, opacity: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color(c, opacity));
    p
}

fn stroke_paint(c: Rgba, width: f32, opacity: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color(c, opacity));
    p
}

fn to_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(p) => {
                path.move_to((p.x, p.y));
            }
            PathCmd::LineTo(p) => {
                path.line_to((p.x, p.y));
            }
            PathCmd::CubicTo(c1, c2, p) => {
                path.cubic_to((c1.x, c1.y), (c2.x, c2.y), (p.x, p.y));
            }
            PathCmd::Arc { center, radius, start, end } => {
                for p in flatten_arc(center, radius, start, end) {
                    path.line_to((p.x, p.y));
                }
            }
            PathCmd::Close => {
                path.close();
            }
        }
    }
    path
}

/// Paints models onto Skia canvases. Holds the font collection so repeated frames reuse it.
pub struct RasterPainter {
    shaper: TextShaper,
}

impl Default for RasterPainter {
    fn default() -> Self { Self::new() }
}

impl RasterPainter {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    /// Draw the whole model: layers in order, then the tooltip above everything.
    pub fn paint(
        &self,
        canvas: &skia::Canvas,
        model: &RenderModel,
        interaction: &Interaction<'_>,
        viewport: Viewport,
        opts: &RenderOptions,
    ) {
        canvas.clear(color(opts.background.unwrap_or(model.background), 1.0));
        canvas.save();
        canvas.translate((viewport.dx, viewport.dy));
        canvas.scale((viewport.scale, viewport.scale));

        canvas.save();
        canvas.translate((model.inner_origin.x, model.inner_origin.y));
        for s in model.grid.iter().chain(&model.axes) {
            self.shape(canvas, s, 1.0, opts);
        }
        for (i, mark) in model.marks.iter().enumerate() {
            self.mark(canvas, mark, interaction, i, opts);
        }
        for s in &model.labels {
            self.shape(canvas, s, 1.0, opts);
        }
        canvas.restore();

        for s in &model.annotations {
            self.shape(canvas, s, 1.0, opts);
        }

        if let Some(t) = interaction.tooltip {
            canvas.save();
            canvas.translate((model.inner_origin.x, model.inner_origin.y));
            self.tooltip(canvas, model, t, opts);
            canvas.restore();
        }
        canvas.restore();
    }

    fn mark(&self, canvas: &skia::Canvas, mark: &Mark, interaction: &Interaction<'_>, index: usize, opts: &RenderOptions) {
        let effect = interaction.effect_for(index);
        let opacity = effect.and_then(|e| e.opacity).unwrap_or(mark.opacity);
        match (&mark.shape, effect.and_then(|e| e.radius)) {
            (Shape::Circle { center, fill, .. }, Some(r)) => {
                canvas.draw_circle((center.x, center.y), r, &fill_paint(*fill, opacity));
            }
            (shape, _) => self.shape(canvas, shape, opacity, opts),
        }
    }

    fn shape(&self, canvas: &skia::Canvas, shape: &Shape, opacity: f32, opts: &RenderOptions) {
        match shape {
            Shape::Line { from, to, stroke } => {
                canvas.draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(stroke.color, stroke.width, opacity));
            }
            Shape::Rect { rect, fill, stroke, corner_radius } => {
                let r = skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom);
                let draw = |paint: &skia::Paint| {
                    if *corner_radius > 0.0 {
                        canvas.draw_round_rect(r, *corner_radius, *corner_radius, paint);
                    } else {
                        canvas.draw_rect(r, paint);
                    }
                };
                if let Some(f) = fill {
                    draw(&fill_paint(*f, opacity));
                }
                if let Some(s) = stroke {
                    draw(&stroke_paint(s.color, s.width, opacity));
                }
            }
            Shape::Circle { center, radius, fill } => {
                canvas.draw_circle((center.x, center.y), *radius, &fill_paint(*fill, opacity));
            }
            Shape::Path { cmds, fill, stroke } => {
                let path = to_path(cmds);
                if let Some(f) = fill {
                    canvas.draw_path(&path, &fill_paint(*f, opacity));
                }
                if let Some(s) = stroke {
                    canvas.draw_path(&path, &stroke_paint(s.color, s.width, opacity));
                }
            }
            Shape::Text { pos, text, style, rotate } => {
                if !opts.draw_labels {
                    return;
                }
                canvas.save();
                canvas.translate((pos.x, pos.y));
                if *rotate != 0.0 {
                    canvas.rotate(*rotate, None);
                }
                let lh = style.size * 1.2;
                for (i, line) in text.lines().enumerate() {
                    self.shaper.draw_line(
                        canvas,
                        line,
                        0.0,
                        i as f32 * lh,
                        style.size,
                        color(style.color, opacity),
                        style.bold,
                        style.anchor,
                        style.baseline,
                    );
                }
                canvas.restore();
            }
        }
    }

    fn tooltip(&self, canvas: &skia::Canvas, model: &RenderModel, t: &TooltipOverlay, opts: &RenderOptions) {
        let alpha = t.opacity();
        if alpha <= 0.0 {
            return;
        }
        let cfg = t.config();
        let b = t.bounds();
        let r = skia::Rect::from_ltrb(b.left, b.top, b.right, b.bottom);
        canvas.draw_round_rect(r, cfg.corner_radius, cfg.corner_radius, &fill_paint(model.tooltip_fill, alpha));
        if !opts.draw_labels {
            return;
        }
        let lines: Vec<&str> = t.lines().collect();
        let lh = cfg.font_size * 1.2;
        let first = b.top + cfg.height / 2.0 + 1.0 - lines.len().saturating_sub(1) as f32 * lh / 2.0;
        let center = Point::new(b.left + cfg.width / 2.0, first);
        for (i, line) in lines.iter().enumerate() {
            self.shaper.draw_line(
                canvas,
                line,
                center.x,
                center.y + i as f32 * lh,
                cfg.font_size,
                color(model.tooltip_text, alpha),
                true,
                TextAnchor::Middle,
                Baseline::Middle,
            );
        }
    }

    fn surface(
        &self,
        model: &RenderModel,
        opts: &RenderOptions,
        interaction: &Interaction<'_>,
    ) -> Result<(skia::Surface, u32, u32)> {
        let (w, h) = opts.output_size(model);
        let mut surface = skia::surfaces::raster_n32_premul((w as i32, h as i32))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        let viewport = Viewport::fit(model, w, h);
        self.paint(surface.canvas(), model, interaction, viewport, opts);
        Ok((surface, w, h))
    }

    pub fn png_bytes(&self, model: &RenderModel, opts: &RenderOptions, interaction: &Interaction<'_>) -> ChartResult<Vec<u8>> {
        let encode = || -> Result<Vec<u8>> {
            let (mut surface, _, _) = self.surface(model, opts, interaction)?;
            let image = surface.image_snapshot();
            #[allow(deprecated)]
            let data = image
                .encode_to_data(skia::EncodedImageFormat::PNG)
                .ok_or_else(|| anyhow!("encode PNG failed"))?;
            Ok(data.as_bytes().to_vec())
        };
        encode().map_err(|e| ChartError::Render(format!("{e:#}")))
    }

    /// Unpremultiplied RGBA8 pixels plus (width, height, stride).
    pub fn rgba8(
        &self,
        model: &RenderModel,
        opts: &RenderOptions,
        interaction: &Interaction<'_>,
    ) -> ChartResult<(Vec<u8>, u32, u32, usize)> {
        let read = || -> Result<(Vec<u8>, u32, u32, usize)> {
            let (mut surface, w, h) = self.surface(model, opts, interaction)?;
            let info = skia::ImageInfo::new(
                (w as i32, h as i32),
                skia::ColorType::RGBA8888,
                skia::AlphaType::Unpremul,
                None,
            );
            let stride = w as usize * 4;
            let mut px = vec![0u8; stride * h as usize];
            if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
                bail!("reading {w}x{h} pixels failed");
            }
            Ok((px, w, h, stride))
        };
        read().map_err(|e| ChartError::Render(format!("{e:#}")))
    }
}

pub fn render_to_png_bytes(model: &RenderModel, opts: &RenderOptions) -> ChartResult<Vec<u8>> {
    RasterPainter::new().png_bytes(model, opts, &Interaction::none())
}

pub fn render_to_rgba8(model: &RenderModel, opts: &RenderOptions) -> ChartResult<(Vec<u8>, u32, u32, usize)> {
    RasterPainter::new().rgba8(model, opts, &Interaction::none())
}

/// Render and write a PNG, creating parent directories.
pub fn render_to_png(model: &RenderModel, opts: &RenderOptions, path: impl AsRef<std::path::Path>) -> ChartResult<()> {
    let bytes = render_to_png_bytes(model, opts)?;
    let path = path.as_ref();
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)
    };
    write().map_err(|e| ChartError::Render(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_size_follows_scale_or_explicit_size() {
        let model = crate::toolkit::ChartToolkit::default().create_canvas("m").finish();
        assert_eq!(RenderOptions::default().output_size(&model), (800, 800));
        assert_eq!(RenderOptions::scaled(1.5).output_size(&model), (1200, 1200));
        let fixed = RenderOptions { size: Some((640, 480)), ..RenderOptions::default() };
        assert_eq!(fixed.output_size(&model), (640, 480));
    }

    #[test]
    fn path_closes_and_flattens_arcs() {
        let path = to_path(&[
            PathCmd::MoveTo(Point::new(0.0, -10.0)),
            PathCmd::Arc { center: Point::new(0.0, 0.0), radius: 10.0, start: 0.0, end: std::f32::consts::PI },
            PathCmd::Close,
        ]);
        assert!(path.count_points() > 10);
    }
}
