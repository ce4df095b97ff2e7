// File: crates/chart-core/src/text.rs
// Summary: Text shaping with Skia textlayout for the raster painter, plus a surface-free width estimate.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::model::{Baseline, TextAnchor};

/// Average glyph advance as a fraction of the font size.
const AVG_ADVANCE: f32 = 0.56;
const AVG_ADVANCE_BOLD: f32 = 0.6;

/// Width estimate used while building models (no font access). Widest line wins.
pub fn estimate_width(text: &str, size: f32, bold: bool) -> f32 {
    let k = if bold { AVG_ADVANCE_BOLD } else { AVG_ADVANCE };
    text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * size * k
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        let p = self.layout(text, size, skia::Color::TRANSPARENT, bold);
        // width of the longest line
        p.longest_line()
    }

    /// Draw a single line anchored at `(x, y)` per `anchor`/`baseline`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        bold: bool,
        anchor: TextAnchor,
        baseline: Baseline,
    ) {
        let mut p = self.layout(text, size, color, bold);
        let w = p.longest_line();
        let left = match anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - w / 2.0,
            TextAnchor::End => x - w,
        };
        // Paragraph draws from its top-left corner
        let top = match baseline {
            Baseline::Alphabetic => y - p.alphabetic_baseline(),
            Baseline::Middle => y - p.height() / 2.0,
            Baseline::Hanging => y,
        };
        p.paint(canvas, (left, top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_uses_longest_line() {
        let one = estimate_width("abcd", 10.0, false);
        assert!((one - 22.4).abs() < 1e-4);
        assert_eq!(estimate_width("ab\nabcd", 10.0, false), one);
        assert!(estimate_width("abcd", 10.0, true) > one);
        assert_eq!(estimate_width("", 12.0, false), 0.0);
    }
}
