// File: crates/chart-core/src/theme.rs
// Summary: Renderer-neutral colors and the light/dark chart themes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a } }

    /// Same color with alpha scaled by `opacity` (0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// `#rrggbb`; alpha is emitted separately as an SVG opacity attribute.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f32 { self.a as f32 / 255.0 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub primary: Rgba,
    pub line_stroke: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick_label: Rgba,
    /// Horizontal gridlines (at y ticks).
    pub grid_y: Rgba,
    /// Vertical gridlines (at x ticks).
    pub grid_x: Rgba,
    pub value_label: Rgba,
    pub error_text: Rgba,
    pub muted_text: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_text: Rgba,
    pub summary_fill: Rgba,
    pub summary_stroke: Rgba,
    pub summary_text: Rgba,
    pub slice_stroke: Rgba,
    /// Ordinal palette for categories, cycled in first-seen order.
    pub categories: [Rgba; 8],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(0xff, 0xff, 0xff),
            primary: Rgba::rgb(0x2d, 0x72, 0xbc),
            line_stroke: Rgba::rgb(0xe0, 0x55, 0x9e),
            axis_line: Rgba::rgb(0x00, 0x00, 0x00),
            axis_label: Rgba::rgb(0x1e, 0x1f, 0x22),
            tick_label: Rgba::rgb(0x00, 0x00, 0x00),
            grid_y: Rgba::rgb(0xb2, 0xbd, 0xd1),
            grid_x: Rgba::rgb(0xf1, 0xf5, 0xf9),
            value_label: Rgba::rgb(0x37, 0x41, 0x51),
            error_text: Rgba::rgb(0xb9, 0x1c, 0x1c),
            muted_text: Rgba::rgb(0x6b, 0x72, 0x80),
            tooltip_fill: Rgba::argb(235, 0x11, 0x18, 0x27),
            tooltip_text: Rgba::rgb(0xff, 0xff, 0xff),
            summary_fill: Rgba::rgb(0xf0, 0xf9, 0xff),
            summary_stroke: Rgba::rgb(0x38, 0xbd, 0xf8),
            summary_text: Rgba::rgb(0x0f, 0x17, 0x2a),
            slice_stroke: Rgba::rgb(0xff, 0xff, 0xff),
            categories: [
                Rgba::rgb(0x2d, 0x72, 0xbc),
                Rgba::rgb(0x22, 0xa0, 0x6b),
                Rgba::rgb(0xf5, 0x9e, 0x0b),
                Rgba::rgb(0xef, 0x44, 0x44),
                Rgba::rgb(0x8b, 0x5c, 0xf6),
                Rgba::rgb(0x14, 0xb8, 0xa6),
                Rgba::rgb(0xec, 0x48, 0x99),
                Rgba::rgb(0x10, 0xb9, 0x81),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            tick_label: Rgba::rgb(150, 150, 160),
            grid_y: Rgba::rgb(60, 60, 68),
            grid_x: Rgba::rgb(40, 40, 45),
            value_label: Rgba::rgb(210, 210, 220),
            muted_text: Rgba::rgb(150, 150, 160),
            tooltip_fill: Rgba::argb(235, 240, 240, 245),
            tooltip_text: Rgba::rgb(18, 18, 20),
            summary_fill: Rgba::rgb(0x0c, 0x2a, 0x3d),
            summary_text: Rgba::rgb(0xe0, 0xf2, 0xfe),
            slice_stroke: Rgba::rgb(18, 18, 20),
            ..Self::light()
        }
    }

    /// Color for the category at first-seen position `index`.
    pub fn category(&self, index: usize) -> Rgba {
        self.categories[index % self.categories.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_opacity() {
        assert_eq!(Rgba::rgb(0x2d, 0x72, 0xbc).to_hex(), "#2d72bc");
        assert_eq!(Rgba::rgb(0, 0, 0).with_opacity(0.5).a, 128);
    }

    #[test]
    fn palette_cycles() {
        let t = Theme::light();
        assert_eq!(t.category(0), t.category(8));
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("nope").name, "light");
    }
}
