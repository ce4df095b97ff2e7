// File: crates/chart-core/src/toolkit.rs
// Summary: ChartToolkit: immutable shared settings plus canvas, scale, axis, gridline and tooltip factories.
// Notes:
// - Constructed once and shared by `&` across chart tasks; it holds no interior mutability.

use crate::axis::{AxisModel, AxisTitles, Edge, TickFormat};
use crate::error::ChartResult;
use crate::geometry::{Geometry, Point};
use crate::grid::Gridlines;
use crate::model::{Canvas, Shape, TextStyle};
use crate::scale::{BandScale, DomainPolicy, LinearScale, DEFAULT_TICKS};
use crate::theme::{Rgba, Theme};
use crate::tooltip::{TooltipConfig, TooltipOverlay};
use crate::types::Insets;

/// How an in-canvas message is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    /// Bold, error color: missing rows or columns.
    Error,
    /// Small, muted: data present but nothing plottable.
    Muted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self { Self { text: text.into(), tone: NoticeTone::Error } }
    pub fn muted(text: impl Into<String>) -> Self { Self { text: text.into(), tone: NoticeTone::Muted } }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartToolkit {
    geometry: Geometry,
    theme: Theme,
    tooltip: TooltipConfig,
    title_font_size: f32,
    label_font_size: f32,
    message_font_size: f32,
}

impl Default for ChartToolkit {
    fn default() -> Self {
        Self::new(Geometry::default(), Theme::default())
    }
}

impl ChartToolkit {
    pub fn new(geometry: Geometry, theme: Theme) -> Self {
        Self {
            geometry,
            theme,
            tooltip: TooltipConfig::default(),
            title_font_size: 15.0,
            label_font_size: 12.0,
            message_font_size: 14.0,
        }
    }

    /// Toolkit for a custom surface size; fails when margins leave no plot area.
    pub fn with_size(width: u32, height: u32, insets: Insets, theme: Theme) -> ChartResult<Self> {
        Ok(Self::new(Geometry::new(width, height, insets)?, theme))
    }

    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn geometry(&self) -> &Geometry { &self.geometry }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn tooltip_config(&self) -> &TooltipConfig { &self.tooltip }
    pub fn title_font_size(&self) -> f32 { self.title_font_size }
    pub fn label_font_size(&self) -> f32 { self.label_font_size }
    pub fn inner_width(&self) -> f32 { self.geometry.inner_width() }
    pub fn inner_height(&self) -> f32 { self.geometry.inner_height() }

    /// Fresh canvas: root viewbox of the full size, inner group at the margins.
    pub fn create_canvas(&self, mount: &str) -> Canvas {
        Canvas::new(
            mount,
            self.geometry.width(),
            self.geometry.height(),
            self.geometry.inner_origin(),
            &self.theme,
        )
    }

    /// Hidden tooltip for one chart.
    pub fn create_tooltip(&self) -> TooltipOverlay {
        TooltipOverlay::new(self.tooltip)
    }

    /// Horizontal linear scale over the inner width.
    pub fn linear_x<I: IntoIterator<Item = f64>>(&self, values: I, policy: DomainPolicy) -> Option<LinearScale> {
        LinearScale::from_values(values, policy, (0.0, self.inner_width()))
    }

    /// Vertical linear scale; larger values sit higher.
    pub fn linear_y<I: IntoIterator<Item = f64>>(&self, values: I, policy: DomainPolicy) -> Option<LinearScale> {
        LinearScale::from_values(values, policy, (self.inner_height(), 0.0))
    }

    pub fn band_x<I, S>(&self, labels: I, padding: f32) -> BandScale
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BandScale::new(labels, (0.0, self.inner_width()), padding)
    }

    pub fn bottom_axis(&self, x: &LinearScale, count: usize, format: TickFormat) -> AxisModel {
        AxisModel::linear(Edge::Bottom, x, count, format).at(self.inner_height())
    }

    pub fn bottom_band_axis(&self, x: &BandScale) -> AxisModel {
        AxisModel::band(Edge::Bottom, x, (0.0, self.inner_width())).at(self.inner_height())
    }

    pub fn left_axis(&self, y: &LinearScale, count: usize) -> AxisModel {
        AxisModel::linear(Edge::Left, y, count, TickFormat::Auto)
    }

    /// Default left axis with d3's tick count.
    pub fn default_left_axis(&self, y: &LinearScale) -> AxisModel {
        self.left_axis(y, DEFAULT_TICKS)
    }

    pub fn draw_axis(&self, canvas: &mut Canvas, axis: &AxisModel) {
        for s in axis.shapes(&self.theme) {
            canvas.push_axis(s);
        }
    }

    /// Gridlines at both axes' ticks, in the layer under the marks.
    pub fn draw_gridlines(&self, canvas: &mut Canvas, x: &AxisModel, y: &AxisModel) {
        let grid = Gridlines::from_axes(x, y, self.inner_width(), self.inner_height());
        for s in grid.shapes(&self.theme) {
            canvas.push_grid(s);
        }
    }

    pub fn add_axis_labels(&self, canvas: &mut Canvas, titles: &AxisTitles) {
        for s in titles.shapes(self) {
            canvas.annotate(s);
        }
    }

    /// Message just inside the plot's top-left corner.
    pub fn message(&self, canvas: &mut Canvas, notice: &Notice) {
        let o = self.geometry.inner_origin();
        let style = match notice.tone {
            NoticeTone::Error => TextStyle::new(self.message_font_size, self.theme.error_text).bold(),
            NoticeTone::Muted => TextStyle::new(self.label_font_size, self.theme.muted_text),
        };
        canvas.annotate(Shape::text(Point::new(o.x + 8.0, o.y + 16.0), notice.text.clone(), style));
    }

    /// Category color by first-seen index.
    pub fn category_color(&self, index: usize) -> Rgba {
        self.theme.category(index)
    }
}
