// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; CSV cleaning, scales, chart assembly, and SVG/Skia painters.

pub mod types;
pub mod error;
pub mod geometry;
pub mod coerce;
pub mod source;
pub mod columns;
pub mod transform;
pub mod scale;
pub mod format;
pub mod theme;
pub mod model;
pub mod tooltip;
pub mod hover;
pub mod axis;
pub mod grid;
pub mod text;
pub mod toolkit;
pub mod assembly;
pub mod charts;
pub mod paint;
pub mod telemetry;

pub use assembly::{assemble, assemble_table, ChartSpec, ChartState, RenderedChart};
pub use charts::{BarChart, ChartKind, DonutChart, LineChart, ScatterChart, UnknownChart};
pub use error::{ChartError, ChartResult};
pub use geometry::{Geometry, Point, RectF};
pub use hover::{HoverController, MarkState};
pub use model::{Canvas, RenderModel};
pub use paint::{render_to_png, render_to_png_bytes, render_to_rgba8, to_svg, Interaction, RasterPainter, RenderOptions, Viewport};
pub use scale::{BandScale, DomainPolicy, LinearScale};
pub use source::{DataSource, RawTable};
pub use theme::{Rgba, Theme};
pub use toolkit::{ChartToolkit, Notice, NoticeTone};
pub use tooltip::{TooltipConfig, TooltipOverlay};
pub use types::Insets;
