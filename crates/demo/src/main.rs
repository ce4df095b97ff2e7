// File: crates/demo/src/main.rs
// Summary: Renders the four energy charts concurrently to SVG and PNG files.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chart_core::{render_to_png, theme, to_svg, ChartKind, ChartToolkit, Geometry, RenderOptions};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "energy-charts", version, about = "Render the appliance energy charts to SVG and PNG")]
struct Cli {
    /// Directory (or http(s) base URL) holding the chart CSVs.
    #[arg(long, value_name = "DIR", default_value = "data")]
    data_dir: String,

    /// Where `<chart>.svg` / `<chart>.png` are written.
    #[arg(long, value_name = "DIR", default_value = "target/out")]
    out_dir: PathBuf,

    /// PNG pixels per viewbox unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Chart to render (bar, donut, line, scatter); repeat for several. Default: all.
    #[arg(long = "chart", value_name = "NAME")]
    charts: Vec<ChartKind>,

    #[arg(long, value_enum, default_value = "both")]
    format: OutputFormat,

    /// Color theme (light or dark).
    #[arg(long, default_value = "light")]
    theme: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Png,
    Svg,
    Both,
}

impl OutputFormat {
    fn png(self) -> bool { matches!(self, OutputFormat::Png | OutputFormat::Both) }
    fn svg(self) -> bool { matches!(self, OutputFormat::Svg | OutputFormat::Both) }
}

fn main() -> Result<()> {
    let _ = chart_core::telemetry::init_default_tracing("info");
    let cli = Cli::parse();
    if cli.scale.is_nan() || cli.scale <= 0.0 {
        bail!("--scale must be positive (got {})", cli.scale);
    }

    let kinds = if cli.charts.is_empty() { ChartKind::ALL.to_vec() } else { cli.charts.clone() };
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create output dir '{}'", cli.out_dir.display()))?;

    // One task per chart; a failing chart never affects the others.
    let toolkit = ChartToolkit::new(Geometry::default(), theme::find(&cli.theme));
    let results: Vec<(ChartKind, Result<Vec<PathBuf>>)> = std::thread::scope(|s| {
        let handles: Vec<_> = kinds
            .iter()
            .map(|&kind| {
                let (tk, cli) = (&toolkit, &cli);
                (kind, s.spawn(move || write_chart(kind, tk, cli)))
            })
            .collect();
        handles
            .into_iter()
            .map(|(kind, h)| (kind, h.join().unwrap_or_else(|_| Err(anyhow!("render thread panicked")))))
            .collect()
    });

    let mut failed = 0usize;
    for (kind, result) in &results {
        match result {
            Ok(paths) => {
                for p in paths {
                    println!("Wrote {}", p.display());
                }
            }
            Err(e) => {
                failed += 1;
                let reason = format!("{e:#}");
                error!(chart = %kind, error = %reason, "chart not rendered");
            }
        }
    }
    info!(rendered = results.len() - failed, failed, "done");
    if failed > 0 {
        bail!("{failed} of {} charts failed", results.len());
    }
    Ok(())
}

fn write_chart(kind: ChartKind, toolkit: &ChartToolkit, cli: &Cli) -> Result<Vec<PathBuf>> {
    let source = kind.source_in(&cli.data_dir);
    let chart = kind
        .render(toolkit, &source)
        .with_context(|| format!("chart '{kind}' from {}", source.display_name()))?;

    let stem = cli.out_dir.join(chart.mount());
    let mut written = Vec::new();
    if cli.format.svg() {
        let path = stem.with_extension("svg");
        write_svg(&path, &to_svg(&chart.model))?;
        written.push(path);
    }
    if cli.format.png() {
        let path = stem.with_extension("png");
        render_to_png(&chart.model, &RenderOptions::scaled(cli.scale), &path)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg).with_context(|| format!("failed to write '{}'", path.display()))
}
