// File: crates/window-demo/src/main.rs
// Summary: Windowed viewer that paints chart-core models via RGBA blit (CPU) using winit + softbuffer.
// Notes:
// - Pointer position maps back through the viewport fit into inner chart coordinates for hover hits.
// - Any key cycles to the next chart.

use std::num::NonZeroU32;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use chart_core::{
    ChartKind, ChartToolkit, HoverController, Interaction, Point, RasterPainter, RenderOptions, RenderedChart, Viewport,
};
use tracing::{debug, error, info};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

struct Slot {
    chart: RenderedChart,
    hover: HoverController,
}

fn main() -> Result<()> {
    let _ = chart_core::telemetry::init_default_tracing("info");

    // Args: [chart] [data_dir]
    let mut args = std::env::args().skip(1);
    let first: ChartKind = args.next().as_deref().unwrap_or("line").parse()?;
    let data_dir = args.next().unwrap_or_else(|| "data".to_string());

    let toolkit = ChartToolkit::default();
    let start = ChartKind::ALL.iter().position(|k| *k == first).unwrap_or(0);
    let mut slots = Vec::new();
    for kind in ChartKind::ALL.iter().cycle().skip(start).take(ChartKind::ALL.len()) {
        match kind.render(&toolkit, &kind.source_in(&data_dir)) {
            Ok(chart) => {
                let hover = chart.hover_controller(&toolkit);
                slots.push(Slot { chart, hover });
            }
            Err(e) => error!(chart = %kind, error = %e, "skipping chart"),
        }
    }
    if slots.is_empty() {
        bail!("no chart could be loaded from '{data_dir}'");
    }

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title(&slots[0]))
        .with_inner_size(winit::dpi::LogicalSize::new(900.0, 900.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let painter = RasterPainter::new();
    let mut idx = 0usize;
    let mut size = window.inner_size();
    let mut last_tick = Instant::now();
    info!(charts = slots.len(), "viewer ready");

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let slot = &mut slots[idx];
                    let viewport = Viewport::fit(&slot.chart.model, size.width.max(1), size.height.max(1));
                    let root = viewport.to_model(position.x as f32, position.y as f32);
                    let o = slot.chart.model.inner_origin;
                    if slot.hover.pointer_move(Point::new(root.x - o.x, root.y - o.y)) {
                        last_tick = Instant::now();
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    slots[idx].hover.pointer_exit();
                    last_tick = Instant::now();
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                    slots[idx].hover.pointer_exit();
                    idx = (idx + 1) % slots.len();
                    window.set_title(&title(&slots[idx]));
                    debug!(chart = slots[idx].chart.mount(), "switched chart");
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                if slots[idx].hover.advance(now - last_tick) {
                    window.request_redraw();
                    *cf = ControlFlow::Poll;
                }
                last_tick = now;
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = draw(&mut surface, &painter, &slots[idx], size.width, size.height) {
                    error!(error = %e, "frame failed");
                }
            }
            _ => {}
        }
    });
}

fn title(slot: &Slot) -> String {
    format!("Energy charts: {}", slot.chart.mount())
}

fn draw(
    surface: &mut softbuffer::Surface,
    painter: &RasterPainter,
    slot: &Slot,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize: {e}"))?;

    let opts = RenderOptions { size: Some((width, height)), ..RenderOptions::default() };
    let (rgba, _, _, _) = painter.rgba8(&slot.chart.model, &opts, &Interaction::from_controller(&slot.hover))?;

    // softbuffer wants 0RGB per pixel
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
