// File: crates/chart-core/src/paint/svg.rs
// Summary: SVG document writer: responsive viewBox, inner group at the margins, one <g> per layer.

use std::f32::consts::{PI, TAU};

use crate::geometry::Point;
use crate::model::{polar, Baseline, HoverEffect, Mark, PathCmd, RenderModel, Shape, TextAnchor, TextStyle};
use crate::paint::Interaction;
use crate::theme::Rgba;
use crate::tooltip::TooltipOverlay;

/// Static document with no hover state.
pub fn to_svg(model: &RenderModel) -> String {
    to_svg_with(model, &Interaction::none())
}

/// Document reflecting the hovered mark and the tooltip's current opacity.
pub fn to_svg_with(model: &RenderModel, interaction: &Interaction<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" role="img" id="{}" font-family="sans-serif">"#,
        model.width,
        model.height,
        escape_xml(&model.mount)
    ));
    out.push('\n');
    out.push_str(&format!(r#"<rect width="100%" height="100%"{}/>"#, fill_attr(model.background)));
    out.push('\n');

    let o = model.inner_origin;
    out.push_str(&format!(r#"<g transform="translate({},{})">"#, num(o.x), num(o.y)));
    out.push('\n');
    write_layer(&mut out, "grid", &model.grid);
    write_layer(&mut out, "axis", &model.axes);

    out.push_str("<g class=\"marks\">\n");
    for (i, mark) in model.marks.iter().enumerate() {
        let tooltip = model.interactive.iter().find(|b| b.mark == i).map(|b| b.tooltip.as_str());
        write_mark(&mut out, mark, interaction.effect_for(i), tooltip);
    }
    out.push_str("</g>\n");

    write_layer(&mut out, "labels", &model.labels);
    out.push_str("</g>\n");

    write_layer(&mut out, "annotations", &model.annotations);

    if let Some(t) = interaction.tooltip {
        write_tooltip(&mut out, model, t);
    }
    out.push_str("</svg>\n");
    out
}

fn write_layer(out: &mut String, class: &str, shapes: &[Shape]) {
    if shapes.is_empty() {
        return;
    }
    out.push_str(&format!("<g class=\"{class}\">\n"));
    for s in shapes {
        write_shape(out, s, "");
    }
    out.push_str("</g>\n");
}

fn write_mark(out: &mut String, mark: &Mark, effect: Option<HoverEffect>, tooltip: Option<&str>) {
    let opacity = effect.and_then(|e| e.opacity).unwrap_or(mark.opacity);
    let mut extra = String::new();
    if opacity < 1.0 {
        extra.push_str(&format!(r#" opacity="{}""#, num(opacity)));
    }
    if let Some(t) = tooltip {
        extra.push_str(&format!(r#" data-tooltip="{}""#, escape_xml(t)));
    }
    match (&mark.shape, effect.and_then(|e| e.radius)) {
        (Shape::Circle { center, fill, .. }, Some(r)) => {
            write_shape(out, &Shape::Circle { center: *center, radius: r, fill: *fill }, &extra)
        }
        (shape, _) => write_shape(out, shape, &extra),
    }
}

fn write_shape(out: &mut String, shape: &Shape, extra: &str) {
    match shape {
        Shape::Line { from, to, stroke } => out.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}{}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            stroke_attr(stroke.color, stroke.width),
            extra
        )),
        Shape::Rect { rect, fill, stroke, corner_radius } => {
            let mut attrs = fill.map_or_else(|| r#" fill="none""#.to_string(), fill_attr);
            if let Some(s) = stroke {
                attrs.push_str(&stroke_attr(s.color, s.width));
            }
            if *corner_radius > 0.0 {
                attrs.push_str(&format!(r#" rx="{0}" ry="{0}""#, num(*corner_radius)));
            }
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                num(rect.left),
                num(rect.top),
                num(rect.width()),
                num(rect.height()),
                attrs,
                extra
            ));
        }
        Shape::Circle { center, radius, fill } => out.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            fill_attr(*fill),
            extra
        )),
        Shape::Path { cmds, fill, stroke } => {
            let mut attrs = fill.map_or_else(|| r#" fill="none""#.to_string(), fill_attr);
            if let Some(s) = stroke {
                attrs.push_str(&stroke_attr(s.color, s.width));
            }
            out.push_str(&format!(r#"<path d="{}"{}{}/>"#, path_data(cmds), attrs, extra));
        }
        Shape::Text { pos, text, style, rotate } => {
            let mut attrs = text_attrs(style);
            if *rotate != 0.0 {
                attrs.push_str(&format!(r#" transform="rotate({} {} {})""#, num(*rotate), num(pos.x), num(pos.y)));
            }
            out.push_str(&format!(
                r#"<text x="{}" y="{}"{}{}>{}</text>"#,
                num(pos.x),
                num(pos.y),
                attrs,
                extra,
                text_body(text, pos.x, style.size)
            ));
        }
    }
    out.push('\n');
}

fn write_tooltip(out: &mut String, model: &RenderModel, t: &TooltipOverlay) {
    let cfg = t.config();
    let o = model.inner_origin.offset(t.origin().x, t.origin().y);
    out.push_str(&format!(
        r#"<g class="tooltip" transform="translate({},{})" opacity="{}">"#,
        num(o.x),
        num(o.y),
        num(t.opacity())
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<rect width="{}" height="{}" rx="{2}" ry="{2}"{3}/>"#,
        num(cfg.width),
        num(cfg.height),
        num(cfg.corner_radius),
        fill_attr(model.tooltip_fill)
    ));
    out.push('\n');
    let lines: Vec<&str> = t.lines().collect();
    let lh = cfg.font_size * 1.2;
    let first = cfg.height / 2.0 + 1.0 - (lines.len().saturating_sub(1)) as f32 * lh / 2.0;
    let style = TextStyle::new(cfg.font_size, model.tooltip_text)
        .anchor(TextAnchor::Middle)
        .baseline(Baseline::Middle)
        .bold();
    write_shape(out, &Shape::text(Point::new(cfg.width / 2.0, first), t.text(), style), "");
    out.push_str("</g>\n");
}

/// Multi-line text becomes one <tspan> per line.
fn text_body(text: &str, x: f32, size: f32) -> String {
    if !text.contains('\n') {
        return escape_xml(text);
    }
    text.lines()
        .enumerate()
        .map(|(i, l)| {
            let dy = if i == 0 { "0".to_string() } else { num(size * 1.2) };
            format!(r#"<tspan x="{}" dy="{}">{}</tspan>"#, num(x), dy, escape_xml(l))
        })
        .collect()
}

fn text_attrs(style: &TextStyle) -> String {
    let mut s = format!(r#" font-size="{}"{}"#, num(style.size), fill_attr(style.color));
    match style.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => s.push_str(r#" text-anchor="middle""#),
        TextAnchor::End => s.push_str(r#" text-anchor="end""#),
    }
    match style.baseline {
        Baseline::Alphabetic => {}
        Baseline::Middle => s.push_str(r#" dominant-baseline="middle""#),
        Baseline::Hanging => s.push_str(r#" dominant-baseline="hanging""#),
    }
    if style.bold {
        s.push_str(r#" font-weight="700""#);
    }
    s
}

fn path_data(cmds: &[PathCmd]) -> String {
    let mut d = String::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(p) => d.push_str(&format!("M{},{}", num(p.x), num(p.y))),
            PathCmd::LineTo(p) => d.push_str(&format!("L{},{}", num(p.x), num(p.y))),
            PathCmd::CubicTo(c1, c2, p) => d.push_str(&format!(
                "C{},{},{},{},{},{}",
                num(c1.x),
                num(c1.y),
                num(c2.x),
                num(c2.y),
                num(p.x),
                num(p.y)
            )),
            PathCmd::Arc { center, radius, start, end } => {
                // a full turn cannot be one arc command: split at the midpoint
                if (end - start).abs() >= TAU - 1e-4 {
                    let mid = (start + end) / 2.0;
                    arc_segment(&mut d, center, radius, start, mid);
                    arc_segment(&mut d, center, radius, mid, end);
                } else {
                    arc_segment(&mut d, center, radius, start, end);
                }
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

fn arc_segment(d: &mut String, center: Point, radius: f32, start: f32, end: f32) {
    let p = polar(center, radius, end);
    let large = u8::from((end - start).abs() > PI);
    let sweep = u8::from(end > start);
    d.push_str(&format!("A{0},{0},0,{1},{2},{3},{4}", num(radius), large, sweep, num(p.x), num(p.y)));
}

fn fill_attr(c: Rgba) -> String {
    if c.a == 255 {
        format!(r#" fill="{}""#, c.to_hex())
    } else {
        format!(r#" fill="{}" fill-opacity="{}""#, c.to_hex(), num(c.opacity()))
    }
}

fn stroke_attr(c: Rgba, width: f32) -> String {
    let mut s = format!(r#" stroke="{}" stroke-width="{}""#, c.to_hex(), num(width));
    if c.a != 255 {
        s.push_str(&format!(r#" stroke-opacity="{}""#, num(c.opacity())));
    }
    s
}

/// Up to two decimals, trailing zeros trimmed.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
