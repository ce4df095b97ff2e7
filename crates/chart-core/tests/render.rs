// File: crates/chart-core/tests/render.rs
// Purpose: Painter smoke tests: PNG bytes decode, RGBA buffer shape, SVG document structure.

use chart_core::paint::svg::to_svg_with;
use chart_core::{
    render_to_png, render_to_png_bytes, render_to_rgba8, to_svg, ChartKind, ChartToolkit, Interaction, RawTable,
    RenderModel, RenderOptions,
};

fn bar_model() -> RenderModel {
    let csv = "Screen_Tech,Mean(Labelled energy consumption (kWh/year))\nOLED,320\nLED,210\nQLED,250\n";
    let table = RawTable::from_csv_str("bars.csv", csv).unwrap();
    ChartKind::Bar.render_table(&ChartToolkit::default(), &table).unwrap().model
}

#[test]
fn png_bytes_decode_at_requested_scale() {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::scaled(0.5) };
    let bytes = render_to_png_bytes(&bar_model(), &opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (400, 400));
    // top-left corner is margin, so it carries the white background
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn png_file_is_written() {
    let out = std::path::PathBuf::from("target/test_out/bar55.png");
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    render_to_png(&bar_model(), &opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

#[test]
fn rgba8_buffer_has_bars() {
    let model = bar_model();
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let (px, w, h, stride) = render_to_rgba8(&model, &opts).expect("rgba render");
    assert_eq!((w, h), (800, 800));
    assert_eq!(stride, w as usize * 4);
    assert_eq!(px.len(), stride * h as usize);
    assert_eq!(px[3], 255);

    // centre of the first bar, in root coordinates
    let chart_core::model::Shape::Rect { rect, .. } = &model.marks[0].shape else {
        panic!("bar marks are rects");
    };
    let x = (model.inner_origin.x + (rect.left + rect.right) / 2.0) as usize;
    let y = (model.inner_origin.y + (rect.top + rect.bottom) / 2.0) as usize;
    let i = y * stride + x * 4;
    assert_ne!(&px[i..i + 3], &[255, 255, 255], "bar pixel should not be background");
}

#[test]
fn svg_has_viewbox_layers_and_tooltips() {
    let csv = "Year,Price\n2019,40\n2020,52\n2021,47\n";
    let table = RawTable::from_csv_str("spot.csv", csv).unwrap();
    let tk = ChartToolkit::default();
    let chart = ChartKind::Line.render_table(&tk, &table).unwrap();
    let svg = to_svg(&chart.model);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 800 800""#));
    assert!(svg.contains(r#"id="line""#));
    assert!(svg.contains(r#"<g transform="translate(64,40)">"#));
    assert!(svg.contains(r#"data-tooltip="2020: $52.0 /MWh""#));
    assert!(svg.contains("Electricity spot price ($/MWh)"));
    assert!(svg.trim_end().ends_with("</svg>"));

    let mut hover = chart.hover_controller(&tk);
    hover.pointer_move(chart.model.interactive[1].anchor);
    let live = to_svg_with(&chart.model, &Interaction::from_controller(&hover));
    assert!(live.contains(r#"class="tooltip""#));
    assert!(live.contains(r#"r="5""#));
}

#[test]
fn empty_chart_svg_shows_message_only() {
    let table = RawTable::from_csv_str("tv.csv", "star2,energy_consumpt\n").unwrap();
    let chart = ChartKind::Scatter.render_table(&ChartToolkit::default(), &table).unwrap();
    let svg = to_svg(&chart.model);
    assert!(svg.contains("No rows found in tv.csv"));
    assert!(!svg.contains("<circle"));
}
