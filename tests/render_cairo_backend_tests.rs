#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use dashboard_chart::ChartError;
use dashboard_chart::api::{ChartEngine, ChartEngineConfig, ChartEvent};
use dashboard_chart::core::{Record, RecordField, Series};
use dashboard_chart::render::CairoRenderer;

fn loaded_engine() -> ChartEngine<CairoRenderer> {
    let renderer = CairoRenderer::new(1000, 600).expect("renderer");
    let mut engine = ChartEngine::new(renderer, ChartEngineConfig::default()).expect("engine init");
    engine
        .handle_event(ChartEvent::RecordsLoaded(vec![
            Record::new("r1", 5.0, 2.0, 7.0).with_field(RecordField::Country, "USA"),
        ]))
        .expect("records loaded");
    engine
        .handle_event(ChartEvent::Tick { delta_ms: 800.0 })
        .expect("entrance settled");
    engine
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 600).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(CairoRenderer::new(1000, -1).is_err());
}

#[test]
fn cairo_renderer_draws_axes_bars_and_legend() {
    let engine = loaded_engine();
    let stats = engine.renderer().last_stats();

    // x axis: domain + 1 tick; y axis: domain + ticks 0, 0.5, .., 7
    assert_eq!(stats.lines_drawn, 18);
    // three bars plus three legend swatches
    assert_eq!(stats.rects_drawn, 6);
    // one group label, fifteen value labels, three legend labels
    assert_eq!(stats.texts_drawn, 19);
    assert!(!stats.tooltip_drawn);
}

#[test]
fn hidden_bars_are_not_painted() {
    let mut engine = loaded_engine();
    engine.toggle_series(Series::Relevance).expect("toggle");
    engine.advance(800.0).expect("settle");

    let stats = engine.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 5);
}

#[test]
fn hover_draws_tooltip_overlay() {
    let mut engine = loaded_engine();
    let rect = engine.scene().groups[0]
        .bar(Series::Intensity)
        .expect("bar")
        .rect;
    engine
        .pointer_move(
            rect.x + rect.width / 2.0,
            rect.y + rect.height / 2.0,
            200.0,
            300.0,
        )
        .expect("hover");
    engine.advance(200.0).expect("fade in");

    assert!(engine.renderer().last_stats().tooltip_drawn);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let engine = loaded_engine();
    let frame = engine.frame();
    let mut renderer = engine.into_renderer();

    let surface = ImageSurface::create(Format::ARgb32, 1000, 600).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().rects_drawn, 6);
}

#[test]
fn rendered_surface_encodes_as_png() {
    let engine = loaded_engine();
    let mut png = Vec::new();
    engine.renderer().write_png(&mut png).expect("png");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
