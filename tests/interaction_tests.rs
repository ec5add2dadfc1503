use approx::assert_relative_eq;
use dashboard_chart::api::{BarKey, ChartEngine, ChartEngineConfig, ChartEvent, TooltipBehavior};
use dashboard_chart::core::{Record, RecordField, Series};
use dashboard_chart::render::NullRenderer;

fn records() -> Vec<Record> {
    vec![
        Record::new("aa11", 4.0, 2.0, 6.0)
            .with_field(RecordField::Country, "Brazil")
            .with_field(RecordField::Region, "South America"),
        Record::new("bb22", 8.0, 1.0, 3.0).with_field(RecordField::Country, "Kenya"),
    ]
}

fn settled_engine(config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .handle_event(ChartEvent::RecordsLoaded(records()))
        .expect("records loaded");
    engine
        .handle_event(ChartEvent::Tick { delta_ms: 800.0 })
        .expect("entrance settled");
    engine
}

fn center_of(engine: &ChartEngine<NullRenderer>, group: usize, series: Series) -> (f64, f64) {
    let rect = engine
        .scene()
        .bar(BarKey { group, series })
        .expect("bar exists")
        .rect;
    (rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
}

fn hover(engine: &mut ChartEngine<NullRenderer>, (x, y): (f64, f64)) {
    engine
        .handle_event(ChartEvent::PointerMove {
            x,
            y,
            page_x: x + 100.0,
            page_y: y + 50.0,
        })
        .expect("pointer move");
}

#[test]
fn legend_toggle_twice_restores_opacity() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    let before: Vec<f64> = engine.scene().bars().map(|bar| bar.rect.opacity).collect();

    for _ in 0..2 {
        engine
            .handle_event(ChartEvent::LegendClick {
                series: Series::Likelihood,
            })
            .expect("legend click");
    }

    let after: Vec<f64> = engine.scene().bars().map(|bar| bar.rect.opacity).collect();
    assert_eq!(before, after);
    assert!(engine.visibility().is_visible(Series::Likelihood));
}

#[test]
fn toggle_only_changes_one_series() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    engine
        .handle_event(ChartEvent::LegendClick {
            series: Series::Relevance,
        })
        .expect("legend click");

    let visibility = engine.visibility();
    assert!(visibility.is_visible(Series::Intensity));
    assert!(visibility.is_visible(Series::Likelihood));
    assert!(!visibility.is_visible(Series::Relevance));
}

#[test]
fn hover_tooltip_fades_in_and_tracks_second_record_fields() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    let point = center_of(&engine, 1, Series::Intensity);
    hover(&mut engine, point);

    assert_eq!(
        engine.hovered_bar(),
        Some(BarKey {
            group: 1,
            series: Series::Intensity
        })
    );
    let content = engine.tooltip().content().expect("content").clone();
    assert_eq!(content.lines()[0], "intensity: 8");
    assert_eq!(content.lines()[1], "Country: Kenya");
    // region is absent on this record
    assert_eq!(content.lines()[2], "Region: ");

    assert_eq!(engine.tooltip().opacity(), 0.0);
    engine.advance(100.0).expect("tick");
    let halfway = engine.tooltip().opacity();
    assert!(halfway > 0.0 && halfway < 0.9);
    engine.advance(100.0).expect("tick");
    assert_relative_eq!(engine.tooltip().opacity(), 0.9);

    let presented = engine
        .renderer()
        .last_tooltip_opacity
        .expect("tooltip presented");
    assert_relative_eq!(presented, 0.9);
}

#[test]
fn hidden_bars_still_show_tooltips() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    engine.toggle_series(Series::Relevance).expect("toggle");
    engine.advance(800.0).expect("settle");

    let point = center_of(&engine, 0, Series::Relevance);
    hover(&mut engine, point);
    let content = engine.tooltip().content().expect("content");
    assert_eq!(content.series, Series::Relevance);
}

#[test]
fn moving_off_bars_fades_out_over_configured_duration() {
    let config = ChartEngineConfig::default().with_tooltip(TooltipBehavior {
        fade_out_ms: 100.0,
        ..TooltipBehavior::default()
    });
    let mut engine = settled_engine(config);
    let point = center_of(&engine, 0, Series::Likelihood);
    hover(&mut engine, point);
    engine.advance(200.0).expect("fade in");

    // margin area, no bar there
    hover(&mut engine, (5.0, 5.0));
    assert_eq!(engine.hovered_bar(), None);
    assert!(engine.tooltip().content().is_some());

    engine.advance(100.0).expect("fade out");
    assert!(engine.tooltip().content().is_none());
    assert_eq!(engine.renderer().last_tooltip_opacity, None);
}

#[test]
fn filter_input_event_updates_one_key_and_refilters() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    engine
        .handle_event(ChartEvent::FilterInput {
            name: "country".to_owned(),
            value: "Ken".to_owned(),
        })
        .expect("filter input");

    assert_eq!(engine.filters().active().count(), 1);
    let ids: Vec<&str> = engine.filtered_records().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["bb22"]);
    assert_eq!(engine.scene().groups.len(), 1);
}

#[test]
fn unknown_filter_input_is_rejected_without_state_change() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    let passes = engine.render_passes();
    let result = engine.handle_event(ChartEvent::FilterInput {
        name: "galaxy".to_owned(),
        value: "x".to_owned(),
    });
    assert!(result.is_err());
    assert_eq!(engine.render_passes(), passes);
    assert_eq!(engine.filtered_len(), 2);
}

#[test]
fn rerender_resets_hover_and_restarts_entrance() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    let point = center_of(&engine, 0, Series::Intensity);
    hover(&mut engine, point);
    assert!(engine.hovered_bar().is_some());

    engine.toggle_series(Series::Likelihood).expect("toggle");
    assert_eq!(engine.hovered_bar(), None);
    assert!(engine.tooltip().content().is_none());
    assert_eq!(engine.interaction().clock_ms(), 0.0);

    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    let floor = 500.0;
    // at t=0 every bar sits flat on the floor
    for rect in frame.rects.iter().take(engine.scene().bar_count()) {
        assert_eq!(rect.height, 0.0);
        assert_relative_eq!(rect.y, floor);
    }
}

#[test]
fn fetch_failed_event_clears_chart() {
    let mut engine = settled_engine(ChartEngineConfig::default());
    engine
        .handle_event(ChartEvent::FetchFailed("502 bad gateway".to_owned()))
        .expect("fetch failure handled");
    assert!(engine.records().is_empty());
    assert!(engine.scene().is_cleared());
    assert_eq!(engine.renderer().last_rect_count, 0);
}
