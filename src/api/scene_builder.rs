use tracing::{debug, warn};

use crate::core::{FilterState, Record, VisibilitySet, apply_filters};
use crate::error::ChartResult;
use crate::render::{Color, TextHAlign, TextPrimitive};

use super::axis_scene_builder::{build_group_axis, build_value_axis};
use super::bar_scene_builder::build_bar_groups;
use super::legend_scene_builder::build_legend;
use super::{ChartEngineConfig, ChartScales, ChartScene};

/// Scene for an empty filtered set: nothing drawn except an optional message.
#[must_use]
pub fn empty_scene(config: &ChartEngineConfig) -> ChartScene {
    let layout = config.layout;
    let mut scene = ChartScene::cleared(layout.viewport);
    scene.placeholder = config
        .empty_state_message
        .as_deref()
        .filter(|message| !message.is_empty())
        .map(|message| {
            TextPrimitive::new(
                message,
                f64::from(layout.viewport.width) * 0.5,
                f64::from(layout.viewport.height) * 0.5,
                config.legend.font_size_px,
                Color::BLACK,
                TextHAlign::Center,
            )
        });
    scene
}

/// Rebuilds the whole scene from already-derived scales.
///
/// Nothing from a previous scene is reused.
pub fn compose_scene(
    records: &[&Record],
    scales: &ChartScales,
    visibility: VisibilitySet,
    config: &ChartEngineConfig,
) -> ChartResult<ChartScene> {
    if records.is_empty() {
        return Ok(empty_scene(config));
    }

    let groups = build_bar_groups(records, scales, visibility, config)?;
    let scene = ChartScene {
        viewport: config.layout.viewport,
        plot_origin: config.layout.plot_origin(),
        x_axis: Some(build_group_axis(scales, config)),
        y_axis: Some(build_value_axis(scales, config)),
        groups,
        legend: Some(build_legend(scales.color, visibility, config)),
        placeholder: None,
    };
    debug!(
        groups = scene.groups.len(),
        bars = scene.bar_count(),
        ticks = scene.tick_count(),
        "composed chart scene"
    );
    Ok(scene)
}

/// Full pipeline: filter, build scales, compose.
pub fn try_render_scene(
    records: &[Record],
    filters: &FilterState,
    visibility: VisibilitySet,
    config: &ChartEngineConfig,
) -> ChartResult<ChartScene> {
    let filtered = apply_filters(records, filters);
    if filtered.is_empty() {
        return Ok(empty_scene(config));
    }
    let scales = ChartScales::build(&filtered, config)?;
    compose_scene(&filtered, &scales, visibility, config)
}

/// Like [`try_render_scene`] but any failure degrades to an empty scene.
#[must_use]
pub fn render_scene(
    records: &[Record],
    filters: &FilterState,
    visibility: VisibilitySet,
    config: &ChartEngineConfig,
) -> ChartScene {
    try_render_scene(records, filters, visibility, config).unwrap_or_else(|err| {
        warn!(error = %err, "render pass failed; drawing nothing");
        empty_scene(config)
    })
}
