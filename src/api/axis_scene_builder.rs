use crate::core::format_tick;
use crate::render::{Color, LinePrimitive, TextHAlign, TextPrimitive};

use super::{AxisOrientation, AxisScene, AxisTick, ChartEngineConfig, ChartScales};

/// Baseline shift of bottom-axis labels, in ems, so glyphs hang below the tick.
const BOTTOM_LABEL_DY_EM: f64 = 0.71;
/// Baseline shift of left-axis labels, in ems, so glyphs centre on the tick.
const LEFT_LABEL_DY_EM: f64 = 0.32;

/// Only every `stride`-th group tick gets a label so at most `max_labels`
/// remain readable.
#[must_use]
pub fn group_label_stride(group_count: usize, max_labels: usize) -> usize {
    group_count.div_ceil(max_labels.max(1)).max(1)
}

fn truncate_label(key: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(limit) => key.chars().take(limit).collect(),
        None => key.to_owned(),
    }
}

/// Bottom axis: one tick per distinct group at the band centre.
pub(super) fn build_group_axis(scales: &ChartScales, config: &ChartEngineConfig) -> AxisScene {
    let layout = config.layout;
    let style = config.axis_style;
    let labels = config.group_axis_labels;
    let (left, top) = layout.plot_origin();
    let floor = top + layout.inner_height();

    let stride = group_label_stride(scales.groups.len(), labels.max_labels);
    let half_band = scales.groups.bandwidth() * 0.5;
    let label_distance =
        style.tick_size + style.tick_padding + style.font_size_px * BOTTOM_LABEL_DY_EM;
    let theta = labels.rotation_deg.to_radians();
    let (label_dx, label_dy) = (-label_distance * theta.sin(), label_distance * theta.cos());

    let ticks = scales
        .groups
        .domain()
        .iter()
        .enumerate()
        .filter_map(|(index, key)| {
            let x = left + scales.groups.position_at(index)? + half_band;
            let text = if index % stride == 0 {
                truncate_label(key, labels.max_chars)
            } else {
                String::new()
            };
            let label = TextPrimitive::new(
                text,
                x + labels.shift_x + label_dx,
                floor + labels.shift_y + label_dy,
                style.font_size_px,
                Color::BLACK,
                TextHAlign::Right,
            )
            .with_rotation(labels.rotation_deg);

            Some(AxisTick {
                key: key.clone(),
                position: x,
                line: LinePrimitive::new(
                    x,
                    floor,
                    x,
                    floor + style.tick_size,
                    style.stroke_width,
                    Color::BLACK,
                ),
                label,
            })
        })
        .collect();

    AxisScene {
        orientation: AxisOrientation::Bottom,
        domain_line: LinePrimitive::new(
            left,
            floor,
            left + layout.inner_width(),
            floor,
            style.stroke_width,
            Color::BLACK,
        ),
        ticks,
    }
}

/// Left axis: round ticks of the niced value scale.
pub(super) fn build_value_axis(scales: &ChartScales, config: &ChartEngineConfig) -> AxisScene {
    let layout = config.layout;
    let style = config.axis_style;
    let (left, top) = layout.plot_origin();
    let floor = top + layout.inner_height();

    let count = style.value_tick_count;
    let step = scales.value.tick_step(count);
    let label_distance = style.tick_size + style.tick_padding;

    let ticks = scales
        .value
        .ticks(count)
        .into_iter()
        .map(|value| {
            let y = top + scales.value.map(value);
            AxisTick {
                key: value.to_string(),
                position: y,
                line: LinePrimitive::new(
                    left - style.tick_size,
                    y,
                    left,
                    y,
                    style.stroke_width,
                    Color::BLACK,
                ),
                label: TextPrimitive::new(
                    format_tick(value, step),
                    left - label_distance,
                    y + style.font_size_px * LEFT_LABEL_DY_EM,
                    style.font_size_px,
                    Color::BLACK,
                    TextHAlign::Right,
                ),
            }
        })
        .collect();

    AxisScene {
        orientation: AxisOrientation::Left,
        domain_line: LinePrimitive::new(left, top, left, floor, style.stroke_width, Color::BLACK),
        ticks,
    }
}
