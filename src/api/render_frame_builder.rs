use crate::interaction::TooltipState;
use crate::render::{RenderFrame, TooltipOverlay};

use super::{AxisScene, ChartScene};

/// Flattens a scene into backend primitives, sampling bar animations at
/// `elapsed_ms`. Order: axes, bars, legend, placeholder.
#[must_use]
pub fn build_render_frame(
    scene: &ChartScene,
    tooltip: &TooltipState,
    elapsed_ms: f64,
) -> RenderFrame {
    let mut frame = RenderFrame::new(scene.viewport);

    for axis in [&scene.x_axis, &scene.y_axis].into_iter().flatten() {
        push_axis(&mut frame, axis);
    }

    frame
        .rects
        .extend(scene.bars().map(|bar| bar.geometry_at(elapsed_ms)));

    if let Some(legend) = &scene.legend {
        for entry in &legend.entries {
            frame.rects.push(entry.swatch);
            frame.texts.push(entry.label.clone());
        }
    }

    if let Some(placeholder) = &scene.placeholder {
        frame.texts.push(placeholder.clone());
    }

    frame.tooltip = tooltip.content().map(|content| {
        let (left, top) = tooltip.position();
        TooltipOverlay {
            left,
            top,
            opacity: tooltip.opacity().clamp(0.0, 1.0),
            lines: content.lines().into(),
        }
    });

    frame
}

fn push_axis(frame: &mut RenderFrame, axis: &AxisScene) {
    frame.lines.push(axis.domain_line);
    for tick in &axis.ticks {
        frame.lines.push(tick.line);
        if tick.has_label() {
            frame.texts.push(tick.label.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_render_frame;
    use crate::api::{ChartEngineConfig, ChartScene, render_scene};
    use crate::core::{FilterState, Record, VisibilitySet};
    use crate::interaction::TooltipState;

    #[test]
    fn cleared_scene_flattens_to_empty_frame() {
        let scene = ChartScene::cleared(ChartEngineConfig::default().layout.viewport);
        let frame = build_render_frame(&scene, &TooltipState::default(), 0.0);
        assert!(frame.is_empty());
        assert!(frame.tooltip.is_none());
    }

    #[test]
    fn frame_holds_bars_legend_and_axis_primitives() {
        let records = vec![Record::new("r1", 5.0, 2.0, 7.0), Record::new("r2", 1.0, 2.0, 3.0)];
        let scene = render_scene(
            &records,
            &FilterState::default(),
            VisibilitySet::default(),
            &ChartEngineConfig::default(),
        );
        let frame = build_render_frame(&scene, &TooltipState::default(), 800.0);
        frame.validate().expect("valid frame");

        // 6 bars + 3 legend swatches.
        assert_eq!(frame.rects.len(), 9);
        let axis_lines = 2 + scene.tick_count();
        assert_eq!(frame.lines.len(), axis_lines);
        // every x and y tick is labelled here, plus 3 legend labels
        assert_eq!(frame.texts.len(), scene.tick_count() + 3);
    }
}
