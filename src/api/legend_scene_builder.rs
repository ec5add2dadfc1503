use crate::core::{ColorScale, Series, VisibilitySet};
use crate::render::{Color, RectPrimitive, TextHAlign, TextPrimitive};

use super::{ChartEngineConfig, LegendEntry, LegendScene};

/// Vertical stack of swatch + label rows anchored near the top-right corner.
pub(super) fn build_legend(
    color: ColorScale,
    visibility: VisibilitySet,
    config: &ChartEngineConfig,
) -> LegendScene {
    let layout = config.layout;
    let legend = config.legend;
    let x = f64::from(layout.viewport.width) - layout.margins.right - legend.inset_from_right;
    let y = layout.margins.top;

    let entries = Series::ALL
        .into_iter()
        .enumerate()
        .map(|(row, series)| {
            let row_y = y + row as f64 * legend.row_height;
            LegendEntry {
                series,
                visible: visibility.is_visible(series),
                swatch: RectPrimitive::new(
                    x,
                    row_y,
                    legend.swatch_size,
                    legend.swatch_size,
                    color.color(series),
                ),
                label: TextPrimitive::new(
                    series.as_str(),
                    x + legend.label_offset_x,
                    row_y + legend.label_baseline,
                    legend.font_size_px,
                    Color::BLACK,
                    TextHAlign::Left,
                ),
            }
        })
        .collect();

    LegendScene { x, y, entries }
}
