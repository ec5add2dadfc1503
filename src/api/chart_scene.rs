use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Series, Transition, Viewport};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

/// One tick mark; `label.text` is empty for thinned-out ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub key: String,
    /// Canvas coordinate along the axis.
    pub position: f64,
    pub line: LinePrimitive,
    pub label: TextPrimitive,
}

impl AxisTick {
    #[must_use]
    pub fn has_label(&self) -> bool {
        !self.label.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisScene {
    pub orientation: AxisOrientation,
    pub domain_line: LinePrimitive,
    pub ticks: Vec<AxisTick>,
}

impl AxisScene {
    pub fn labelled_ticks(&self) -> impl Iterator<Item = &AxisTick> {
        self.ticks.iter().filter(|tick| tick.has_label())
    }
}

/// Entrance tween for one bar: grows up from the plot floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarAnimation {
    pub y: Transition,
    pub height: Transition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarScene {
    pub series: Series,
    pub value: f64,
    /// Final geometry once the entrance animation has settled.
    pub rect: RectPrimitive,
    pub animation: BarAnimation,
}

impl BarScene {
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("bar {}", self.series)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.rect.opacity > 0.0
    }

    /// Geometry sampled `elapsed_ms` after the scene was drawn.
    #[must_use]
    pub fn geometry_at(&self, elapsed_ms: f64) -> RectPrimitive {
        RectPrimitive {
            y: self.animation.y.sample(elapsed_ms),
            height: self.animation.height.sample(elapsed_ms).max(0.0),
            ..self.rect
        }
    }
}

/// Bars for one record plus the tags the tooltip reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroupScene {
    pub record_id: String,
    /// Canvas x of the group band.
    pub x: f64,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub bars: SmallVec<[BarScene; 3]>,
}

impl BarGroupScene {
    #[must_use]
    pub fn bar(&self, series: Series) -> Option<&BarScene> {
        self.bars.iter().find(|bar| bar.series == series)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub series: Series,
    pub visible: bool,
    pub swatch: RectPrimitive,
    pub label: TextPrimitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendScene {
    pub x: f64,
    pub y: f64,
    pub entries: Vec<LegendEntry>,
}

impl LegendScene {
    /// Series whose swatch contains the canvas point.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Series> {
        self.entries
            .iter()
            .find(|entry| entry.swatch.contains(x, y))
            .map(|entry| entry.series)
    }
}

/// Bar addressed by group position and series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarKey {
    pub group: usize,
    pub series: Series,
}

/// Complete drawable output of one render pass, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub viewport: Viewport,
    pub plot_origin: (f64, f64),
    pub x_axis: Option<AxisScene>,
    pub y_axis: Option<AxisScene>,
    pub groups: Vec<BarGroupScene>,
    pub legend: Option<LegendScene>,
    pub placeholder: Option<TextPrimitive>,
}

impl ChartScene {
    /// Scene with nothing drawn.
    #[must_use]
    pub fn cleared(viewport: Viewport) -> Self {
        Self {
            viewport,
            plot_origin: (0.0, 0.0),
            x_axis: None,
            y_axis: None,
            groups: Vec::new(),
            legend: None,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.x_axis.is_none()
            && self.y_axis.is_none()
            && self.groups.is_empty()
            && self.legend.is_none()
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarScene> {
        self.groups.iter().flat_map(|group| group.bars.iter())
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.groups.iter().map(|group| group.bars.len()).sum()
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.x_axis.as_ref().map_or(0, |axis| axis.ticks.len())
            + self.y_axis.as_ref().map_or(0, |axis| axis.ticks.len())
    }

    #[must_use]
    pub fn bar(&self, key: BarKey) -> Option<&BarScene> {
        self.groups.get(key.group)?.bar(key.series)
    }

    /// Topmost bar under the canvas point, using geometry at `elapsed_ms`.
    ///
    /// Transparent bars still count: hiding a series only changes opacity.
    #[must_use]
    pub fn hit_test_bar(&self, x: f64, y: f64, elapsed_ms: f64) -> Option<BarKey> {
        self.groups
            .iter()
            .enumerate()
            .rev()
            .find_map(|(group_index, group)| {
                group
                    .bars
                    .iter()
                    .rev()
                    .find(|bar| bar.geometry_at(elapsed_ms).contains(x, y))
                    .map(|bar| BarKey {
                        group: group_index,
                        series: bar.series,
                    })
            })
    }

    #[must_use]
    pub fn hit_test_legend(&self, x: f64, y: f64) -> Option<Series> {
        self.legend.as_ref()?.hit_test(x, y)
    }
}
