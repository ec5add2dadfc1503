use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ColorScale, DEFAULT_SERIES_PALETTE, DEFAULT_TICK_COUNT};
use crate::error::{ChartError, ChartResult};

/// Upper bound for `AxisStyleBehavior::value_tick_count`.
pub const MAX_VALUE_TICK_COUNT: usize = 100;

/// X-axis label thinning and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupAxisLabelBehavior {
    /// Upper bound on the number of labelled ticks before thinning kicks in.
    pub max_labels: usize,
    /// Labels show at most this many characters of the record id.
    pub max_chars: Option<usize>,
    pub rotation_deg: f64,
    pub shift_x: f64,
    pub shift_y: f64,
}

impl Default for GroupAxisLabelBehavior {
    fn default() -> Self {
        Self {
            max_labels: 50,
            max_chars: Some(4),
            rotation_deg: -45.0,
            shift_x: -10.0,
            shift_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyleBehavior {
    pub tick_size: f64,
    pub tick_padding: f64,
    pub font_size_px: f64,
    pub stroke_width: f64,
    pub value_tick_count: usize,
}

impl Default for AxisStyleBehavior {
    fn default() -> Self {
        Self {
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size_px: 10.0,
            stroke_width: 1.0,
            value_tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

/// Legend block placement, measured from the canvas' top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendBehavior {
    pub inset_from_right: f64,
    pub swatch_size: f64,
    pub row_height: f64,
    pub label_offset_x: f64,
    pub label_baseline: f64,
    pub font_size_px: f64,
}

impl Default for LegendBehavior {
    fn default() -> Self {
        Self {
            inset_from_right: 120.0,
            swatch_size: 10.0,
            row_height: 20.0,
            label_offset_x: 20.0,
            label_baseline: 9.0,
            font_size_px: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipBehavior {
    pub offset_x: f64,
    pub offset_y: f64,
    pub opacity: f64,
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,
}

impl Default for TooltipBehavior {
    fn default() -> Self {
        Self {
            offset_x: 5.0,
            offset_y: -28.0,
            opacity: 0.9,
            fade_in_ms: 200.0,
            fade_out_ms: 500.0,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings.
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartEngineConfig {
    pub layout: ChartLayout,
    pub group_padding: f64,
    pub series_padding: f64,
    pub palette: [String; 3],
    pub bar_entrance_ms: f64,
    pub group_axis_labels: GroupAxisLabelBehavior,
    pub axis_style: AxisStyleBehavior,
    pub legend: LegendBehavior,
    pub tooltip: TooltipBehavior,
    /// Text drawn when the filtered set is empty; `None` leaves the canvas blank.
    pub empty_state_message: Option<String>,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            group_padding: 0.1,
            series_padding: 0.05,
            palette: DEFAULT_SERIES_PALETTE.map(str::to_owned),
            bar_entrance_ms: 800.0,
            group_axis_labels: GroupAxisLabelBehavior::default(),
            axis_style: AxisStyleBehavior::default(),
            legend: LegendBehavior::default(),
            tooltip: TooltipBehavior::default(),
            empty_state_message: None,
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_padding(mut self, group_padding: f64, series_padding: f64) -> Self {
        self.group_padding = group_padding;
        self.series_padding = series_padding;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: [String; 3]) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipBehavior) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_group_axis_labels(mut self, labels: GroupAxisLabelBehavior) -> Self {
        self.group_axis_labels = labels;
        self
    }

    #[must_use]
    pub fn with_empty_state_message(mut self, message: impl Into<String>) -> Self {
        self.empty_state_message = Some(message.into());
        self
    }

    pub fn color_scale(&self) -> ChartResult<ColorScale> {
        ColorScale::from_hex(&self.palette)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;
        for (name, value) in [
            ("group_padding", self.group_padding),
            ("series_padding", self.series_padding),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and in [0, 1)"
                )));
            }
        }
        if !self.bar_entrance_ms.is_finite() || self.bar_entrance_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "bar entrance duration must be finite and >= 0".to_owned(),
            ));
        }
        if self.group_axis_labels.max_labels == 0 {
            return Err(ChartError::InvalidData(
                "group axis label budget must be > 0".to_owned(),
            ));
        }

        let axis = self.axis_style;
        if !axis.font_size_px.is_finite() || axis.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        if !axis.stroke_width.is_finite() || axis.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !axis.tick_size.is_finite() || !axis.tick_padding.is_finite() {
            return Err(ChartError::InvalidData(
                "axis tick geometry must be finite".to_owned(),
            ));
        }
        if axis.value_tick_count == 0 || axis.value_tick_count > MAX_VALUE_TICK_COUNT {
            return Err(ChartError::InvalidData(format!(
                "value tick count must be in 1..={MAX_VALUE_TICK_COUNT}"
            )));
        }
        if !self.legend.font_size_px.is_finite() || self.legend.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "legend font size must be finite and > 0".to_owned(),
            ));
        }

        let tooltip = self.tooltip;
        if !tooltip.opacity.is_finite() || !(0.0..=1.0).contains(&tooltip.opacity) {
            return Err(ChartError::InvalidData(
                "tooltip opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !tooltip.fade_in_ms.is_finite()
            || !tooltip.fade_out_ms.is_finite()
            || tooltip.fade_in_ms < 0.0
            || tooltip.fade_out_ms < 0.0
        {
            return Err(ChartError::InvalidData(
                "tooltip fade durations must be finite and >= 0".to_owned(),
            ));
        }

        self.color_scale().map(|_| ())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisStyleBehavior, ChartEngineConfig, MAX_VALUE_TICK_COUNT};

    #[test]
    fn default_config_is_valid() {
        let config = ChartEngineConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.group_padding, 0.1);
        assert_eq!(config.series_padding, 0.05);
        assert_eq!(config.bar_entrance_ms, 800.0);
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = ChartEngineConfig::default().with_empty_state_message("No data");
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let parsed =
            ChartEngineConfig::from_json_str(r#"{"bar_entrance_ms": 0.0}"#).expect("parse");
        assert_eq!(parsed.bar_entrance_ms, 0.0);
        assert_eq!(parsed.layout, ChartEngineConfig::default().layout);
    }

    #[test]
    fn invalid_palette_is_rejected() {
        let config = ChartEngineConfig::default().with_palette([
            "#000000".to_owned(),
            "purple".to_owned(),
            "#ffffff".to_owned(),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn value_tick_count_must_be_positive_and_bounded() {
        let with_count = |value_tick_count| ChartEngineConfig {
            axis_style: AxisStyleBehavior {
                value_tick_count,
                ..AxisStyleBehavior::default()
            },
            ..ChartEngineConfig::default()
        };

        assert!(with_count(0).validate().is_err());
        assert!(with_count(MAX_VALUE_TICK_COUNT + 1).validate().is_err());
        with_count(1).validate().expect("single tick");
        with_count(MAX_VALUE_TICK_COUNT)
            .validate()
            .expect("upper bound");
    }
}
