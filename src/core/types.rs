use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000, 600)
    }
}

/// Space reserved around the plot area, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 30.0, 100.0, 60.0)
    }
}

/// Canvas size plus margins; everything else in a pass is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margins: Margins,
}

impl ChartLayout {
    #[must_use]
    pub fn new(viewport: Viewport, margins: Margins) -> Self {
        Self { viewport, margins }
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        f64::from(self.viewport.width) - self.margins.left - self.margins.right
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        f64::from(self.viewport.height) - self.margins.top - self.margins.bottom
    }

    /// Canvas position of the plot area's top-left corner.
    #[must_use]
    pub fn plot_origin(self) -> (f64, f64) {
        (self.margins.left, self.margins.top)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let margins = self.margins;
        for (name, value) in [
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
            ("left", margins.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err(ChartError::InvalidData(
                "margins leave no room for the plot area".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartLayout, Margins, Viewport};

    #[test]
    fn default_layout_matches_dashboard_canvas() {
        let layout = ChartLayout::default();
        assert_eq!(layout.viewport, Viewport::new(1000, 600));
        assert_eq!(layout.inner_width(), 910.0);
        assert_eq!(layout.inner_height(), 480.0);
        assert_eq!(layout.plot_origin(), (60.0, 20.0));
        layout.validate().expect("default layout is valid");
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let layout = ChartLayout::new(Viewport::new(100, 100), Margins::new(60.0, 0.0, 60.0, 0.0));
        assert!(layout.validate().is_err());
    }
}
