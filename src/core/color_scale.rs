use serde::{Deserialize, Serialize};

use crate::core::record::Series;
use crate::error::ChartResult;
use crate::render::Color;

pub const DEFAULT_SERIES_PALETTE: [&str; 3] = ["#6b486b", "#ff8c00", "#a05d56"];

/// Fixed ordinal palette, one color per series in `Series::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    colors: [Color; 3],
}

impl ColorScale {
    #[must_use]
    pub const fn new(colors: [Color; 3]) -> Self {
        Self { colors }
    }

    pub fn from_hex(palette: &[String; 3]) -> ChartResult<Self> {
        Ok(Self::new([
            Color::from_hex(&palette[0])?,
            Color::from_hex(&palette[1])?,
            Color::from_hex(&palette[2])?,
        ]))
    }

    #[must_use]
    pub fn color(self, series: Series) -> Color {
        self.colors[series.index()]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        // DEFAULT_SERIES_PALETTE as channel values.
        Self::new([
            Color::rgb(107.0 / 255.0, 72.0 / 255.0, 107.0 / 255.0),
            Color::rgb(1.0, 140.0 / 255.0, 0.0),
            Color::rgb(160.0 / 255.0, 93.0 / 255.0, 86.0 / 255.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorScale, DEFAULT_SERIES_PALETTE};
    use crate::core::record::Series;

    #[test]
    fn default_palette_matches_hex_literals() {
        let scale = ColorScale::default();
        for (series, hex) in Series::ALL.into_iter().zip(DEFAULT_SERIES_PALETTE) {
            assert_eq!(scale.color(series).to_hex(), hex);
        }
    }

    #[test]
    fn custom_palette_parses_hex() {
        let palette = ["#000000".to_owned(), "#ffffff".to_owned(), "#ff0000".to_owned()];
        let scale = ColorScale::from_hex(&palette).expect("valid palette");
        assert_eq!(scale.color(Series::Relevance).to_hex(), "#ff0000");
    }
}
