use serde::{Deserialize, Serialize};

use crate::core::record::Series;

/// Per-series visibility; hidden series keep their bars but draw them transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
    pub intensity: bool,
    pub likelihood: bool,
    pub relevance: bool,
}

impl Default for VisibilitySet {
    fn default() -> Self {
        Self {
            intensity: true,
            likelihood: true,
            relevance: true,
        }
    }
}

impl VisibilitySet {
    #[must_use]
    pub fn is_visible(self, series: Series) -> bool {
        match series {
            Series::Intensity => self.intensity,
            Series::Likelihood => self.likelihood,
            Series::Relevance => self.relevance,
        }
    }

    pub fn set(&mut self, series: Series, visible: bool) {
        *self.slot(series) = visible;
    }

    /// Flips one entry and returns its new value.
    pub fn toggle(&mut self, series: Series) -> bool {
        let slot = self.slot(series);
        *slot = !*slot;
        *slot
    }

    #[must_use]
    pub fn opacity(self, series: Series) -> f64 {
        if self.is_visible(series) { 1.0 } else { 0.0 }
    }

    pub fn iter(self) -> impl Iterator<Item = (Series, bool)> {
        Series::ALL
            .into_iter()
            .map(move |series| (series, self.is_visible(series)))
    }

    fn slot(&mut self, series: Series) -> &mut bool {
        match series {
            Series::Intensity => &mut self.intensity,
            Series::Likelihood => &mut self.likelihood,
            Series::Relevance => &mut self.relevance,
        }
    }
}
