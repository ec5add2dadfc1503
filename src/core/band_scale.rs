use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Categorical positional scale dividing a range into equal padded bands.
///
/// Inner and outer padding share one ratio and bands are centred in the range,
/// without rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    /// Builds the scale; duplicate keys keep their first position.
    pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !padding.is_finite() || !(0.0..=1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }

        let domain: IndexSet<String> = domain.into_iter().map(Into::into).collect();
        let mut scale = Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding,
            step: 0.0,
            bandwidth: 0.0,
            offset: range.0,
        };
        scale.rescale();
        Ok(scale)
    }

    fn rescale(&mut self) {
        let count = self.domain.len() as f64;
        let (start, stop) = if self.range_end < self.range_start {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };
        if count == 0.0 {
            self.step = 0.0;
            self.bandwidth = 0.0;
            self.offset = start;
            return;
        }

        let span = stop - start;
        self.step = span / (count - self.padding + self.padding * 2.0).max(1.0);
        self.bandwidth = self.step * (1.0 - self.padding);
        self.offset = start + (span - self.step * (count - self.padding)) * 0.5;
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<String> {
        &self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start coordinate of the band at `index` in domain order.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let slot = if self.range_end < self.range_start {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.offset + self.step * slot as f64)
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .get_index_of(key)
            .and_then(|index| self.position_at(index))
    }

    /// Centre of a band, where axis ticks sit.
    #[must_use]
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|start| start + self.bandwidth * 0.5)
    }
}
