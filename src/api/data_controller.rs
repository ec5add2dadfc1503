use tracing::{debug, error, trace};

use crate::core::{FilterKey, Record, Series};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngine, DataStatus};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the record set, then re-filters, rebuilds scales and renders.
    pub fn set_records(&mut self, records: Vec<Record>) -> ChartResult<()> {
        debug!(count = records.len(), "set records");
        self.records = records;
        self.data_status = DataStatus::Loaded;
        self.recompute();
        self.render()
    }

    /// Records a failed fetch. The record set becomes empty and the chart
    /// renders as cleared.
    pub fn records_failed(&mut self, message: impl Into<String>) -> ChartResult<()> {
        let message = message.into();
        error!(error = %message, "failed to load chart records");
        self.records.clear();
        self.data_status = DataStatus::Failed { message };
        self.recompute();
        self.render()
    }

    /// Updates exactly one filter entry. Re-renders only when the value
    /// actually changed.
    pub fn set_filter(&mut self, key: FilterKey, value: impl Into<String>) -> ChartResult<()> {
        if !self.filters.set(key, value) {
            trace!(key = key.as_str(), "filter value unchanged");
            return Ok(());
        }
        debug!(
            key = key.as_str(),
            value = self.filters.get(key),
            "filter updated"
        );
        self.recompute();
        self.render()
    }

    /// Same as [`Self::set_filter`], addressing the key by its wire name.
    pub fn set_filter_by_name(&mut self, name: &str, value: impl Into<String>) -> ChartResult<()> {
        let key: FilterKey = name.parse()?;
        self.set_filter(key, value)
    }

    pub fn clear_filters(&mut self) -> ChartResult<()> {
        if self.filters.is_unconstrained() {
            return Ok(());
        }
        self.filters.clear();
        self.recompute();
        self.render()
    }

    /// Flips one series and recomposes from the cached scales. Returns the new
    /// visibility.
    pub fn toggle_series(&mut self, series: Series) -> ChartResult<bool> {
        let visible = self.visibility.toggle(series);
        debug!(series = series.as_str(), visible, "series visibility toggled");
        self.render()?;
        Ok(visible)
    }

    pub fn set_series_visible(&mut self, series: Series, visible: bool) -> ChartResult<()> {
        if self.visibility.is_visible(series) == visible {
            return Ok(());
        }
        self.visibility.set(series, visible);
        self.render()
    }
}
