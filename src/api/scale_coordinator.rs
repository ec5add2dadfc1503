use tracing::debug;

use crate::core::{BandScale, ColorScale, LinearScale, Record, Series};
use crate::error::{ChartError, ChartResult};

use super::ChartEngineConfig;

/// Scales derived from one filtered record set. Plot-local coordinates: the
/// group scale spans `[0, inner_width]` and the value scale maps onto
/// `[inner_height, 0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub groups: BandScale,
    pub series: BandScale,
    pub value: LinearScale,
    pub color: ColorScale,
}

impl ChartScales {
    /// Builds all four scales. Fails with `EmptyDomain` for an empty record set;
    /// callers short-circuit to a cleared scene before reaching this point.
    pub fn build(records: &[&Record], config: &ChartEngineConfig) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::EmptyDomain("no records to scale"));
        }

        let layout = config.layout;
        let groups = BandScale::new(
            records.iter().map(|record| record.id.as_str()),
            (0.0, layout.inner_width()),
            config.group_padding,
        )?;
        let series = BandScale::new(
            Series::ALL.iter().map(|series| series.as_str()),
            (0.0, groups.bandwidth()),
            config.series_padding,
        )?;

        let peak = records
            .iter()
            .map(|record| record.peak_measure())
            .fold(f64::NEG_INFINITY, f64::max);
        // An all-zero set still needs a non-degenerate axis.
        let domain_end = if peak > 0.0 { peak } else { 1.0 };
        let value = LinearScale::new((0.0, domain_end), (layout.inner_height(), 0.0))?
            .nice(config.axis_style.value_tick_count);

        debug!(
            groups = groups.len(),
            peak,
            nice_max = value.domain().1,
            "built chart scales"
        );

        Ok(Self {
            groups,
            series,
            value,
            color: config.color_scale()?,
        })
    }

    /// Plot-local x of the bar for `series` inside the group `record_id`.
    #[must_use]
    pub fn bar_x(&self, record_id: &str, series: Series) -> Option<f64> {
        let group = self.groups.position(record_id)?;
        let within = self.series.position_at(series.index())?;
        Some(group + within)
    }
}
