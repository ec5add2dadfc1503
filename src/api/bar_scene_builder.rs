use smallvec::SmallVec;

use crate::core::{Record, Series, Transition, VisibilitySet};
use crate::error::{ChartError, ChartResult};
use crate::render::RectPrimitive;

use super::{BarAnimation, BarGroupScene, BarScene, ChartEngineConfig, ChartScales};

/// Lays out one group of three bars per record, in record order.
///
/// Hidden series keep their geometry and only drop to zero opacity.
pub(super) fn build_bar_groups(
    records: &[&Record],
    scales: &ChartScales,
    visibility: VisibilitySet,
    config: &ChartEngineConfig,
) -> ChartResult<Vec<BarGroupScene>> {
    let layout = config.layout;
    let (left, top) = layout.plot_origin();
    let floor = top + layout.inner_height();
    let width = scales.series.bandwidth();

    records
        .iter()
        .map(|record| {
            let group_x = scales.groups.position(&record.id).ok_or_else(|| {
                ChartError::InvalidData(format!("record `{}` missing from group scale", record.id))
            })?;

            let bars: SmallVec<[BarScene; 3]> = Series::ALL
                .into_iter()
                .filter_map(|series| {
                    let offset = scales.series.position_at(series.index())?;
                    let value = record.measure(series);
                    let value_y = top + scales.value.map(value);
                    let (y, height) = (value_y.min(floor), (floor - value_y).abs());

                    let rect = RectPrimitive::new(
                        left + group_x + offset,
                        y,
                        width,
                        height,
                        scales.color.color(series),
                    )
                    .with_opacity(visibility.opacity(series));
                    Some(BarScene {
                        series,
                        value,
                        rect,
                        animation: BarAnimation {
                            y: Transition::new(floor, y, config.bar_entrance_ms),
                            height: Transition::new(0.0, height, config.bar_entrance_ms),
                        },
                    })
                })
                .collect();

            Ok(BarGroupScene {
                record_id: record.id.clone(),
                x: left + group_x,
                country: record.country.clone(),
                region: record.region.clone(),
                city: record.city.clone(),
                bars,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_bar_groups;
    use crate::api::{ChartEngineConfig, ChartScales};
    use crate::core::{Record, Series, VisibilitySet};
    use approx::assert_relative_eq;

    #[test]
    fn bars_stand_on_the_plot_floor() {
        let records = [Record::new("r1", 5.0, 2.0, 7.0)];
        let refs: Vec<&Record> = records.iter().collect();
        let config = ChartEngineConfig::default();
        let scales = ChartScales::build(&refs, &config).expect("scales");

        let groups =
            build_bar_groups(&refs, &scales, VisibilitySet::default(), &config).expect("bars");
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.bars.len(), 3);

        for bar in &group.bars {
            assert_relative_eq!(bar.rect.y + bar.rect.height, 500.0, epsilon = 1e-9);
            assert_relative_eq!(bar.rect.width, scales.series.bandwidth(), epsilon = 1e-12);
        }
        let relevance = group.bar(Series::Relevance).expect("relevance bar");
        assert_relative_eq!(relevance.rect.y, 20.0, epsilon = 1e-9);
        assert_eq!(relevance.css_class(), "bar relevance");
    }

    #[test]
    fn entrance_animation_starts_flat() {
        let records = [Record::new("r1", 5.0, 2.0, 7.0)];
        let refs: Vec<&Record> = records.iter().collect();
        let config = ChartEngineConfig::default();
        let scales = ChartScales::build(&refs, &config).expect("scales");
        let groups =
            build_bar_groups(&refs, &scales, VisibilitySet::default(), &config).expect("bars");

        let bar = &groups[0].bars[0];
        let start = bar.geometry_at(0.0);
        assert_eq!(start.height, 0.0);
        assert_eq!(start.y, 500.0);
        assert_eq!(bar.geometry_at(800.0), bar.rect);
        assert!(bar.geometry_at(400.0).height < bar.rect.height);
    }
}
