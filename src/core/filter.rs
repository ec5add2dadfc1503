use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::record::{Record, RecordField};
use crate::error::{ChartError, ChartResult};

/// Named filter slot. Wire names follow the dashboard's input `name` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "endYear")]
    EndYear,
    #[serde(rename = "topics")]
    Topics,
    #[serde(rename = "sector")]
    Sector,
    #[serde(rename = "region")]
    Region,
    #[serde(rename = "pest")]
    Pest,
    #[serde(rename = "source")]
    Source,
    #[serde(rename = "swot")]
    Swot,
    #[serde(rename = "country")]
    Country,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        FilterKey::EndYear,
        FilterKey::Topics,
        FilterKey::Sector,
        FilterKey::Region,
        FilterKey::Pest,
        FilterKey::Source,
        FilterKey::Swot,
        FilterKey::Country,
    ];

    /// Keys exposed as free-text inputs on the dashboard.
    pub const INPUT_FIELDS: [FilterKey; 6] = [
        FilterKey::Topics,
        FilterKey::Sector,
        FilterKey::Region,
        FilterKey::Pest,
        FilterKey::Source,
        FilterKey::Country,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EndYear => "endYear",
            Self::Topics => "topics",
            Self::Sector => "sector",
            Self::Region => "region",
            Self::Pest => "pest",
            Self::Source => "source",
            Self::Swot => "swot",
            Self::Country => "country",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EndYear => "End Year:",
            Self::Topics => "Topics:",
            Self::Sector => "Sector:",
            Self::Region => "Region:",
            Self::Pest => "PEST:",
            Self::Source => "Source:",
            Self::Swot => "SWOT:",
            Self::Country => "Country:",
        }
    }

    /// Record field the key constrains.
    #[must_use]
    pub const fn field(self) -> RecordField {
        match self {
            Self::EndYear => RecordField::EndYear,
            Self::Topics => RecordField::Topic,
            Self::Sector => RecordField::Sector,
            Self::Region => RecordField::Region,
            Self::Pest => RecordField::Pestle,
            Self::Source => RecordField::Source,
            Self::Swot => RecordField::Swot,
            Self::Country => RecordField::Country,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| ChartError::UnknownFilter(value.to_owned()))
    }
}

/// Current value of every filter slot; an empty value imposes no constraint.
///
/// All eight keys are present at all times, in `FilterKey::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    values: IndexMap<FilterKey, String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            values: FilterKey::ALL
                .into_iter()
                .map(|key| (key, String::new()))
                .collect(),
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: FilterKey) -> &str {
        self.values.get(&key).map_or("", String::as_str)
    }

    /// Replaces one slot and returns `true` when the value changed.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.values.get_mut(&key) {
            Some(slot) if *slot == value => false,
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                self.values.insert(key, value);
                true
            }
        }
    }

    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> ChartResult<bool> {
        let key = name.parse::<FilterKey>()?;
        Ok(self.set(key, value))
    }

    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Slots with a non-empty value, in key order.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (*key, value.as_str()))
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Whether `record` satisfies every active slot.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.active()
            .all(|(key, needle)| record.field(key.field()).is_some_and(|hay| hay.contains(needle)))
    }
}

impl<'de> Deserialize<'de> for FilterState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let partial = IndexMap::<FilterKey, String>::deserialize(deserializer)?;
        let mut state = Self::default();
        for (key, value) in partial {
            state.set(key, value);
        }
        Ok(state)
    }
}

/// Returns the records matching every active filter, in input order.
#[must_use]
pub fn apply_filters<'a>(records: &'a [Record], filters: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|record| filters.matches(record)).collect()
}

/// Same as [`apply_filters`] but yields positions into `records`.
#[must_use]
pub fn filtered_indices(records: &[Record], filters: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FilterKey, FilterState, apply_filters, filtered_indices};
    use crate::core::record::{Record, RecordField};

    fn sample() -> Vec<Record> {
        vec![
            Record::new("a", 1.0, 1.0, 1.0)
                .with_field(RecordField::Country, "United States of America")
                .with_field(RecordField::Topic, "oil"),
            Record::new("b", 2.0, 2.0, 2.0)
                .with_field(RecordField::Country, "Mexico")
                .with_field(RecordField::Topic, "gas"),
            Record::new("c", 3.0, 3.0, 3.0).with_field(RecordField::Topic, "oil"),
        ]
    }

    #[test]
    fn default_state_holds_all_keys_empty() {
        let state = FilterState::default();
        assert_eq!(state.iter().count(), 8);
        assert!(state.is_unconstrained());
        assert!(state.iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn set_touches_exactly_one_key() {
        let mut state = FilterState::default();
        assert!(state.set(FilterKey::Sector, "Energy"));
        assert!(!state.set(FilterKey::Sector, "Energy"));
        assert_eq!(state.get(FilterKey::Sector), "Energy");
        assert_eq!(state.active().count(), 1);
        assert_eq!(state.iter().count(), 8);
    }

    #[test]
    fn set_by_name_rejects_unknown_filters() {
        let mut state = FilterState::default();
        assert!(state.set_by_name("pest", "Economic").expect("known key"));
        assert!(state.set_by_name("impact", "x").is_err());
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let records = sample();
        let upper = FilterState::default().with(FilterKey::Country, "States");
        let lower = FilterState::default().with(FilterKey::Country, "states");
        assert_eq!(apply_filters(&records, &upper).len(), 1);
        assert!(apply_filters(&records, &lower).is_empty());
    }

    #[test]
    fn missing_field_fails_active_filter_only() {
        let records = sample();
        let by_country = FilterState::default().with(FilterKey::Country, "M");
        let matched = apply_filters(&records, &by_country);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "b");

        let by_topic = FilterState::default().with(FilterKey::Topics, "oil");
        assert_eq!(filtered_indices(&records, &by_topic), vec![0, 2]);
    }

    #[test]
    fn partial_json_fills_remaining_keys() {
        let state: FilterState =
            serde_json::from_str(r#"{"country":"India"}"#).expect("partial state");
        assert_eq!(state.get(FilterKey::Country), "India");
        assert_eq!(state.iter().count(), 8);
    }

    #[test]
    fn input_fields_are_the_six_labelled_text_inputs() {
        assert_eq!(
            FilterKey::INPUT_FIELDS,
            [
                FilterKey::Topics,
                FilterKey::Sector,
                FilterKey::Region,
                FilterKey::Pest,
                FilterKey::Source,
                FilterKey::Country,
            ]
        );
        let labels: Vec<&str> = FilterKey::INPUT_FIELDS
            .iter()
            .map(|key| key.label())
            .collect();
        assert_eq!(
            labels,
            ["Topics:", "Sector:", "Region:", "PEST:", "Source:", "Country:"]
        );
        assert!(!FilterKey::INPUT_FIELDS.contains(&FilterKey::EndYear));
        assert!(!FilterKey::INPUT_FIELDS.contains(&FilterKey::Swot));
    }
}
