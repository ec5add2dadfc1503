use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, ChartResult};

/// One of the three measures drawn as a bar inside each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Intensity,
    Likelihood,
    Relevance,
}

impl Series {
    /// Subgroup order used by layout, legend and palette.
    pub const ALL: [Series; 3] = [Series::Intensity, Series::Likelihood, Series::Relevance];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Likelihood => "likelihood",
            Self::Relevance => "relevance",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Intensity => 0,
            Self::Likelihood => 1,
            Self::Relevance => 2,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Series {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|series| series.as_str() == value)
            .ok_or_else(|| ChartError::UnknownSeries(value.to_owned()))
    }
}

/// Categorical record fields reachable by the filter engine and tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    EndYear,
    Topic,
    Sector,
    Region,
    Pestle,
    Source,
    Swot,
    Country,
    City,
}

/// A single feed entry: three measures plus categorical tags.
///
/// Categorical fields are optional because the feed is not guaranteed to carry
/// every tag on every entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub intensity: f64,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub likelihood: f64,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub relevance: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pestle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub swot: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
}

impl Record {
    /// Creates a record with the given measures and no categorical tags.
    #[must_use]
    pub fn new(id: impl Into<String>, intensity: f64, likelihood: f64, relevance: f64) -> Self {
        Self {
            id: id.into(),
            intensity,
            likelihood,
            relevance,
            end_year: None,
            topic: None,
            sector: None,
            region: None,
            pestle: None,
            source: None,
            swot: None,
            country: None,
            city: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: RecordField, value: impl Into<String>) -> Self {
        *self.field_slot(field) = Some(value.into());
        self
    }

    #[must_use]
    pub fn measure(&self, series: Series) -> f64 {
        match series {
            Series::Intensity => self.intensity,
            Series::Likelihood => self.likelihood,
            Series::Relevance => self.relevance,
        }
    }

    /// Largest of the three measures.
    #[must_use]
    pub fn peak_measure(&self) -> f64 {
        self.intensity.max(self.likelihood).max(self.relevance)
    }

    #[must_use]
    pub fn field(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::EndYear => &self.end_year,
            RecordField::Topic => &self.topic,
            RecordField::Sector => &self.sector,
            RecordField::Region => &self.region,
            RecordField::Pestle => &self.pestle,
            RecordField::Source => &self.source,
            RecordField::Swot => &self.swot,
            RecordField::Country => &self.country,
            RecordField::City => &self.city,
        };
        value.as_deref()
    }

    fn field_slot(&mut self, field: RecordField) -> &mut Option<String> {
        match field {
            RecordField::EndYear => &mut self.end_year,
            RecordField::Topic => &mut self.topic,
            RecordField::Sector => &mut self.sector,
            RecordField::Region => &mut self.region,
            RecordField::Pestle => &mut self.pestle,
            RecordField::Source => &mut self.source,
            RecordField::Swot => &mut self.swot,
            RecordField::Country => &mut self.country,
            RecordField::City => &mut self.city,
        }
    }
}

/// Decodes the feed payload: a JSON array of record objects.
pub fn decode_records(input: &str) -> ChartResult<Vec<Record>> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse record array: {e}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMeasure {
    Number(f64),
    Text(String),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawText::Text(text) => text,
        RawText::Number(number) => number.to_string(),
        RawText::Flag(flag) => flag.to_string(),
    }))
}

fn lenient_measure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawMeasure>::deserialize(deserializer)? {
        Some(RawMeasure::Number(number)) => number,
        Some(RawMeasure::Text(text)) => text.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordField, Series, decode_records};

    #[test]
    fn decodes_feed_shape_with_mongo_id() {
        let records = decode_records(
            r#"[{"_id":"5d7f","intensity":6,"likelihood":3,"relevance":2,
                 "end_year":"","topic":"gas","region":"Northern America",
                 "country":"United States of America","insight":"ignored"}]"#,
        )
        .expect("valid payload");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "5d7f");
        assert_eq!(record.measure(Series::Intensity), 6.0);
        assert_eq!(record.field(RecordField::EndYear), Some(""));
        assert_eq!(record.field(RecordField::Topic), Some("gas"));
        assert_eq!(record.field(RecordField::Sector), None);
    }

    #[test]
    fn lenient_fields_accept_numbers_and_blanks() {
        let records = decode_records(
            r#"[{"_id":"a","intensity":"","likelihood":null,"relevance":"4","end_year":2027}]"#,
        )
        .expect("lenient payload");

        let record = &records[0];
        assert_eq!(record.intensity, 0.0);
        assert_eq!(record.likelihood, 0.0);
        assert_eq!(record.relevance, 4.0);
        assert_eq!(record.field(RecordField::EndYear), Some("2027"));
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(decode_records(r#"{"_id":"a"}"#).is_err());
    }

    #[test]
    fn series_names_round_trip_through_from_str() {
        for series in Series::ALL {
            assert_eq!(series.as_str().parse::<Series>().expect("known"), series);
        }
        assert!("impact".parse::<Series>().is_err());
    }

    #[test]
    fn peak_measure_takes_largest_series() {
        let record = Record::new("r1", 5.0, 2.0, 7.0);
        assert_eq!(record.peak_measure(), 7.0);
    }
}
