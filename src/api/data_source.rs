use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::core::{Record, decode_records};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

/// Endpoint the dashboard backend serves records from.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/data";

/// One-shot provider of the record array.
pub trait RecordSource {
    fn fetch(&self) -> ChartResult<Vec<Record>>;

    /// Human-readable origin used in log events.
    fn describe(&self) -> String;
}

/// Record array from a JSON string or a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonRecordSource {
    Inline(String),
    File(PathBuf),
}

impl JsonRecordSource {
    #[must_use]
    pub fn inline(json: impl Into<String>) -> Self {
        Self::Inline(json.into())
    }

    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch(&self) -> ChartResult<Vec<Record>> {
        match self {
            Self::Inline(json) => decode_records(json),
            Self::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|err| {
                    ChartError::DataSource(format!("failed to read {}: {err}", path.display()))
                })?;
                decode_records(&json)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Inline(json) => format!("inline json ({} bytes)", json.len()),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Blocking GET against the records endpoint.
#[cfg(feature = "http-source")]
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http-source")]
impl HttpRecordSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http-source")]
impl Default for HttpRecordSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(feature = "http-source")]
impl RecordSource for HttpRecordSource {
    fn fetch(&self) -> ChartResult<Vec<Record>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|err| ChartError::DataSource(format!("GET {}: {err}", self.url)))?;
        decode_records(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fetches records, treating any failure as an empty set. The failure is
/// only logged.
pub fn load_records(source: &dyn RecordSource) -> Vec<Record> {
    match source.fetch() {
        Ok(records) => {
            debug!(source = %source.describe(), count = records.len(), "records fetched");
            records
        }
        Err(err) => {
            error!(source = %source.describe(), error = %err, "record fetch failed");
            Vec::new()
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Fetches from `source` and feeds the outcome into the engine. A failed
    /// fetch renders an empty chart and marks the data status as failed.
    pub fn load_from(&mut self, source: &dyn RecordSource) -> ChartResult<()> {
        match source.fetch() {
            Ok(records) => {
                debug!(source = %source.describe(), count = records.len(), "records fetched");
                self.set_records(records)
            }
            Err(err) => self.records_failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonRecordSource, RecordSource, load_records};
    use crate::api::{ChartEngine, ChartEngineConfig, DataStatus};
    use crate::render::NullRenderer;

    const PAYLOAD: &str = r#"[
        {"_id": "a1", "intensity": 6, "likelihood": 3, "relevance": 2, "country": "USA"},
        {"_id": "a2", "intensity": "", "likelihood": 1, "relevance": 1}
    ]"#;

    #[test]
    fn inline_json_source_decodes_records() {
        let records = JsonRecordSource::inline(PAYLOAD).fetch().expect("fetch");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].intensity, 0.0);
    }

    #[test]
    fn malformed_payload_loads_as_empty() {
        let records = load_records(&JsonRecordSource::inline("{not json"));
        assert!(records.is_empty());
    }

    #[test]
    fn missing_file_marks_engine_failed() {
        let mut engine =
            ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default()).expect("engine");
        engine
            .load_from(&JsonRecordSource::file("/nonexistent/records.json"))
            .expect("failure is recovered");
        assert!(matches!(engine.data_status(), DataStatus::Failed { .. }));
        assert!(engine.scene().is_cleared());
        assert_eq!(engine.renderer().frames_rendered, 1);
    }
}
