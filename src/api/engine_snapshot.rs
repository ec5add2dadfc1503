use serde::{Deserialize, Serialize};

use crate::core::{FilterState, VisibilitySet};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartEngine, ChartScene, DataStatus};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub data_status: DataStatus,
    pub filters: FilterState,
    pub visibility: VisibilitySet,
    pub record_count: usize,
    pub filtered_count: usize,
    pub value_domain: Option<(f64, f64)>,
    pub render_passes: u64,
    pub scene: ChartScene,
}

impl EngineSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot: {e}")))
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            data_status: self.data_status.clone(),
            filters: self.filters.clone(),
            visibility: self.visibility,
            record_count: self.records.len(),
            filtered_count: self.filtered.len(),
            value_domain: self.scales.as_ref().map(|scales| scales.value.domain()),
            render_passes: self.render_passes,
            scene: self.scene.clone(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_pretty()
    }
}
