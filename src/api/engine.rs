use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{FilterState, Record, VisibilitySet, filtered_indices};
use crate::error::ChartResult;
use crate::interaction::{InteractionState, TooltipState};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::build_render_frame;
use super::scene_builder::{compose_scene, empty_scene};
use super::{ChartEngineConfig, ChartScales, ChartScene, InteractionDispatch};

/// Where the current record set came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataStatus {
    #[default]
    Pending,
    Loaded,
    Failed { message: String },
}

/// Top-level state container and orchestration facade.
///
/// Owns the record set, filter state, series visibility and the derived
/// filtered subset, scales and scene. Every mutation goes through one entry
/// point per slice and re-renders synchronously.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) records: Vec<Record>,
    pub(super) data_status: DataStatus,
    pub(super) filters: FilterState,
    pub(super) visibility: VisibilitySet,
    pub(super) filtered: Vec<usize>,
    pub(super) scales: Option<ChartScales>,
    pub(super) scene: ChartScene,
    pub(super) interaction: InteractionState,
    pub(super) dispatch: InteractionDispatch<R>,
    pub(super) render_passes: u64,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let scene = empty_scene(&config);
        Ok(Self {
            renderer,
            config,
            records: Vec::new(),
            data_status: DataStatus::Pending,
            filters: FilterState::default(),
            visibility: VisibilitySet::default(),
            filtered: Vec::new(),
            scales: None,
            scene,
            interaction: InteractionState::default(),
            dispatch: InteractionDispatch::default(),
            render_passes: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn data_status(&self) -> &DataStatus {
        &self.data_status
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn visibility(&self) -> VisibilitySet {
        self.visibility
    }

    /// Filtered subset in source order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
        self.filtered.iter().filter_map(|index| self.records.get(*index))
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ChartScales> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn scene(&self) -> &ChartScene {
        &self.scene
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Number of completed scene rebuilds.
    #[must_use]
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Clears and rebuilds the scene from the cached filtered subset and
    /// scales, then presents it. Failures degrade to an empty scene.
    pub fn render(&mut self) -> ChartResult<()> {
        self.scene = match self.compose() {
            Ok(scene) => scene,
            Err(err) => {
                warn!(error = %err, "render pass failed; drawing nothing");
                empty_scene(&self.config)
            }
        };
        self.interaction.on_scene_rebuilt();
        self.render_passes += 1;
        debug!(
            pass = self.render_passes,
            filtered = self.filtered.len(),
            bars = self.scene.bar_count(),
            "scene rebuilt"
        );
        self.present()
    }

    /// Hands the current scene and tooltip, sampled at the animation clock, to
    /// the renderer without rebuilding anything.
    pub fn present(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        build_render_frame(
            &self.scene,
            self.interaction.tooltip(),
            self.interaction.clock_ms(),
        )
    }

    fn compose(&self) -> ChartResult<ChartScene> {
        let Some(scales) = &self.scales else {
            return Ok(empty_scene(&self.config));
        };
        let filtered: Vec<&Record> = self.filtered_records().collect();
        compose_scene(&filtered, scales, self.visibility, &self.config)
    }

    /// Re-runs the filter engine and scale builder; the empty subset leaves no
    /// scales behind.
    pub(super) fn recompute(&mut self) {
        self.filtered = filtered_indices(&self.records, &self.filters);
        if self.filtered.is_empty() {
            self.scales = None;
            return;
        }

        let filtered: Vec<&Record> = self.filtered_records().collect();
        self.scales = match ChartScales::build(&filtered, &self.config) {
            Ok(scales) => Some(scales),
            Err(err) => {
                warn!(error = %err, "scale build failed; chart will be empty");
                None
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartEngine, DataStatus};
    use crate::api::ChartEngineConfig;
    use crate::render::NullRenderer;

    #[test]
    fn fresh_engine_is_pending_and_empty() {
        let engine =
            ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default()).expect("engine");
        assert_eq!(engine.data_status(), &DataStatus::Pending);
        assert!(engine.scene().is_cleared());
        assert_eq!(engine.filtered_len(), 0);
        assert!(engine.scales().is_none());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = ChartEngineConfig::default().with_padding(1.5, 0.05);
        assert!(ChartEngine::new(NullRenderer::default(), config).is_err());
    }
}
