mod axis_scene_builder;
mod bar_scene_builder;
mod chart_scene;
mod data_controller;
mod data_source;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod legend_scene_builder;
mod render_frame_builder;
mod scale_coordinator;
mod scene_builder;

pub use axis_scene_builder::group_label_stride;
pub use chart_scene::{
    AxisOrientation, AxisScene, AxisTick, BarAnimation, BarGroupScene, BarKey, BarScene,
    ChartScene, LegendEntry, LegendScene,
};
#[cfg(feature = "http-source")]
pub use data_source::HttpRecordSource;
pub use data_source::{DEFAULT_ENDPOINT, JsonRecordSource, RecordSource, load_records};
pub use engine::{ChartEngine, DataStatus};
pub use engine_config::{
    AxisStyleBehavior, ChartEngineConfig, GroupAxisLabelBehavior, LegendBehavior, MAX_VALUE_TICK_COUNT,
    TooltipBehavior,
};
pub use engine_snapshot::EngineSnapshot;
pub use interaction_controller::{ChartEvent, ChartEventKind, EventHandler, InteractionDispatch};
pub use render_frame_builder::build_render_frame;
pub use scale_coordinator::ChartScales;
pub use scene_builder::{compose_scene, empty_scene, render_scene, try_render_scene};
