//! dashboard-chart: filterable grouped-bar chart engine.
//!
//! Records are narrowed by substring filters, scaled with d3-compatible band
//! and linear scales, and laid out as a deterministic scene graph that any
//! `Renderer` backend can draw. Interaction (hover tooltips, legend toggles,
//! filter input) is routed through an explicit event dispatch table.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartEvent, ChartScene, render_scene};
pub use error::{ChartError, ChartResult};
