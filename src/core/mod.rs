pub mod animation;
pub mod band_scale;
pub mod color_scale;
pub mod filter;
pub mod record;
pub mod scale;
pub mod types;
pub mod visibility;

pub use animation::{Transition, ease_cubic_in_out};
pub use band_scale::BandScale;
pub use color_scale::{ColorScale, DEFAULT_SERIES_PALETTE};
pub use filter::{FilterKey, FilterState, apply_filters, filtered_indices};
pub use record::{Record, RecordField, Series, decode_records};
pub use scale::{DEFAULT_TICK_COUNT, LinearScale, format_tick, tick_increment, tick_step, ticks};
pub use types::{ChartLayout, Margins, Viewport};
pub use visibility::VisibilitySet;
