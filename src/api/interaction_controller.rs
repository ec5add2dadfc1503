use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Record, Series};
use crate::error::ChartResult;
use crate::interaction::TooltipContent;
use crate::render::Renderer;

use super::{BarKey, ChartEngine};

/// Host input routed through the engine's dispatch table.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    RecordsLoaded(Vec<Record>),
    FetchFailed(String),
    FilterInput { name: String, value: String },
    LegendClick { series: Series },
    /// Canvas coordinates.
    PointerDown { x: f64, y: f64 },
    /// `x`/`y` are canvas coordinates, `page_x`/`page_y` position the tooltip.
    PointerMove {
        x: f64,
        y: f64,
        page_x: f64,
        page_y: f64,
    },
    PointerLeave,
    Tick { delta_ms: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartEventKind {
    RecordsLoaded,
    FetchFailed,
    FilterInput,
    LegendClick,
    PointerDown,
    PointerMove,
    PointerLeave,
    Tick,
}

impl ChartEventKind {
    pub const ALL: [Self; 8] = [
        Self::RecordsLoaded,
        Self::FetchFailed,
        Self::FilterInput,
        Self::LegendClick,
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerLeave,
        Self::Tick,
    ];
}

impl ChartEvent {
    #[must_use]
    pub fn kind(&self) -> ChartEventKind {
        match self {
            Self::RecordsLoaded(_) => ChartEventKind::RecordsLoaded,
            Self::FetchFailed(_) => ChartEventKind::FetchFailed,
            Self::FilterInput { .. } => ChartEventKind::FilterInput,
            Self::LegendClick { .. } => ChartEventKind::LegendClick,
            Self::PointerDown { .. } => ChartEventKind::PointerDown,
            Self::PointerMove { .. } => ChartEventKind::PointerMove,
            Self::PointerLeave => ChartEventKind::PointerLeave,
            Self::Tick { .. } => ChartEventKind::Tick,
        }
    }
}

pub type EventHandler<R> = fn(&mut ChartEngine<R>, ChartEvent) -> ChartResult<()>;

/// Event kind to handler table.
pub struct InteractionDispatch<R: Renderer> {
    handlers: IndexMap<ChartEventKind, EventHandler<R>>,
}

impl<R: Renderer> Default for InteractionDispatch<R> {
    fn default() -> Self {
        let mut handlers: IndexMap<ChartEventKind, EventHandler<R>> = IndexMap::new();
        handlers.insert(ChartEventKind::RecordsLoaded, on_records_loaded::<R>);
        handlers.insert(ChartEventKind::FetchFailed, on_fetch_failed::<R>);
        handlers.insert(ChartEventKind::FilterInput, on_filter_input::<R>);
        handlers.insert(ChartEventKind::LegendClick, on_legend_click::<R>);
        handlers.insert(ChartEventKind::PointerDown, on_pointer_down::<R>);
        handlers.insert(ChartEventKind::PointerMove, on_pointer_move::<R>);
        handlers.insert(ChartEventKind::PointerLeave, on_pointer_leave::<R>);
        handlers.insert(ChartEventKind::Tick, on_tick::<R>);
        Self { handlers }
    }
}

impl<R: Renderer> InteractionDispatch<R> {
    #[must_use]
    pub fn handler(&self, kind: ChartEventKind) -> Option<EventHandler<R>> {
        self.handlers.get(&kind).copied()
    }

    /// Replaces one handler, returning the previous one.
    pub fn set_handler(
        &mut self,
        kind: ChartEventKind,
        handler: EventHandler<R>,
    ) -> Option<EventHandler<R>> {
        self.handlers.insert(kind, handler)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Routes one event through the dispatch table. Kinds without a handler
    /// are ignored.
    pub fn handle_event(&mut self, event: ChartEvent) -> ChartResult<()> {
        let kind = event.kind();
        let Some(handler) = self.dispatch.handler(kind) else {
            trace!(?kind, "no handler registered");
            return Ok(());
        };
        handler(self, event)
    }

    /// Overrides the handler for one event kind.
    pub fn set_event_handler(
        &mut self,
        kind: ChartEventKind,
        handler: EventHandler<R>,
    ) -> Option<EventHandler<R>> {
        self.dispatch.set_handler(kind, handler)
    }

    #[must_use]
    pub fn hovered_bar(&self) -> Option<BarKey> {
        self.interaction
            .hovered()
            .map(|(group, series)| BarKey { group, series })
    }

    /// Advances animations and re-presents the current scene.
    pub fn advance(&mut self, delta_ms: f64) -> ChartResult<()> {
        self.interaction.advance(delta_ms);
        self.present()
    }

    /// Hover update for a pointer at canvas `(x, y)` and page `(page_x, page_y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64, page_x: f64, page_y: f64) -> ChartResult<()> {
        self.interaction.on_pointer_move(x, y);
        // legend swatches are drawn above the bars and take the pointer first
        let hit = if self.scene.hit_test_legend(x, y).is_some() {
            None
        } else {
            self.scene.hit_test_bar(x, y, self.interaction.clock_ms())
        };

        match hit {
            Some(key) if self.hovered_bar() == Some(key) => {}
            Some(key) => {
                let Some(content) = self.tooltip_content(key) else {
                    return Ok(());
                };
                let behavior = self.config.tooltip;
                self.interaction.set_hovered(Some((key.group, key.series)));
                self.interaction.tooltip_mut().show(
                    content,
                    page_x + behavior.offset_x,
                    page_y + behavior.offset_y,
                    behavior.opacity,
                    behavior.fade_in_ms,
                );
                trace!(group = key.group, series = key.series.as_str(), "bar hovered");
            }
            None => self.leave_bar(),
        }
        self.present()
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.on_pointer_leave();
        self.leave_bar();
        self.present()
    }

    /// Toggles the series whose legend swatch is under canvas `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<Option<Series>> {
        let Some(series) = self.scene.hit_test_legend(x, y) else {
            return Ok(None);
        };
        self.toggle_series(series)?;
        Ok(Some(series))
    }

    fn leave_bar(&mut self) {
        if self.interaction.hovered().is_none() {
            return;
        }
        self.interaction.set_hovered(None);
        let fade_out = self.config.tooltip.fade_out_ms;
        self.interaction.tooltip_mut().hide(fade_out);
    }

    fn tooltip_content(&self, key: BarKey) -> Option<TooltipContent> {
        let group = self.scene.groups.get(key.group)?;
        let bar = group.bar(key.series)?;
        Some(TooltipContent {
            series: key.series,
            value: bar.value,
            country: group.country.clone(),
            region: group.region.clone(),
        })
    }
}

fn on_records_loaded<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::RecordsLoaded(records) => engine.set_records(records),
        _ => Ok(()),
    }
}

fn on_fetch_failed<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::FetchFailed(message) => engine.records_failed(message),
        _ => Ok(()),
    }
}

fn on_filter_input<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::FilterInput { name, value } => engine.set_filter_by_name(&name, value),
        _ => Ok(()),
    }
}

fn on_legend_click<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::LegendClick { series } => engine.toggle_series(series).map(|_| ()),
        _ => Ok(()),
    }
}

fn on_pointer_down<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::PointerDown { x, y } => engine.pointer_down(x, y).map(|_| ()),
        _ => Ok(()),
    }
}

fn on_pointer_move<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::PointerMove {
            x,
            y,
            page_x,
            page_y,
        } => engine.pointer_move(x, y, page_x, page_y),
        _ => Ok(()),
    }
}

fn on_pointer_leave<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::PointerLeave => engine.pointer_leave(),
        _ => Ok(()),
    }
}

fn on_tick<R: Renderer>(engine: &mut ChartEngine<R>, event: ChartEvent) -> ChartResult<()> {
    match event {
        ChartEvent::Tick { delta_ms } => engine.advance(delta_ms),
        _ => Ok(()),
    }
}
