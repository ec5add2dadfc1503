use serde::{Deserialize, Serialize};

use crate::core::{Series, Transition};

/// Text shown for one hovered bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub series: Series,
    pub value: f64,
    pub country: Option<String>,
    pub region: Option<String>,
}

impl TooltipContent {
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{}: {}", self.series, self.value),
            format!("Country: {}", self.country.as_deref().unwrap_or_default()),
            format!("Region: {}", self.region.as_deref().unwrap_or_default()),
        ]
    }
}

/// Overlay tooltip in page coordinates with its current fade.
///
/// Content survives a fade-out until the fade finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    content: Option<TooltipContent>,
    left: f64,
    top: f64,
    fade: Transition,
    elapsed_ms: f64,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            content: None,
            left: 0.0,
            top: 0.0,
            fade: Transition::settled(0.0),
            elapsed_ms: 0.0,
        }
    }
}

impl TooltipState {
    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.fade.sample(self.elapsed_ms)
    }

    #[must_use]
    pub fn is_fading_out(&self) -> bool {
        self.fade.to < self.fade.from && !self.fade.is_finished(self.elapsed_ms)
    }

    /// Whether there is something on screen (content with non-zero opacity).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.content.is_some() && self.opacity() > 0.0
    }

    /// Starts a fade-in from the current opacity.
    pub fn show(
        &mut self,
        content: TooltipContent,
        left: f64,
        top: f64,
        opacity: f64,
        duration_ms: f64,
    ) {
        let current = if self.content.is_some() {
            self.opacity()
        } else {
            0.0
        };
        self.content = Some(content);
        self.left = left;
        self.top = top;
        self.fade = Transition::new(current, opacity, duration_ms);
        self.elapsed_ms = 0.0;
    }

    /// Starts a fade-out; content is dropped once it completes.
    pub fn hide(&mut self, duration_ms: f64) {
        if self.content.is_none() {
            return;
        }
        self.fade = Transition::new(self.opacity(), 0.0, duration_ms);
        self.elapsed_ms = 0.0;
        self.clear_if_faded();
    }

    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        self.clear_if_faded();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clear_if_faded(&mut self) {
        if self.fade.to <= 0.0 && self.fade.is_finished(self.elapsed_ms) {
            self.content = None;
        }
    }
}

/// Pointer/hover bookkeeping shared by the interaction handlers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    hovered: Option<(usize, Series)>,
    pointer: Option<(f64, f64)>,
    tooltip: TooltipState,
    clock_ms: f64,
}

impl InteractionState {
    #[must_use]
    pub fn hovered(&self) -> Option<(usize, Series)> {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: Option<(usize, Series)>) {
        self.hovered = hovered;
    }

    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn tooltip_mut(&mut self) -> &mut TooltipState {
        &mut self.tooltip
    }

    /// Milliseconds since the current scene was drawn.
    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.clock_ms += delta_ms;
        }
        self.tooltip.advance(delta_ms);
    }

    /// Drops hover and tooltip state and restarts the scene clock.
    pub fn on_scene_rebuilt(&mut self) {
        self.hovered = None;
        self.tooltip.reset();
        self.clock_ms = 0.0;
    }
}
