// File: crates/chart-core/src/hover.rs
// Summary: Per-mark hover state (Idle -> Hovered -> Idle) driving the chart's single tooltip.

use std::time::Duration;

use tracing::trace;

use crate::geometry::Point;
use crate::model::{HoverEffect, InteractiveMark, RenderModel};
use crate::tooltip::TooltipOverlay;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkState {
    #[default]
    Idle,
    Hovered,
}

/// Turns pointer events into mark states and tooltip show/hide calls.
/// At most one mark is hovered at a time.
#[derive(Clone, Debug)]
pub struct HoverController {
    bindings: Vec<InteractiveMark>,
    states: Vec<MarkState>,
    current: Option<usize>,
    tooltip: TooltipOverlay,
}

impl HoverController {
    pub fn new(model: &RenderModel, tooltip: TooltipOverlay) -> Self {
        let bindings = model.interactive.clone();
        let states = vec![MarkState::Idle; bindings.len()];
        Self { bindings, states, current: None, tooltip }
    }

    /// Pointer entered binding `index`. Any other hovered binding is left first.
    pub fn pointer_enter(&mut self, index: usize) {
        if index >= self.bindings.len() || self.current == Some(index) {
            return;
        }
        if let Some(prev) = self.current {
            self.pointer_leave(prev);
        }
        let b = &self.bindings[index];
        trace!(mark = b.mark, tooltip = %b.tooltip, "hover enter");
        self.states[index] = MarkState::Hovered;
        self.current = Some(index);
        self.tooltip.show(b.tooltip.clone(), b.anchor.x, b.anchor.y);
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if self.state(index) != MarkState::Hovered {
            return;
        }
        self.states[index] = MarkState::Idle;
        if self.current == Some(index) {
            self.current = None;
        }
        self.tooltip.hide();
    }

    /// Pointer moved to `p` (inner coordinates). Returns true if the hovered mark changed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let hit = self.bindings.iter().rposition(|b| b.hit.contains(p));
        if hit == self.current {
            return false;
        }
        match hit {
            Some(i) => self.pointer_enter(i),
            None => self.pointer_exit(),
        }
        true
    }

    /// Pointer left the chart surface.
    pub fn pointer_exit(&mut self) {
        if let Some(i) = self.current {
            self.pointer_leave(i);
        }
    }

    /// Advance the tooltip fade. Returns true while it still animates.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.tooltip.advance(dt)
    }

    pub fn state(&self, index: usize) -> MarkState {
        self.states.get(index).copied().unwrap_or_default()
    }

    pub fn hovered(&self) -> Option<&InteractiveMark> {
        self.current.and_then(|i| self.bindings.get(i))
    }

    /// Effect to apply to model mark `mark` right now, if it is the hovered one.
    pub fn effect_for(&self, mark: usize) -> Option<HoverEffect> {
        self.hovered().filter(|b| b.mark == mark).map(|b| b.effect)
    }

    pub fn tooltip(&self) -> &TooltipOverlay { &self.tooltip }
}
