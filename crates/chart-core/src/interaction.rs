// File: crates/chart-core/src/interaction.rs
// Summary: Pointer gesture state machine (pan / price zoom / time zoom) and the two-phase
// pinning of price and time guide lines.

use std::collections::BTreeSet;

use crate::geometry::PointF;
use crate::model::ClusterModel;
use crate::types::Repaint;
use crate::view::ViewportTransform;

/// Active drag gesture. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Idle,
    /// Drag started in the chart body: translate offsets.
    Pan,
    /// Drag started in the price gutter: vertical zoom.
    ScalePrice,
    /// Drag started in the time gutter: horizontal zoom.
    ScaleTime,
}

/// Pinned guide lines of one axis plus the armed candidate line.
///
/// First click arms a line (removing it from the pinned set while it is previewed),
/// hovering moves the candidate, the next click in the same gutter commits it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinePins {
    pinned: BTreeSet<usize>,
    candidate: Option<usize>,
}

impl LinePins {
    pub fn pinned(&self) -> &BTreeSet<usize> { &self.pinned }
    pub fn candidate(&self) -> Option<usize> { self.candidate }
    pub fn is_armed(&self) -> bool { self.candidate.is_some() }

    /// Click at line `idx`: arm when idle, commit the candidate when armed.
    pub fn click(&mut self, idx: usize) {
        match self.candidate.take() {
            Some(candidate) => {
                self.pinned.insert(candidate);
            }
            None => {
                self.pinned.remove(&idx);
                self.candidate = Some(idx);
            }
        }
    }

    /// Move the armed candidate; no effect when idle.
    pub fn hover(&mut self, idx: usize) {
        if let Some(c) = self.candidate.as_mut() {
            *c = idx;
        }
    }

    /// Drop the armed candidate without pinning it.
    pub fn disarm(&mut self) {
        self.candidate = None;
    }

    pub fn clear(&mut self) {
        self.pinned.clear();
        self.candidate = None;
    }
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    mode: DragMode,
    press: Option<PointF>,
    last: Option<PointF>,
    pub prices: LinePins,
    pub times: LinePins,
}

impl InteractionController {
    pub fn new() -> Self { Self::default() }

    pub fn mode(&self) -> DragMode { self.mode }

    /// Forget gestures and pins; required whenever the model indices change.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pointer moved without a button held.
    pub fn on_hover(&mut self, p: PointF, view: &ViewportTransform) -> Repaint {
        if self.mode != DragMode::Idle {
            return Repaint::Skip;
        }
        let regions = view.regions();
        if self.prices.is_armed() {
            if regions.price_scale.contains(p) {
                self.prices.hover(view.price_index_at(p.y));
            } else {
                self.prices.disarm();
            }
            return Repaint::Needed;
        }
        if self.times.is_armed() {
            if regions.time_scale.contains(p) {
                self.times.hover(view.time_index_at(p.x));
            } else {
                self.times.disarm();
            }
            return Repaint::Needed;
        }
        Repaint::Skip
    }

    /// Button pressed: pick the gesture by first-match region priority.
    pub fn on_drag_start(&mut self, p: PointF, view: &ViewportTransform) {
        let regions = view.regions();
        self.press = Some(p);
        self.last = Some(p);
        self.mode = if regions.chart.contains(p) {
            DragMode::Pan
        } else if regions.price_scale.contains(p) {
            DragMode::ScalePrice
        } else if regions.time_scale.contains(p) {
            DragMode::ScaleTime
        } else {
            DragMode::Idle
        };
    }

    /// Pointer moved with the button held.
    pub fn on_drag_update(&mut self, p: PointF, view: &mut ViewportTransform, model: &ClusterModel) -> Repaint {
        let Some(last) = self.last.replace(p) else { return Repaint::Skip };
        let (dx, dy) = (p.x - last.x, p.y - last.y);
        match self.mode {
            DragMode::Idle => return Repaint::Skip,
            DragMode::Pan => view.set_offset(dx, dy, model),
            DragMode::ScalePrice => view.set_scale_y(dy, model),
            DragMode::ScaleTime => view.set_scale_x(dx, model),
        }
        Repaint::Needed
    }

    /// Button released. A release at the press point is a click.
    pub fn on_drag_end(&mut self, p: PointF, view: &ViewportTransform) -> Repaint {
        let clicked = self.press == Some(p);
        let repaint = if clicked { self.on_click(p, view) } else { Repaint::Skip };
        self.mode = DragMode::Idle;
        self.press = None;
        self.last = None;
        repaint
    }

    fn on_click(&mut self, p: PointF, view: &ViewportTransform) -> Repaint {
        let regions = view.regions();
        if regions.price_scale.contains(p) && !view.prices.is_empty() {
            self.prices.click(view.price_index_at(p.y));
            Repaint::Needed
        } else if regions.time_scale.contains(p) && !view.times.is_empty() {
            self.times.click(view.time_index_at(p.x));
            Repaint::Needed
        } else {
            Repaint::Skip
        }
    }
}
