//! Floating label that follows the pointer over map features.
//!
//! The controller never reads a clock: every event carries the caller's
//! timestamp in milliseconds, and opacity is evaluated at a given instant.
//! A new event always interrupts the running fade, starting from whatever
//! opacity the label has at that moment.

use serde::Serialize;

/// Fade duration for showing and hiding.
pub const TRANSITION_MS: f64 = 200.0;

/// Label offset from the pointer, in pixels.
pub const POINTER_OFFSET: (f64, f64) = (10.0, -28.0);

/// Inline style for the label box.
pub const TOOLTIP_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("padding", "8px"),
    ("background-color", "rgba(0, 0, 0, 0.6)"),
    ("color", "#fff"),
    ("border-radius", "4px"),
    ("pointer-events", "none"),
    ("z-index", "1000"),
];

/// Pointer position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self { Self { x, y } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TooltipPhase {
    Hidden,
    Visible,
    Transitioning,
}

/// What an adapter needs to draw the label at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipView {
    pub html: String,
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
    pub phase: TooltipPhase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f64,
    to: f64,
    start: f64,
}

impl Fade {
    fn opacity(&self, now: f64) -> f64 {
        let t = ((now - self.start) / TRANSITION_MS).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    fn done(&self, now: f64) -> bool { now - self.start >= TRANSITION_MS }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipController {
    html: String,
    left: f64,
    top: f64,
    fade: Fade,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self {
            html: String::new(),
            left: 0.0,
            top: 0.0,
            fade: Fade { from: 0.0, to: 0.0, start: f64::NEG_INFINITY },
        }
    }
}

impl TooltipController {
    pub fn new() -> Self { Self::default() }

    /// Pointer entered a feature: set content and position, fade in.
    pub fn enter(&mut self, html: String, pointer: PointerEvent, now: f64) {
        self.html = html;
        self.position(pointer);
        self.fade_to(1.0, now);
    }

    /// Pointer moved within a feature: reposition only.
    pub fn move_to(&mut self, pointer: PointerEvent) { self.position(pointer) }

    /// Pointer left a feature: fade out, keeping content for the fade.
    pub fn leave(&mut self, now: f64) { self.fade_to(0.0, now) }

    pub fn opacity(&self, now: f64) -> f64 { self.fade.opacity(now) }

    pub fn phase(&self, now: f64) -> TooltipPhase {
        if !self.fade.done(now) && self.fade.from != self.fade.to {
            TooltipPhase::Transitioning
        } else if self.fade.to > 0.0 {
            TooltipPhase::Visible
        } else {
            TooltipPhase::Hidden
        }
    }

    pub fn view(&self, now: f64) -> TooltipView {
        TooltipView {
            html: self.html.clone(),
            left: self.left,
            top: self.top,
            opacity: self.opacity(now),
            phase: self.phase(now),
        }
    }

    fn position(&mut self, pointer: PointerEvent) {
        self.left = pointer.x + POINTER_OFFSET.0;
        self.top = pointer.y + POINTER_OFFSET.1;
    }

    fn fade_to(&mut self, to: f64, now: f64) {
        self.fade = Fade { from: self.fade.opacity(now), to, start: now };
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 { t * t * t / 2.0 } else { ((t - 2.0) * (t - 2.0) * (t - 2.0) + 2.0) / 2.0 }
}
