use std::fmt;

use serde::{Serialize, Serializer};

use crate::{config::MapOptions, types::GeoLevel};

/// Pan/zoom transform: screen = k * point + (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self { Self::IDENTITY }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { x: 0.0, y: 0.0, k: 1.0 };

    pub fn new(x: f64, y: f64, k: f64) -> Self { Self { x, y, k } }

    #[inline]
    pub fn apply(&self, (px, py): (f64, f64)) -> (f64, f64) { (px * self.k + self.x, py * self.k + self.y) }

    #[inline]
    pub fn invert(&self, (sx, sy): (f64, f64)) -> (f64, f64) { ((sx - self.x) / self.k, (sy - self.y) / self.k) }

    /// Multiply the scale by `factor`, keeping the screen point `anchor` fixed.
    pub fn scale_about(&self, anchor: (f64, f64), factor: f64) -> Self {
        let (px, py) = self.invert(anchor);
        let k = self.k * factor;
        Self { x: anchor.0 - px * k, y: anchor.1 - py * k, k }
    }

    pub fn translate_by(&self, dx: f64, dy: f64) -> Self { Self { x: self.x + dx, y: self.y + dy, k: self.k } }

    /// Integer zoom level: scale rounded to the nearest integer, ties up.
    #[inline]
    pub fn zoom_level(&self) -> i64 { round_half_up(self.k) }
}

impl fmt::Display for ZoomTransform {
    /// SVG transform attribute: translate(x,y) scale(k)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

impl Serialize for ZoomTransform {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> { s.collect_str(self) }
}

#[inline]
fn round_half_up(v: f64) -> i64 { (v + 0.5).floor() as i64 }

/// Result of one zoom event.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomOutcome {
    /// Transform to put on the rendered group; None when zoom is disabled.
    pub transform: Option<ZoomTransform>,
    /// New granularity level when the event crossed the threshold.
    pub switched_to: Option<GeoLevel>,
}

/// Two-state (tract / block group) zoom machine with an optional hysteresis band.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    transform: ZoomTransform,
    level: GeoLevel,
    threshold: Option<u32>,
    hysteresis: f64,
    extent: [f64; 2],
    enabled: bool,
}

impl ZoomController {
    pub fn new(options: &MapOptions) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            level: options.geog.clone(),
            threshold: options.zoom_threshold,
            hysteresis: options.zoom_hysteresis,
            extent: options.scale_extent,
            enabled: options.zoom,
        }
    }

    #[inline]
    pub fn transform(&self) -> ZoomTransform { self.transform }

    #[inline]
    pub fn level(&self) -> &GeoLevel { &self.level }

    /// Apply a zoom gesture. The scale is clamped to the configured extent.
    pub fn on_zoom(&mut self, transform: ZoomTransform) -> ZoomOutcome {
        let [lo, hi] = self.extent;
        let transform = ZoomTransform { k: transform.k.clamp(lo, hi), ..transform };
        self.transform = transform;

        let switched_to = self.threshold.and_then(|threshold| self.switch(transform.k, threshold as i64));
        if let Some(level) = &switched_to {
            log::debug!("[zoom] k={:.3} crossed threshold, switching to {level}", transform.k);
        }

        ZoomOutcome { transform: self.enabled.then_some(transform), switched_to }
    }

    fn switch(&mut self, k: f64, threshold: i64) -> Option<GeoLevel> {
        let target = if round_half_up(k) >= threshold {
            GeoLevel::BlockGroup
        } else if round_half_up(k + self.hysteresis) < threshold {
            GeoLevel::Tract
        } else {
            return None;
        };

        if self.level == target { return None }
        self.level = target.clone();
        Some(target)
    }
}
