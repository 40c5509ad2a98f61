use crate::types::FeatureCollection;

use super::{color::Rgb, ramp::ColorRamp};

/// Sequential scale: a numeric domain mapped linearly onto a color ramp,
/// with a fallback fill for missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    ramp: ColorRamp,
    domain: [f64; 2],
    na_color: String,
}

impl ColorScale {
    pub fn new(ramp: ColorRamp, domain: [f64; 2], na_color: impl Into<String>) -> Self {
        Self { ramp, domain, na_color: na_color.into() }
    }

    /// Domain [0, max estimate] over the current features.
    pub fn for_features(features: &FeatureCollection, ramp: ColorRamp, na_color: impl Into<String>) -> Self {
        let max = features.max_estimate().unwrap_or(0.0);
        Self::new(ramp, [0.0, max], na_color)
    }

    pub fn domain(&self) -> [f64; 2] { self.domain }

    /// Position of `value` within the domain; a collapsed domain maps everything to 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        if d0 == d1 { 0.5 } else { (value - d0) / (d1 - d0) }
    }

    pub fn color(&self, value: f64) -> Rgb { self.ramp.at(self.normalize(value)) }

    /// CSS fill for an estimate; None and NaN get the fallback color.
    pub fn fill(&self, estimate: Option<f64>) -> String {
        match estimate {
            Some(v) if !v.is_nan() => self.color(v).to_string(),
            _ => self.na_color.clone(),
        }
    }
}
