//! Render options for the choropleth and contour pipelines.
//!
//! Options are plain values handed to each render entry point; nothing here
//! is shared or mutated between renders. Both structs deserialize from the
//! JSON option objects the map pages use, so `{"zoomThreshold": 4}` and
//! `{"zoom_threshold": 4}` are accepted alike.

use std::{fmt, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::types::GeoLevel;

/// Options for the choropleth pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Initial granularity level.
    pub geog: GeoLevel,
    /// Fill for features without a usable estimate.
    pub na_color: String,
    /// Apply zoom transforms to the rendered group.
    pub zoom: bool,
    /// Integer zoom level at which the map switches to block groups.
    #[serde(rename = "zoomThreshold", alias = "zoom_threshold")]
    pub zoom_threshold: Option<u32>,
    /// Extra zoom beyond the threshold needed before switching back to tracts.
    #[serde(alias = "zoomHysteresis")]
    pub zoom_hysteresis: f64,
    #[serde(alias = "scaleExtent")]
    pub scale_extent: [f64; 2],
    pub width: f64,
    pub height: f64,
    /// Text placed before the formatted estimate in tooltips, e.g. "$".
    #[serde(alias = "estimatePrefix")]
    pub estimate_prefix: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            geog: GeoLevel::Tract,
            na_color: "gray".to_string(),
            zoom: true,
            zoom_threshold: None,
            zoom_hysteresis: 0.0,
            scale_extent: [1.0, 8.0],
            width: 800.0,
            height: 600.0,
            estimate_prefix: String::new(),
        }
    }
}

impl MapOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)
            .context("[config] failed to parse map options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] failed to read {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("[config] viewport must be positive, got {}x{}", self.width, self.height);
        }
        let [lo, hi] = self.scale_extent;
        if !(lo > 0.0 && lo <= hi) {
            bail!("[config] invalid scale extent [{lo}, {hi}]");
        }
        if !(self.zoom_hysteresis >= 0.0) {
            bail!("[config] zoom hysteresis must be non-negative, got {}", self.zoom_hysteresis);
        }
        Ok(())
    }
}

/// Color ramp selection for contour bands. Unrecognized names fall back to viridis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorChoice {
    Blues,
    Greens,
    Reds,
    #[default]
    Viridis,
}

impl ColorChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorChoice::Blues => "blues",
            ColorChoice::Greens => "greens",
            ColorChoice::Reds => "reds",
            ColorChoice::Viridis => "viridis",
        }
    }
}

impl From<&str> for ColorChoice {
    fn from(name: &str) -> Self {
        match name {
            "blues" => ColorChoice::Blues,
            "greens" => ColorChoice::Greens,
            "reds" => ColorChoice::Reds,
            _ => ColorChoice::Viridis,
        }
    }
}

impl From<String> for ColorChoice {
    fn from(name: String) -> Self { ColorChoice::from(name.as_str()) }
}

impl From<ColorChoice> for String {
    fn from(choice: ColorChoice) -> Self { choice.as_str().to_string() }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Options for the contour pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    /// Spacing between contour thresholds.
    pub interval: f64,
    pub color_choice: ColorChoice,
    /// Pixels per grid cell.
    pub pixel_resolution: f64,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self { interval: 10.0, color_choice: ColorChoice::Viridis, pixel_resolution: 1.0 }
    }
}

impl ContourOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)
            .context("[config] failed to parse contour options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] failed to read {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.interval > 0.0 && self.interval.is_finite()) {
            bail!("[config] contour interval must be positive, got {}", self.interval);
        }
        if !(self.pixel_resolution > 0.0 && self.pixel_resolution.is_finite()) {
            bail!("[config] pixel resolution must be positive, got {}", self.pixel_resolution);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_defaults_match_page_defaults() {
        let options = MapOptions::from_json_str("{}").unwrap();
        assert_eq!(options.geog, GeoLevel::Tract);
        assert_eq!(options.na_color, "gray");
        assert!(options.zoom);
        assert_eq!(options.zoom_threshold, None);
        assert_eq!(options.scale_extent, [1.0, 8.0]);
    }

    #[test]
    fn page_option_names_are_accepted() {
        let options = MapOptions::from_json_str(
            r##"{"geog": "cbg", "na_color": "#ccc", "zoom": false, "zoomThreshold": 4}"##,
        ).unwrap();
        assert_eq!(options.geog, GeoLevel::BlockGroup);
        assert_eq!(options.na_color, "#ccc");
        assert!(!options.zoom);
        assert_eq!(options.zoom_threshold, Some(4));

        let options = MapOptions::from_json_str(r#"{"zoom_threshold": 6}"#).unwrap();
        assert_eq!(options.zoom_threshold, Some(6));
    }

    #[test]
    fn bad_viewport_is_rejected() {
        assert!(MapOptions::from_json_str(r#"{"width": 0}"#).is_err());
        assert!(MapOptions::from_json_str(r#"{"scale_extent": [4, 2]}"#).is_err());
    }

    #[test]
    fn color_choice_falls_back_to_viridis() {
        let options = ContourOptions::from_json_str(r#"{"color_choice": "purples"}"#).unwrap();
        assert_eq!(options.color_choice, ColorChoice::Viridis);
        let options = ContourOptions::from_json_str(r#"{"color_choice": "reds", "interval": 5}"#).unwrap();
        assert_eq!(options.color_choice, ColorChoice::Reds);
        assert_eq!(options.interval, 5.0);
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        assert!(ContourOptions::from_json_str(r#"{"interval": 0}"#).is_err());
        assert!(ContourOptions::from_json_str(r#"{"pixel_resolution": -1}"#).is_err());
    }
}
