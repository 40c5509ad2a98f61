use std::sync::Arc;

use geo::MultiPolygon;

use super::geo_level::GeoLevel;

/// One geographic unit of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geoid: String,
    pub geometry: MultiPolygon<f64>, // lon/lat degrees
    pub estimate: Option<f64>,
    pub level: GeoLevel,
}

impl Feature {
    pub fn new(geoid: impl Into<String>, geometry: MultiPolygon<f64>, estimate: Option<f64>, level: GeoLevel) -> Self {
        Self { geoid: geoid.into(), geometry, estimate, level }
    }

    /// The estimate if it is usable for coloring (present and not NaN).
    #[inline]
    pub fn value(&self) -> Option<f64> { self.estimate.filter(|v| !v.is_nan()) }
}

/// Ordered set of features sharing one level, rebuilt on every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Arc<Feature>>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Arc<Feature>>) -> Self { Self { features } }

    /// Select the features tagged with `level`, preserving input order.
    pub fn filter_level(features: &[Arc<Feature>], level: &GeoLevel) -> Self {
        Self {
            features: features.iter()
                .filter(|feature| &feature.level == level)
                .cloned()
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.features.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.features.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> { self.features.iter().map(|f| f.as_ref()) }

    pub fn get(&self, idx: usize) -> Option<&Feature> { self.features.get(idx).map(|f| f.as_ref()) }

    pub fn shapes(&self) -> impl Iterator<Item = &MultiPolygon<f64>> { self.iter().map(|f| &f.geometry) }

    /// Largest usable estimate, or None when no feature carries one.
    pub fn max_estimate(&self) -> Option<f64> {
        self.iter()
            .filter_map(Feature::value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}
