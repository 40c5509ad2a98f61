//! Feature records from JSON.
//!
//! Two layouts are accepted: a bare array of records
//! `{GEOID, geometry, estimate, level}`, or a GeoJSON FeatureCollection
//! whose features carry the same keys in `properties`.

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use crate::types::{Feature, GeoLevel};

use super::source::DataSource;

/// Decode feature records.
pub fn read_features(bytes: &[u8]) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[io::json] failed to parse feature JSON")?;

    match &value {
        Value::Array(records) => records.iter().enumerate()
            .map(|(i, record)| {
                let record = record.as_object()
                    .ok_or_else(|| anyhow!("[io::json] record {i} is not an object"))?;
                parse_record(record, record.get("geometry"))
                    .with_context(|| format!("[io::json] invalid record {i}"))
            })
            .collect(),
        Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("FeatureCollection") => {
            let features = obj.get("features").and_then(Value::as_array)
                .ok_or_else(|| anyhow!("[io::json] FeatureCollection has no features array"))?;
            features.iter().enumerate()
                .map(|(i, feature)| {
                    let properties = feature.get("properties").and_then(Value::as_object)
                        .ok_or_else(|| anyhow!("[io::json] feature {i} has no properties"))?;
                    parse_record(properties, feature.get("geometry"))
                        .with_context(|| format!("[io::json] invalid feature {i}"))
                })
                .collect()
        }
        _ => bail!("[io::json] expected an array of records or a FeatureCollection"),
    }
}

/// Fetch and decode feature records from a source.
pub fn read_features_from(source: &dyn DataSource) -> Result<Vec<Feature>> {
    let bytes = source.fetch()?;
    read_features(&bytes).with_context(|| format!("[io::json] failed to read {}", source.describe()))
}

fn parse_record(record: &Map<String, Value>, geometry: Option<&Value>) -> Result<Feature> {
    let geoid = match record.get("GEOID") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => bail!("missing GEOID"),
    };

    // A record without a level matches no filter and is never drawn.
    let level = match record.get("level").and_then(Value::as_str) {
        Some(tag) => GeoLevel::from_tag(tag),
        None => {
            log::warn!("[io::json] GEOID {geoid}: missing level, record will not match any level");
            GeoLevel::Other(String::new())
        }
    };

    // Unusable geometry draws as an empty path instead of failing the load.
    let geometry = match geometry.filter(|g| !g.is_null()) {
        None => MultiPolygon(vec![]),
        Some(geometry) => parse_geometry(geometry).unwrap_or_else(|err| {
            log::warn!("[io::json] GEOID {geoid}: {err:#}, drawing nothing");
            MultiPolygon(vec![])
        }),
    };

    Ok(Feature::new(geoid, geometry, parse_estimate(record.get("estimate")), level))
}

/// Numbers are used as-is and numeric strings are parsed; anything else is missing.
fn parse_estimate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    }
}

/// GeoJSON Polygon or MultiPolygon into a MultiPolygon.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = geometry.get("coordinates").and_then(Value::as_array)
        .ok_or_else(|| anyhow!("geometry has no coordinates"))?;

    match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon(coords)?])),
        Some("MultiPolygon") => coords.iter()
            .map(|polygon| {
                let rings = polygon.as_array().ok_or_else(|| anyhow!("polygon is not an array"))?;
                parse_polygon(rings)
            })
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon),
        Some(other) => bail!("unsupported geometry type {other}"),
        None => bail!("geometry has no type"),
    }
}

/// [exterior, hole, hole, ...]
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no rings"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(ring: &Value) -> Result<LineString<f64>> {
    let points = ring.as_array().ok_or_else(|| anyhow!("ring is not an array"))?;
    points.iter()
        .map(|point| {
            let xy = point.as_array().filter(|xy| xy.len() >= 2)
                .ok_or_else(|| anyhow!("position must be [x, y]"))?;
            match (xy[0].as_f64(), xy[1].as_f64()) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => bail!("position has non-numeric coordinates"),
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString)
}
