use std::fmt::Write;

use geo::{Coord, LineString, MultiPolygon};

use super::proj::FittedProjection;

/// Builds SVG path data for projected shapes under a fitted viewport transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct PathBuilder {
    fitted: FittedProjection,
}

impl PathBuilder {
    pub(crate) fn new(fitted: FittedProjection) -> Self { Self { fitted } }

    pub(crate) fn path(&self, shape: &MultiPolygon<f64>) -> String {
        multipolygon_to_path(shape, &|coord| self.fitted.apply(coord))
    }
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &dyn Fn(&Coord<f64>) -> (f64, f64)) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), project, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, project, &mut out);
        }
    }

    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z".
/// The repeated closing coordinate of a closed ring is left to the `Z`.
fn ring_to_path(ring: &LineString<f64>, project: &dyn Fn(&Coord<f64>) -> (f64, f64), out: &mut String) {
    let coords = match ring.0.as_slice() {
        [] => return,
        [first, rest @ .., last] if first == last && !rest.is_empty() => &ring.0[..ring.0.len() - 1],
        all => all,
    };

    for (i, coord) in coords.iter().enumerate() {
        let (x, y) = project(coord);
        let cmd = if i == 0 { 'M' } else { 'L' };
        if !out.is_empty() { out.push(' ') }
        let _ = write!(out, "{cmd}{x:.3},{y:.3}");
    }
    out.push('Z');
}
