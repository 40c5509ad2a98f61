use geo::{Coord, MultiPolygon};
use serde::Serialize;

/// Region of the grid where samples are at or above `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourPolygon {
    pub value: f64,
    #[serde(serialize_with = "serialize_rings")]
    pub geometry: MultiPolygon<f64>,
}

impl ContourPolygon {
    /// Scale every coordinate by `factor` (grid cells -> pixels).
    pub fn scaled(&self, factor: f64) -> Self {
        use geo::MapCoords;
        Self {
            value: self.value,
            geometry: self.geometry.map_coords(|c| Coord { x: c.x * factor, y: c.y * factor }),
        }
    }

    pub fn is_empty(&self) -> bool { self.geometry.0.is_empty() }
}

/// GeoJSON-style nesting: polygons -> rings -> [x, y].
fn serialize_rings<S: serde::Serializer>(shape: &MultiPolygon<f64>, s: S) -> Result<S::Ok, S::Error> {
    let rings: Vec<Vec<Vec<[f64; 2]>>> = shape.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.0.iter().map(|c| [c.x, c.y]).collect())
                .collect()
        })
        .collect();
    serde::Serialize::serialize(&rings, s)
}

/// Twice the signed area; positive for exteriors in y-down grid space.
pub(super) fn ring_area(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    if n == 0 { return 0.0 }
    let mut area = ring[n - 1].y * ring[0].x - ring[n - 1].x * ring[0].y;
    for i in 1..n {
        area += ring[i - 1].y * ring[i].x - ring[i - 1].x * ring[i].y;
    }
    area
}

/// 1 if `hole` lies inside `ring`, -1 if outside, 0 if it touches the boundary.
/// Decided by the first hole vertex that is not on the boundary.
pub(super) fn ring_contains_ring(ring: &[Coord<f64>], hole: &[Coord<f64>]) -> i8 {
    for point in hole {
        let c = ring_contains_point(ring, point);
        if c != 0 { return c }
    }
    0
}

fn ring_contains_point(ring: &[Coord<f64>], point: &Coord<f64>) -> i8 {
    let (x, y) = (point.x, point.y);
    let mut contains = -1;
    let n = ring.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if segment_contains(&pi, &pj, point) { return 0 }
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            contains = -contains;
        }
        j = i;
    }
    contains
}

fn segment_contains(a: &Coord<f64>, b: &Coord<f64>, c: &Coord<f64>) -> bool {
    let collinear = (b.x - a.x) * (c.y - a.y) == (c.x - a.x) * (b.y - a.y);
    if !collinear { return false }
    let (p, q, r) = if a.x == b.x { (a.y, c.y, b.y) } else { (a.x, c.x, b.x) };
    (p <= q && q <= r) || (r <= q && q <= p)
}
