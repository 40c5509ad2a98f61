//! Marching squares over a grid whose samples sit at cell centers.
//!
//! For each threshold the grid is treated as padded with below-threshold
//! samples, so every ring closes. Segments are stitched into rings as they
//! are emitted, ring vertices are then slid along their edge by linear
//! interpolation, and rings are split into exteriors (positive area) and
//! holes (negative area). Each hole joins the first exterior containing it.

use std::collections::VecDeque;

use ahash::AHashMap;
use geo::{Coord, LineString, MultiPolygon, Polygon};

use super::{
    grid::Grid,
    polygon::{ContourPolygon, ring_area, ring_contains_ring},
};

/// Vertex in doubled grid units, so edge midpoints stay integral.
type Key = (i64, i64);

/// Segment endpoints in doubled cell-local units: 1 = 0.5, 2 = 1.0, 3 = 1.5.
type Segment = [(i64, i64); 2];

/// Segments per cell case. Case bits: 1 = bottom-left, 2 = bottom-right,
/// 4 = top-right, 8 = top-left (y grows downward).
const CASES: [&[Segment]; 16] = [
    &[],
    &[[(2, 3), (1, 2)]],
    &[[(3, 2), (2, 3)]],
    &[[(3, 2), (1, 2)]],
    &[[(2, 1), (3, 2)]],
    &[[(2, 3), (1, 2)], [(2, 1), (3, 2)]],
    &[[(2, 1), (2, 3)]],
    &[[(2, 1), (1, 2)]],
    &[[(1, 2), (2, 1)]],
    &[[(2, 3), (2, 1)]],
    &[[(1, 2), (2, 1)], [(3, 2), (2, 3)]],
    &[[(3, 2), (2, 1)]],
    &[[(1, 2), (3, 2)]],
    &[[(2, 3), (3, 2)]],
    &[[(1, 2), (2, 3)]],
    &[],
];

/// Compute one contour per threshold.
pub fn isobands(grid: &Grid, thresholds: &[f64]) -> Vec<ContourPolygon> {
    thresholds.iter()
        .map(|&value| contour(grid, value))
        .collect()
}

fn contour(grid: &Grid, value: f64) -> ContourPolygon {
    let mut exteriors: Vec<Vec<Vec<Coord<f64>>>> = Vec::new();
    let mut holes: Vec<Vec<Coord<f64>>> = Vec::new();

    for ring in isorings(grid, value) {
        let mut ring: Vec<Coord<f64>> = ring.into_iter()
            .map(|(x, y)| Coord { x: x as f64 / 2.0, y: y as f64 / 2.0 })
            .collect();
        smooth_linear(&mut ring, grid, value);
        if ring_area(&ring) > 0.0 { exteriors.push(vec![ring]) } else { holes.push(ring) }
    }

    for hole in holes {
        if let Some(polygon) = exteriors.iter_mut().find(|p| ring_contains_ring(&p[0], &hole) != -1) {
            polygon.push(hole);
        }
    }

    let polygons = exteriors.into_iter()
        .map(|mut rings| {
            let exterior = LineString(rings.remove(0));
            Polygon::new(exterior, rings.into_iter().map(LineString).collect())
        })
        .collect();

    ContourPolygon { value, geometry: MultiPolygon(polygons) }
}

/// Open chain of stitched vertices.
struct Fragment {
    start: Key,
    end: Key,
    ring: VecDeque<Key>,
}

/// Collects segments and joins them into closed rings.
#[derive(Default)]
struct Stitcher {
    fragments: Vec<Option<Fragment>>,
    by_start: AHashMap<Key, usize>,
    by_end: AHashMap<Key, usize>,
    rings: Vec<Vec<Key>>,
}

impl Stitcher {
    fn cell(&mut self, case: usize, x: i64, y: i64) {
        for segment in CASES[case] {
            let start = (segment[0].0 + 2 * x, segment[0].1 + 2 * y);
            let end = (segment[1].0 + 2 * x, segment[1].1 + 2 * y);
            self.stitch(start, end);
        }
    }

    fn stitch(&mut self, start: Key, end: Key) {
        if let Some(&f) = self.by_end.get(&start) {
            if let Some(&g) = self.by_start.get(&end) {
                self.by_end.remove(&start);
                self.by_start.remove(&end);
                if f == g {
                    if let Some(mut fragment) = self.fragments[f].take() {
                        fragment.ring.push_back(end);
                        self.rings.push(fragment.ring.into());
                    }
                } else if let (Some(mut head), Some(tail)) = (self.fragments[f].take(), self.fragments[g].take()) {
                    head.ring.extend(tail.ring);
                    head.end = tail.end;
                    self.insert(head);
                }
            } else {
                self.by_end.remove(&start);
                if let Some(fragment) = self.fragments[f].as_mut() {
                    fragment.ring.push_back(end);
                    fragment.end = end;
                }
                self.by_end.insert(end, f);
            }
        } else if let Some(&f) = self.by_start.get(&end) {
            self.by_start.remove(&end);
            if let Some(fragment) = self.fragments[f].as_mut() {
                fragment.ring.push_front(start);
                fragment.start = start;
            }
            self.by_start.insert(start, f);
        } else {
            self.insert(Fragment { start, end, ring: VecDeque::from([start, end]) });
        }
    }

    fn insert(&mut self, fragment: Fragment) {
        let id = self.fragments.len();
        self.by_start.insert(fragment.start, id);
        self.by_end.insert(fragment.end, id);
        self.fragments.push(Some(fragment));
    }
}

/// Closed rings (first vertex repeated last) in doubled grid units.
fn isorings(grid: &Grid, value: f64) -> Vec<Vec<Key>> {
    let (dx, dy) = (grid.cols(), grid.rows());
    let values = grid.values();
    // NaN compares false, so missing samples count as below.
    let above = |i: usize| (values[i] >= value) as usize;
    let last_x = dx as i64 - 1;
    let mut stitcher = Stitcher::default();

    // First row: only the bottom corners exist.
    let mut t1 = above(0);
    stitcher.cell(t1 << 1, -1, -1);
    for x in 0..dx - 1 {
        let t0 = t1;
        t1 = above(x + 1);
        stitcher.cell(t0 | t1 << 1, x as i64, -1);
    }
    stitcher.cell(t1, last_x, -1);

    // Intermediate rows.
    for y in 0..dy - 1 {
        let row = y * dx;
        let mut t1 = above(row + dx);
        let mut t2 = above(row);
        stitcher.cell(t1 << 1 | t2 << 2, -1, y as i64);
        for x in 0..dx - 1 {
            let t0 = t1;
            t1 = above(row + dx + x + 1);
            let t3 = t2;
            t2 = above(row + x + 1);
            stitcher.cell(t0 | t1 << 1 | t2 << 2 | t3 << 3, x as i64, y as i64);
        }
        stitcher.cell(t1 | t2 << 3, last_x, y as i64);
    }

    // Last row: only the top corners exist.
    let y = dy - 1;
    let row = y * dx;
    let mut t2 = above(row);
    stitcher.cell(t2 << 2, -1, y as i64);
    for x in 0..dx - 1 {
        let t3 = t2;
        t2 = above(row + x + 1);
        stitcher.cell(t2 << 2 | t3 << 3, x as i64, y as i64);
    }
    stitcher.cell(t2 << 3, last_x, y as i64);

    stitcher.rings
}

/// Slide vertices lying on interior grid lines to the interpolated crossing.
fn smooth_linear(ring: &mut [Coord<f64>], grid: &Grid, value: f64) {
    let (dx, dy) = (grid.cols(), grid.rows());
    let sample = |x: usize, y: usize| {
        let v = grid.get(x, y);
        if v.is_nan() { f64::NEG_INFINITY } else { v }
    };

    for point in ring.iter_mut() {
        let (x, y) = (point.x, point.y);
        let (xt, yt) = (x.floor(), y.floor());
        if x > 0.0 && x < dx as f64 && xt == x {
            let (xi, yi) = (xt as usize, yt as usize);
            point.x = interpolate(x, sample(xi - 1, yi), sample(xi, yi), value);
        }
        if y > 0.0 && y < dy as f64 && yt == y {
            let (xi, yi) = (xt as usize, yt as usize);
            point.y = interpolate(y, sample(xi, yi - 1), sample(xi, yi), value);
        }
    }
}

fn interpolate(x: f64, v0: f64, v1: f64, value: f64) -> f64 {
    let a = value - v0;
    let b = v1 - v0;
    let d = if a.is_finite() || b.is_finite() { a / b } else { a.signum() / b.signum() };
    if d.is_nan() { x } else { x + d - 0.5 }
}

#[cfg(test)]
mod tests {
    use geo::{Contains, Point};

    use super::*;

    fn grid(rows: &[&[f64]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn one_contour_per_threshold() {
        let g = grid(&[&[0.0, 10.0], &[20.0, 30.0]]);
        let contours = isobands(&g, &[0.0, 10.0, 20.0]);
        let values: Vec<_> = contours.iter().map(|c| c.value).collect();
        assert_eq!(values, [0.0, 10.0, 20.0]);
        assert!(contours.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn lowest_band_covers_whole_grid() {
        let g = grid(&[&[0.0, 10.0], &[20.0, 30.0]]);
        let band = &isobands(&g, &[0.0])[0];
        assert_eq!(band.geometry.0.len(), 1);
        assert!(band.geometry.contains(&Point::new(1.0, 1.0)));
        assert!(band.geometry.0[0].interiors().is_empty());
    }

    #[test]
    fn high_band_covers_bottom_row_only() {
        let g = grid(&[&[0.0, 10.0], &[20.0, 30.0]]);
        let band = &isobands(&g, &[20.0])[0];
        assert!(band.geometry.contains(&Point::new(1.0, 1.7)));
        assert!(!band.geometry.contains(&Point::new(1.0, 0.3)));
    }

    #[test]
    fn pit_becomes_a_hole() {
        let g = grid(&[&[5.0, 5.0, 5.0], &[5.0, 0.0, 5.0], &[5.0, 5.0, 5.0]]);
        let band = &isobands(&g, &[3.0])[0];
        assert_eq!(band.geometry.0.len(), 1);
        assert_eq!(band.geometry.0[0].interiors().len(), 1);
        assert!(!band.geometry.contains(&Point::new(1.5, 1.5)));
        assert!(band.geometry.contains(&Point::new(0.5, 0.5)));
    }

    #[test]
    fn peak_becomes_an_island() {
        let g = grid(&[&[0.0, 0.0, 0.0], &[0.0, 9.0, 0.0], &[0.0, 0.0, 0.0]]);
        let band = &isobands(&g, &[5.0])[0];
        assert_eq!(band.geometry.0.len(), 1);
        assert!(band.geometry.0[0].interiors().is_empty());
        assert!(band.geometry.contains(&Point::new(1.5, 1.5)));
        assert!(!band.geometry.contains(&Point::new(0.3, 0.3)));
    }

    #[test]
    fn threshold_above_everything_is_empty() {
        let g = grid(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert!(isobands(&g, &[100.0])[0].is_empty());
    }

    #[test]
    fn nan_samples_count_as_below() {
        let g = grid(&[&[f64::NAN, 9.0], &[9.0, 9.0]]);
        let band = &isobands(&g, &[5.0])[0];
        assert!(!band.geometry.contains(&Point::new(0.3, 0.3)));
        assert!(band.geometry.contains(&Point::new(1.5, 1.5)));
    }

    #[test]
    fn single_cell_grid() {
        let g = grid(&[&[7.0]]);
        let band = &isobands(&g, &[1.0])[0];
        assert_eq!(band.geometry.0.len(), 1);
        assert!(band.geometry.contains(&Point::new(0.5, 0.5)));
    }
}
