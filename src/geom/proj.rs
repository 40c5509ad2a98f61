use anyhow::{Context, Result, anyhow, bail};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use proj4rs::{proj::Proj as Proj4, transform::transform};

const LONLAT_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";
const MERCATOR_PROJ4: &str = "+proj=merc +datum=WGS84 +units=m +no_defs +type=crs";

/// Raw projection from source coordinates to an unscaled plane with y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Web-map style Mercator for lon/lat degrees.
    #[default]
    Mercator,
    /// Coordinates are already planar with y down (e.g. grid pixels).
    Identity,
}

impl Projection {
    /// Project every shape. Mercator output is in meters with the y axis flipped.
    pub fn project_shapes(&self, shapes: &[&MultiPolygon<f64>]) -> Result<Vec<MultiPolygon<f64>>> {
        match self {
            Projection::Identity => Ok(shapes.iter().map(|&shape| shape.clone()).collect()),
            Projection::Mercator => {
                let from = Proj4::from_proj_string(LONLAT_PROJ4)
                    .with_context(|| anyhow!("[proj] failed to build source PROJ.4: {LONLAT_PROJ4}"))?;
                let to = Proj4::from_proj_string(MERCATOR_PROJ4)
                    .with_context(|| anyhow!("[proj] failed to build target PROJ.4: {MERCATOR_PROJ4}"))?;

                // Degrees -> radians in, meters out.
                let mut project = |coord: Coord<f64>| -> Result<Coord<f64>> {
                    let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
                    transform(&from, &to, &mut point)
                        .with_context(|| format!("[proj] Mercator transform failed at ({}, {})", coord.x, coord.y))?;
                    if !point.0.is_finite() || !point.1.is_finite() {
                        bail!("[proj] ({}, {}) has no finite Mercator position", coord.x, coord.y);
                    }
                    Ok(Coord { x: point.0, y: -point.1 })
                };

                shapes.iter()
                    .map(|shape| map_multipolygon(shape, &mut project))
                    .collect()
            }
        }
    }
}

/// Rebuild a MultiPolygon by mapping every coordinate (exteriors and holes).
fn map_multipolygon(shape: &MultiPolygon<f64>, f: &mut impl FnMut(Coord<f64>) -> Result<Coord<f64>>) -> Result<MultiPolygon<f64>> {
    let mut ring = |line: &LineString<f64>| -> Result<LineString<f64>> {
        line.0.iter().map(|&c| f(c)).collect::<Result<Vec<_>>>().map(LineString)
    };

    let polygons = shape.0.iter()
        .map(|polygon| {
            let exterior = ring(polygon.exterior())?;
            let interiors = polygon.interiors().iter().map(&mut ring).collect::<Result<Vec<_>>>()?;
            Ok(Polygon::new(exterior, interiors))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MultiPolygon(polygons))
}

/// Uniform scale + translation placing projected shapes inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedProjection {
    k: f64,
    tx: f64,
    ty: f64,
}

impl Default for FittedProjection {
    fn default() -> Self { Self::identity() }
}

impl FittedProjection {
    pub fn identity() -> Self { Self { k: 1.0, tx: 0.0, ty: 0.0 } }

    /// Uniform scaling by `k` with no translation.
    pub fn scaled(k: f64) -> Self { Self { k, tx: 0.0, ty: 0.0 } }

    /// Fit the bounds of `shapes` to a `width` x `height` viewport, centered,
    /// preserving aspect ratio. Empty input yields the identity.
    pub fn fit(shapes: &[MultiPolygon<f64>], width: f64, height: f64) -> Self {
        let Some(bounds) = bounds_of(shapes) else { return Self::identity() };

        let (dx, dy) = (bounds.width(), bounds.height());
        let k = match (dx > 0.0, dy > 0.0) {
            (true, true) => (width / dx).min(height / dy),
            (true, false) => width / dx,
            (false, true) => height / dy,
            (false, false) => 1.0,
        };

        let (min, max) = (bounds.min(), bounds.max());
        Self {
            k,
            tx: (width - k * (max.x + min.x)) / 2.0,
            ty: (height - k * (max.y + min.y)) / 2.0,
        }
    }

    #[inline]
    pub fn scale(&self) -> f64 { self.k }

    /// Map a projected coordinate to screen space.
    #[inline]
    pub fn apply(&self, coord: &Coord<f64>) -> (f64, f64) {
        (self.k * coord.x + self.tx, self.k * coord.y + self.ty)
    }
}

/// Combined bounding rectangle of all shapes, if any have coordinates.
fn bounds_of(shapes: &[MultiPolygon<f64>]) -> Option<Rect<f64>> {
    shapes.iter()
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| {
            Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}
