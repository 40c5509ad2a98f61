use geo::{BoundingRect, Contains, MultiPolygon, Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// A bounding box in an R-tree, associated with a screen-space shape by index.
#[derive(Debug, Clone, PartialEq)]
struct BoundingBox {
    idx: usize, // Index of corresponding MultiPolygon in shapes
    bbox: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Pointer lookup over the rendered features, in fitted screen coordinates
/// (before any zoom transform).
#[derive(Debug, Clone, Default)]
pub struct HitIndex {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl HitIndex {
    /// Index shapes in paint order; shapes without coordinates are never hit.
    pub fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(idx, shape)| shape.bounding_rect().map(|bbox| BoundingBox { idx, bbox }))
                    .collect()
            ),
            shapes,
        }
    }

    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Index of the feature under (x, y). When shapes overlap the one painted
    /// last (topmost) wins.
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        let point = Point::new(x, y);
        self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|bb| bb.idx)
            .filter(|&idx| self.shapes[idx].contains(&point))
            .max()
    }
}
