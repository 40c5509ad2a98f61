//! Iso-band contours over a rectangular numeric grid.

mod grid;
mod isobands;
mod polygon;
mod thresholds;

pub use grid::Grid;
pub use isobands::isobands;
pub use polygon::ContourPolygon;
pub use thresholds::contour_thresholds;
