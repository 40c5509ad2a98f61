//! Pure render passes producing drawing instructions.

mod choropleth;
mod contour;
mod hit;
mod scene;

pub use choropleth::{ChoroplethRender, render_choropleth};
pub use contour::{contour_polygons, render_contours};
pub use hit::HitIndex;
pub use scene::{Group, GroupStyle, PathElement, Scene, Stroke};
