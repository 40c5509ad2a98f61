//! Projection of lon/lat geometry into screen space and SVG path building.

mod path;
mod proj;

pub(crate) use path::PathBuilder;
pub use proj::{FittedProjection, Projection};
