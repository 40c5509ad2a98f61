//! IO module for input resources and output formats.
//!
//! - `source` - byte sources for input resources (disk, memory, HTTP)
//! - `json` - feature records, as a record array or a GeoJSON FeatureCollection
//! - `grid` - numeric grids for contouring
//! - `svg` - SVG export of rendered scenes

mod grid;
mod json;
mod source;
mod svg;

pub use grid::{read_grid, read_grid_from};
pub use json::{read_features, read_features_from};
pub use source::{DataSource, DiskSource, MAP_DATA, MemSource, open_source};
pub use svg::{scene_to_svg_string, write_scene_svg};

#[cfg(feature = "download")]
pub use source::HttpSource;
