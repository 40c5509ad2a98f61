//! SVG format writing operations for scene export.

mod writer;

pub use writer::{scene_to_svg_string, write_scene_svg};
