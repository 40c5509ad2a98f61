#![doc = "Choromap public API"]
mod config;
mod contour;
mod geom;
mod interact;
mod io;
mod render;
mod scale;
mod session;
mod types;

#[doc(inline)]
pub use config::{ColorChoice, ContourOptions, MapOptions};

#[doc(inline)]
pub use contour::{ContourPolygon, Grid, contour_thresholds, isobands};

#[doc(inline)]
pub use geom::{FittedProjection, Projection};

#[doc(inline)]
pub use interact::{
    PointerEvent, TOOLTIP_STYLE, TooltipController, TooltipPhase, TooltipView, ZoomController,
    ZoomOutcome, ZoomTransform, format_estimate,
};

#[doc(inline)]
pub use io::{
    DataSource, DiskSource, MAP_DATA, MemSource, open_source, read_features, read_features_from,
    read_grid, read_grid_from, scene_to_svg_string, write_scene_svg,
};

#[cfg(feature = "download")]
#[doc(inline)]
pub use io::HttpSource;

#[doc(inline)]
pub use render::{
    ChoroplethRender, Group, GroupStyle, HitIndex, PathElement, Scene, Stroke, contour_polygons,
    render_choropleth, render_contours,
};

#[doc(inline)]
pub use scale::{ColorRamp, ColorScale, Rgb};

#[doc(inline)]
pub use session::{LoadStatus, LoadTicket, MapSession};

#[doc(inline)]
pub use types::{Feature, FeatureCollection, GeoLevel};
