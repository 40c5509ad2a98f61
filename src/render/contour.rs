use anyhow::{Result, anyhow};

use crate::{
    config::ContourOptions,
    contour::{ContourPolygon, Grid, contour_thresholds, isobands},
    geom::{FittedProjection, PathBuilder, Projection},
    scale::ColorRamp,
};

use super::{Group, GroupStyle, PathElement, Scene};

/// Iso-band polygons for `grid`, in pixels (grid units times `pixel_resolution`).
pub fn contour_polygons(grid: &Grid, options: &ContourOptions) -> Result<Vec<ContourPolygon>> {
    options.validate()?;
    let (min, max) = grid.extent()
        .ok_or_else(|| anyhow!("[contour] grid has no numeric samples"))?;
    let thresholds = contour_thresholds(min, max, options.interval)?;

    log::debug!("[contour] {}x{} grid, range [{min}, {max}], {} thresholds", grid.cols(), grid.rows(), thresholds.len());

    Ok(isobands(grid, &thresholds).into_iter()
        .map(|band| band.scaled(options.pixel_resolution))
        .collect())
}

/// Contour overlay scene: one band path per threshold, colored by the
/// band's position within the grid's value range.
pub fn render_contours(grid: &Grid, options: &ContourOptions) -> Result<Scene> {
    let bands = contour_polygons(grid, options)?;
    let (min, max) = grid.extent()
        .ok_or_else(|| anyhow!("[contour] grid has no numeric samples"))?;
    let ramp = ColorRamp::from(options.color_choice);

    // Bands are already in pixels: project without fitting.
    let shapes = Projection::Identity.project_shapes(&bands.iter().map(|band| &band.geometry).collect::<Vec<_>>())?;
    let builder = PathBuilder::new(FittedProjection::identity());

    let paths = bands.iter().zip(&shapes)
        .map(|(band, shape)| {
            let t = if max == min { 0.0 } else { (band.value - min) / (max - min) };
            PathElement {
                key: band.value.to_string(),
                d: builder.path(shape),
                fill: ramp.at(t).to_string(),
                stroke: None,
                title: None,
            }
        })
        .collect();

    let group = Group {
        transform: None,
        style: GroupStyle {
            fill: Some("none".to_string()),
            stroke: Some("#fff".to_string()),
            stroke_opacity: Some(0.5),
        },
        paths,
    };

    let res = options.pixel_resolution;
    Ok(Scene::new(grid.cols() as f64 * res, grid.rows() as f64 * res).with_group(group))
}
