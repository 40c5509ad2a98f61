use std::path::Path;

use anyhow::Result;
use choromap::{ColorChoice, ContourOptions, open_source, read_grid_from, render_contours, write_scene_svg};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ContourArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./contour.svg".into());

    let mut options = match &args.config {
        Some(path) => ContourOptions::from_path(path)?,
        None => ContourOptions::default(),
    };
    if let Some(interval) = args.interval { options.interval = interval }
    if let Some(choice) = &args.color_choice { options.color_choice = ColorChoice::from(choice.as_str()) }
    if let Some(res) = args.pixel_resolution { options.pixel_resolution = res }
    options.validate()?;

    let source = open_source(&args.grid)?;
    log::info!("[contour] reading grid from {}", source.describe());
    let grid = read_grid_from(source.as_ref())?;

    let scene = render_contours(&grid, &options)?;
    log::info!("[contour] {} bands, {} color ramp", scene.path_count(), options.color_choice);
    write_scene_svg(&scene, Path::new(out_path))?;
    println!("[contour] wrote {}", out_path.display());

    Ok(())
}
