use std::path::Path;

use anyhow::Result;
use choromap::{GeoLevel, MapOptions, MapSession, ZoomTransform, open_source, write_scene_svg};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ChoroplethArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./map.svg".into());

    let mut options = match &args.config {
        Some(path) => MapOptions::from_path(path)?,
        None => MapOptions::default(),
    };
    if let Some(geog) = &args.geog { options.geog = GeoLevel::from_tag(geog) }
    if let Some(na_color) = &args.na_color { options.na_color = na_color.clone() }

    let mut session = MapSession::new(options)?;
    let source = open_source(&args.data)?;
    session.load_from(source.as_ref())?;

    if let Some(k) = args.zoom_level {
        let (w, h) = (session.options().width, session.options().height);
        let transform = ZoomTransform::IDENTITY.scale_about((w / 2.0, h / 2.0), k);
        let outcome = session.zoom(transform)?;
        if let Some(level) = outcome.switched_to {
            log::info!("[choropleth] zoom {k} switched to level {level}");
        }
    }

    log::info!("[choropleth] {} features at level {}", session.features().len(), session.level());
    write_scene_svg(&session.scene(), Path::new(out_path))?;
    println!("[choropleth] wrote {}", out_path.display());

    Ok(())
}
