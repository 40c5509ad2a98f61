use anyhow::{Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};

use crate::{
    config::MapOptions,
    geom::{FittedProjection, PathBuilder, Projection},
    interact::feature_lines,
    scale::{ColorRamp, ColorScale},
    types::FeatureCollection,
};

use super::{Group, HitIndex, PathElement, Scene};

/// Output of one choropleth render pass.
#[derive(Debug, Clone)]
pub struct ChoroplethRender {
    pub scene: Scene,
    /// Screen-space lookup for the paths of `scene`, in the same order.
    pub index: HitIndex,
}

/// Project, fit, and color `features` into a single-group scene.
///
/// The color domain is `[0, max estimate]` over exactly these features, and
/// the projection is fitted to their bounds, so the output depends only on
/// the arguments.
pub fn render_choropleth(features: &FeatureCollection, options: &MapOptions) -> Result<ChoroplethRender> {
    options.validate()?;

    let shapes = features.shapes().collect::<Vec<_>>();
    let projected = Projection::Mercator.project_shapes(&shapes)
        .context("[render] failed to project features")?;
    let fitted = FittedProjection::fit(&projected, options.width, options.height);
    let builder = PathBuilder::new(fitted);
    let scale = ColorScale::for_features(features, ColorRamp::Blues, options.na_color.as_str());

    let paths = features.iter().zip(&projected)
        .map(|(feature, shape)| {
            let [id, estimate] = feature_lines(feature, &options.estimate_prefix);
            PathElement {
                key: feature.geoid.clone(),
                d: builder.path(shape),
                fill: scale.fill(feature.estimate),
                stroke: None,
                title: Some(format!("{id}\n{estimate}")),
            }
        })
        .collect::<Vec<_>>();

    let screen = projected.iter()
        .map(|shape| to_screen(shape, &fitted))
        .collect();

    log::debug!(
        "[render] {} features, domain [{}, {}], scale {:.3}",
        paths.len(), scale.domain()[0], scale.domain()[1], fitted.scale(),
    );

    Ok(ChoroplethRender {
        scene: Scene::new(options.width, options.height).with_group(Group::new(paths)),
        index: HitIndex::new(screen),
    })
}

fn to_screen(shape: &MultiPolygon<f64>, fitted: &FittedProjection) -> MultiPolygon<f64> {
    shape.map_coords(|c| {
        let (x, y) = fitted.apply(&c);
        Coord { x, y }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geo::polygon;

    use crate::{scale::ColorRamp, types::{Feature, GeoLevel}};

    use super::*;

    fn tract(id: &str, lon: f64, estimate: Option<f64>) -> Arc<Feature> {
        let poly = polygon![
            (x: lon, y: 41.0), (x: lon + 0.1, y: 41.0), (x: lon + 0.1, y: 41.1), (x: lon, y: 41.1),
        ];
        Arc::new(Feature::new(id, MultiPolygon(vec![poly]), estimate, GeoLevel::Tract))
    }

    #[test]
    fn one_path_per_feature_keyed_by_geoid() {
        let fc = FeatureCollection::new(vec![tract("a", -88.0, Some(10.0)), tract("b", -87.9, Some(20.0))]);
        let render = render_choropleth(&fc, &MapOptions::default()).unwrap();
        let keys: Vec<_> = render.scene.paths().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(render.index.len(), 2);
        assert!(render.scene.paths().all(|p| p.d.starts_with('M')));
    }

    #[test]
    fn fills_span_the_ramp() {
        let fc = FeatureCollection::new(vec![
            tract("zero", -88.0, Some(0.0)),
            tract("max", -87.9, Some(40.0)),
            tract("na", -87.8, None),
        ]);
        let render = render_choropleth(&fc, &MapOptions::default()).unwrap();
        let fills: Vec<_> = render.scene.paths().map(|p| p.fill.clone()).collect();
        assert_eq!(fills[0], ColorRamp::Blues.min_color().to_string());
        assert_eq!(fills[1], ColorRamp::Blues.max_color().to_string());
        assert_eq!(fills[2], "gray");
    }

    #[test]
    fn titles_use_prefix_and_na() {
        let fc = FeatureCollection::new(vec![tract("a", -88.0, Some(1234.0)), tract("b", -87.9, None)]);
        let options = MapOptions { estimate_prefix: "$".into(), ..Default::default() };
        let render = render_choropleth(&fc, &options).unwrap();
        let titles: Vec<_> = render.scene.paths().filter_map(|p| p.title.clone()).collect();
        assert_eq!(titles, ["GEOID: a\nEstimate: $1,234", "GEOID: b\nEstimate: $NA"]);
    }

    #[test]
    fn hit_index_matches_fitted_paths() {
        let fc = FeatureCollection::new(vec![tract("a", -88.0, Some(1.0))]);
        let render = render_choropleth(&fc, &MapOptions::default()).unwrap();
        // A single feature is fitted to the viewport, so its center lands at the center.
        assert_eq!(render.index.hit(400.0, 300.0), Some(0));
        assert_eq!(render.index.hit(5.0, 5.0), None);
    }

    #[test]
    fn empty_collection_renders_empty_group() {
        let render = render_choropleth(&FeatureCollection::default(), &MapOptions::default()).unwrap();
        assert_eq!(render.scene.groups.len(), 1);
        assert_eq!(render.scene.path_count(), 0);
        assert!(render.index.is_empty());
    }
}
