use std::sync::Arc;

use choromap::{
    ColorRamp, DiskSource, FeatureCollection, GeoLevel, MapOptions, read_features,
    read_features_from, render_choropleth, scene_to_svg_string,
};

const MAP_DATA: &str = r#"[
    {"GEOID": "17031010100", "level": "tract", "estimate": 0,
     "geometry": {"type": "Polygon", "coordinates": [[[-87.70, 41.90], [-87.65, 41.90], [-87.65, 41.95], [-87.70, 41.95], [-87.70, 41.90]]]}},
    {"GEOID": "17031010200", "level": "tract", "estimate": 80000,
     "geometry": {"type": "Polygon", "coordinates": [[[-87.65, 41.90], [-87.60, 41.90], [-87.60, 41.95], [-87.65, 41.95], [-87.65, 41.90]]]}},
    {"GEOID": "17031010300", "level": "tract", "estimate": null,
     "geometry": {"type": "Polygon", "coordinates": [[[-87.60, 41.90], [-87.55, 41.90], [-87.55, 41.95], [-87.60, 41.95], [-87.60, 41.90]]]}},
    {"GEOID": "170310101001", "level": "cbg", "estimate": "1250",
     "geometry": {"type": "Polygon", "coordinates": [[[-87.70, 41.90], [-87.675, 41.90], [-87.675, 41.925], [-87.70, 41.925], [-87.70, 41.90]]]}}
]"#;

fn collection(level: GeoLevel) -> FeatureCollection {
    let features: Vec<_> = read_features(MAP_DATA.as_bytes()).unwrap().into_iter().map(Arc::new).collect();
    FeatureCollection::filter_level(&features, &level)
}

#[test]
fn filter_then_render_keeps_only_level() {
    let tracts = render_choropleth(&collection(GeoLevel::Tract), &MapOptions::default()).unwrap();
    assert_eq!(tracts.scene.path_count(), 3);
    assert!(tracts.scene.paths().all(|p| p.key.len() == 11));

    let groups = render_choropleth(&collection(GeoLevel::BlockGroup), &MapOptions::default()).unwrap();
    let keys: Vec<_> = groups.scene.paths().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, ["170310101001"]);
}

#[test]
fn color_endpoints_and_fallback() {
    let options = MapOptions { na_color: "#ccc".into(), ..Default::default() };
    let render = render_choropleth(&collection(GeoLevel::Tract), &options).unwrap();
    let fills: Vec<_> = render.scene.paths().map(|p| p.fill.as_str()).collect();
    assert_eq!(fills[0], ColorRamp::Blues.min_color().to_string());
    assert_eq!(fills[1], ColorRamp::Blues.max_color().to_string());
    assert_eq!(fills[2], "#ccc");
}

#[test]
fn single_null_tract_is_gray() {
    let json = r#"[{"GEOID": "1", "level": "tract", "estimate": null,
        "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}]"#;
    let features: Vec<_> = read_features(json.as_bytes()).unwrap().into_iter().map(Arc::new).collect();
    let fc = FeatureCollection::filter_level(&features, &GeoLevel::Tract);
    let render = render_choropleth(&fc, &MapOptions::default()).unwrap();
    assert_eq!(render.scene.paths().next().unwrap().fill, "gray");
}

#[test]
fn null_geometry_record_does_not_fail_the_load() {
    let json = r#"[
        {"GEOID": "1", "level": "tract", "estimate": 5,
         "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}},
        {"GEOID": "10", "level": "cbg", "estimate": 2, "geometry": null}
    ]"#;
    let features: Vec<_> = read_features(json.as_bytes()).unwrap().into_iter().map(Arc::new).collect();
    assert_eq!(features.len(), 2);
    let fc = FeatureCollection::filter_level(&features, &GeoLevel::Tract);
    let render = render_choropleth(&fc, &MapOptions::default()).unwrap();
    assert_eq!(render.scene.path_count(), 1);
    assert_eq!(render.scene.paths().next().unwrap().key, "1");
}

#[test]
fn rendering_is_idempotent() {
    let options = MapOptions::default();
    let a = render_choropleth(&collection(GeoLevel::Tract), &options).unwrap();
    let b = render_choropleth(&collection(GeoLevel::Tract), &options).unwrap();
    assert_eq!(a.scene, b.scene);
    assert_eq!(scene_to_svg_string(&a.scene).unwrap(), scene_to_svg_string(&b.scene).unwrap());
}

#[test]
fn reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(choromap::MAP_DATA);
    std::fs::write(&path, MAP_DATA).unwrap();

    let features = read_features_from(&DiskSource::new(&path)).unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features[3].estimate, Some(1250.0));
}
