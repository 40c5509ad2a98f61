use serde::Serialize;

use crate::interact::ZoomTransform;

/// Drawing instructions for one output surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<Group>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self { Self { width, height, groups: Vec::new() } }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Total number of paths across all groups.
    pub fn path_count(&self) -> usize { self.groups.iter().map(|g| g.paths.len()).sum() }

    pub fn paths(&self) -> impl Iterator<Item = &PathElement> { self.groups.iter().flat_map(|g| g.paths.iter()) }
}

/// Ordered set of paths sharing a transform and presentation attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<ZoomTransform>,
    pub style: GroupStyle,
    pub paths: Vec<PathElement>,
}

impl Group {
    pub fn new(paths: Vec<PathElement>) -> Self { Self { paths, ..Default::default() } }
}

/// Presentation attributes inherited by every path in a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathElement {
    /// Stable identity of the bound datum (GEOID, or band value for contours).
    pub key: String,
    pub d: String,
    pub fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    /// Plain-text hover label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    /// Outline drawn around the hovered feature.
    pub fn hover() -> Self { Self { color: "black".to_string(), width: 1.5 } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_absent_attributes() {
        let scene = Scene::new(10.0, 20.0).with_group(Group::new(vec![PathElement {
            key: "a".into(),
            d: "M0,0Z".into(),
            fill: "gray".into(),
            stroke: None,
            title: None,
        }]));
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["groups"][0]["paths"][0], serde_json::json!({"key": "a", "d": "M0,0Z", "fill": "gray"}));
        assert!(json["groups"][0].get("transform").is_none());
        assert_eq!(json["groups"][0]["style"], serde_json::json!({}));
    }

    #[test]
    fn transform_and_style_serialize_as_attributes() {
        let group = Group {
            transform: Some(ZoomTransform::new(1.0, 2.0, 3.0)),
            style: GroupStyle { fill: Some("none".into()), stroke: Some("#fff".into()), stroke_opacity: Some(0.5) },
            paths: vec![],
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["transform"], "translate(1,2) scale(3)");
        assert_eq!(json["style"]["stroke-opacity"], 0.5);
    }
}
