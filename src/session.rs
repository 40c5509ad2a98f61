//! Interactive choropleth state.
//!
//! A session owns everything that changes while a page is open: the loaded
//! records, the zoom controller, the tooltip, the hovered feature and the
//! load generation. Each event method updates that state and, where needed,
//! re-runs the pure render pass. Adapters read the result back with
//! [`MapSession::scene`] and [`MapSession::tooltip`].

use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::MapOptions,
    interact::{PointerEvent, TooltipController, TooltipView, ZoomController, ZoomOutcome, ZoomTransform, tooltip_html},
    io::{DataSource, read_features_from},
    render::{ChoroplethRender, Scene, Stroke, render_choropleth},
    types::{Feature, FeatureCollection, GeoLevel},
};

/// Handle for one data load. Only the most recently issued ticket may
/// complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn from_generation(generation: u64) -> Self { Self(generation) }

    #[inline]
    pub fn generation(&self) -> u64 { self.0 }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Records were accepted and rendered; `features` counts the current level.
    Rendered { features: usize },
    /// A newer load was started after this one; the result was dropped.
    Stale,
    /// The load itself failed; nothing was rendered.
    Failed,
}

pub struct MapSession {
    options: MapOptions,
    records: Vec<Arc<Feature>>,
    current: FeatureCollection,
    render: Option<ChoroplethRender>,
    zoom: ZoomController,
    group_transform: Option<ZoomTransform>,
    tooltip: TooltipController,
    hovered: Option<usize>,
    generation: u64,
}

impl MapSession {
    pub fn new(options: MapOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            zoom: ZoomController::new(&options),
            options,
            records: Vec::new(),
            current: FeatureCollection::default(),
            render: None,
            group_transform: None,
            tooltip: TooltipController::new(),
            hovered: None,
            generation: 0,
        })
    }

    #[inline] pub fn options(&self) -> &MapOptions { &self.options }

    /// Currently active granularity level.
    #[inline] pub fn level(&self) -> &GeoLevel { self.zoom.level() }

    /// Features rendered at the current level, in paint order.
    #[inline] pub fn features(&self) -> &FeatureCollection { &self.current }

    #[inline] pub fn zoom_transform(&self) -> ZoomTransform { self.zoom.transform() }

    #[inline] pub fn hovered(&self) -> Option<&Feature> { self.hovered.and_then(|i| self.current.get(i)) }

    // --- loading

    /// Start a load, invalidating every earlier ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Complete a load. Stale tickets and failed loads leave the current
    /// render untouched; failures are logged, never rendered.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Feature>>) -> Result<LoadStatus> {
        if ticket.0 != self.generation {
            log::debug!("[session] dropping load {} (current is {})", ticket.0, self.generation);
            return Ok(LoadStatus::Stale);
        }

        match result {
            Err(err) => {
                log::error!("[session] data load failed: {err:#}");
                Ok(LoadStatus::Failed)
            }
            Ok(features) => {
                self.set_features(features)?;
                Ok(LoadStatus::Rendered { features: self.current.len() })
            }
        }
    }

    /// Synchronous load from a source.
    pub fn load_from(&mut self, source: &dyn DataSource) -> Result<LoadStatus> {
        let ticket = self.begin_load();
        log::info!("[session] loading {}", source.describe());
        self.finish_load(ticket, read_features_from(source))
    }

    /// Replace the records and render them at the current level.
    pub fn set_features(&mut self, features: Vec<Feature>) -> Result<()> {
        self.records = features.into_iter().map(Arc::new).collect();
        self.rerender()
    }

    /// Rebuild the scene from scratch at the current level. The previous
    /// group, its transform and the hover highlight are discarded.
    pub fn rerender(&mut self) -> Result<()> {
        let current = FeatureCollection::filter_level(&self.records, self.zoom.level());
        let render = render_choropleth(&current, &self.options)?;
        log::info!("[session] rendered {} of {} records at level {}", current.len(), self.records.len(), self.zoom.level());

        self.current = current;
        self.render = Some(render);
        self.group_transform = None;
        self.hovered = None;
        Ok(())
    }

    // --- events

    /// Apply a zoom gesture; crossing the threshold re-renders at the new level.
    /// If that render fails the zoom state is rolled back and the previous
    /// scene stays current.
    pub fn zoom(&mut self, transform: ZoomTransform) -> Result<ZoomOutcome> {
        let previous = self.zoom.clone();
        let outcome = self.zoom.on_zoom(transform);
        if outcome.switched_to.is_some() {
            if let Err(err) = self.rerender() {
                self.zoom = previous;
                return Err(err);
            }
        } else {
            self.group_transform = outcome.transform;
        }
        Ok(outcome)
    }

    /// Pointer moved on the surface at `now` (ms). Returns the feature under it.
    pub fn pointer_move(&mut self, pointer: PointerEvent, now: f64) -> Option<&Feature> {
        let hit = self.hit(pointer);

        match (self.hovered, hit) {
            (Some(prev), Some(idx)) if prev == idx => self.tooltip.move_to(pointer),
            (_, Some(idx)) => {
                if let Some(feature) = self.current.get(idx) {
                    self.tooltip.enter(tooltip_html(feature, &self.options.estimate_prefix), pointer, now);
                }
            }
            (Some(_), None) => self.tooltip.leave(now),
            (None, None) => {}
        }

        self.hovered = hit;
        self.hovered()
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self, now: f64) {
        if self.hovered.take().is_some() {
            self.tooltip.leave(now);
        }
    }

    pub fn tooltip(&self, now: f64) -> TooltipView { self.tooltip.view(now) }

    /// Current drawing instructions, with the group transform and hover
    /// highlight applied. Empty until the first successful load.
    pub fn scene(&self) -> Scene {
        let Some(render) = &self.render else {
            return Scene::new(self.options.width, self.options.height);
        };

        let mut scene = render.scene.clone();
        if let Some(group) = scene.groups.first_mut() {
            group.transform = self.group_transform;
            if let Some(path) = self.hovered.and_then(|i| group.paths.get_mut(i)) {
                path.stroke = Some(Stroke::hover());
            }
        }
        scene
    }

    fn hit(&self, pointer: PointerEvent) -> Option<usize> {
        let render = self.render.as_ref()?;
        let (x, y) = self.group_transform.unwrap_or_default().invert((pointer.x, pointer.y));
        render.index.hit(x, y)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use geo::{MultiPolygon, polygon};

    use crate::interact::TooltipPhase;

    use super::*;

    fn square(id: &str, lon: f64, level: GeoLevel, estimate: Option<f64>) -> Feature {
        let poly = polygon![
            (x: lon, y: 41.0), (x: lon + 0.1, y: 41.0), (x: lon + 0.1, y: 41.1), (x: lon, y: 41.1),
        ];
        Feature::new(id, MultiPolygon(vec![poly]), estimate, level)
    }

    fn records() -> Vec<Feature> {
        vec![
            square("t1", -88.0, GeoLevel::Tract, Some(10.0)),
            square("b1", -88.0, GeoLevel::BlockGroup, Some(3.0)),
            square("b2", -87.9, GeoLevel::BlockGroup, None),
        ]
    }

    fn session(threshold: Option<u32>) -> MapSession {
        let mut session = MapSession::new(MapOptions { zoom_threshold: threshold, ..Default::default() }).unwrap();
        session.set_features(records()).unwrap();
        session
    }

    #[test]
    fn renders_only_current_level() {
        let session = session(None);
        let keys: Vec<_> = session.scene().paths().map(|p| p.key.clone()).collect();
        assert_eq!(keys, ["t1"]);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = MapSession::new(MapOptions::default()).unwrap();
        let old = session.begin_load();
        let new = session.begin_load();
        assert_eq!(session.finish_load(new, Ok(records())).unwrap(), LoadStatus::Rendered { features: 1 });
        assert_eq!(session.finish_load(old, Ok(vec![])).unwrap(), LoadStatus::Stale);
        assert_eq!(session.features().len(), 1);
    }

    #[test]
    fn failed_load_keeps_previous_render() {
        let mut session = session(None);
        let before = session.scene();
        let ticket = session.begin_load();
        assert_eq!(session.finish_load(ticket, Err(anyhow!("404"))).unwrap(), LoadStatus::Failed);
        assert_eq!(session.scene(), before);
    }

    #[test]
    fn zoom_applies_group_transform() {
        let mut session = session(None);
        session.zoom(ZoomTransform::new(10.0, 20.0, 2.0)).unwrap();
        assert_eq!(session.scene().groups[0].transform, Some(ZoomTransform::new(10.0, 20.0, 2.0)));
    }

    #[test]
    fn crossing_threshold_rerenders_without_transform() {
        let mut session = session(Some(3));
        let outcome = session.zoom(ZoomTransform::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(outcome.switched_to, Some(GeoLevel::BlockGroup));
        assert_eq!(session.level(), &GeoLevel::BlockGroup);

        let scene = session.scene();
        assert_eq!(scene.groups[0].transform, None);
        let keys: Vec<_> = scene.paths().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["b1", "b2"]);
        assert_eq!(scene.paths().last().unwrap().fill, "gray");

        session.zoom(ZoomTransform::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(session.level(), &GeoLevel::Tract);
    }

    #[test]
    fn failed_level_switch_keeps_previous_level() {
        let mut session = MapSession::new(MapOptions { zoom_threshold: Some(3), ..Default::default() }).unwrap();
        // A pole has no Mercator position, so the block group render fails.
        session.set_features(vec![
            square("t1", -88.0, GeoLevel::Tract, Some(10.0)),
            Feature::new("b1", MultiPolygon(vec![polygon![(x: -88.0, y: 90.0), (x: -87.9, y: 90.0), (x: -87.9, y: 89.9)]]), None, GeoLevel::BlockGroup),
        ]).unwrap();
        session.zoom(ZoomTransform::new(5.0, 5.0, 1.0)).unwrap();
        let before = session.scene();

        assert!(session.zoom(ZoomTransform::new(0.0, 0.0, 3.0)).is_err());
        assert_eq!(session.level(), &GeoLevel::Tract);
        assert_eq!(session.zoom_transform(), ZoomTransform::new(5.0, 5.0, 1.0));
        assert_eq!(session.scene(), before);
    }

    #[test]
    fn hover_drives_tooltip_and_highlight() {
        let mut session = session(None);
        let geoid = session.pointer_move(PointerEvent::at(400.0, 300.0), 0.0).map(|f| f.geoid.clone());
        assert_eq!(geoid.as_deref(), Some("t1"));
        assert_eq!(session.scene().paths().next().unwrap().stroke, Some(Stroke::hover()));

        let view = session.tooltip(500.0);
        assert_eq!(view.phase, TooltipPhase::Visible);
        assert_eq!(view.html, "GEOID: t1<br>Estimate: 10");
        assert_eq!((view.left, view.top), (410.0, 272.0));

        assert!(session.pointer_move(PointerEvent::at(2.0, 2.0), 600.0).is_none());
        assert_eq!(session.tooltip(900.0).phase, TooltipPhase::Hidden);
        assert_eq!(session.scene().paths().next().unwrap().stroke, None);
    }

    #[test]
    fn hit_testing_follows_zoom_transform() {
        let mut session = session(None);
        // Shift the map far right; the old center is now empty.
        session.zoom(ZoomTransform::new(1000.0, 0.0, 1.0)).unwrap();
        assert!(session.pointer_move(PointerEvent::at(400.0, 300.0), 0.0).is_none());
        assert!(session.pointer_move(PointerEvent::at(1400.0, 300.0), 0.0).is_some());
    }

    #[test]
    fn pointer_leave_hides_tooltip() {
        let mut session = session(None);
        session.pointer_move(PointerEvent::at(400.0, 300.0), 0.0);
        session.pointer_leave(1000.0);
        assert_eq!(session.tooltip(1200.0).opacity, 0.0);
        assert!(session.hovered().is_none());
    }

    #[test]
    fn scene_before_load_is_empty() {
        let session = MapSession::new(MapOptions::default()).unwrap();
        assert_eq!(session.scene().path_count(), 0);
    }
}
