//! Feature layers kept in step with the session and the selection.
//!
//! A [`MapLayer`] is created once per mode mount. After that, session and
//! selection changes only mutate each [`FeatureLayer`]'s paint in place; the
//! dataset, the layer list and the camera survive every update.
use std::sync::Arc;
use std::time::{Duration, Instant};

use game_core::SelectionSet;
use runtime::{SessionView, SharedSelection};

use super::camera::Camera;
use super::dataset::{GeoPoint, RegionDataset, RegionFeature};
use super::style::{PaintRole, RegionStyle, hover_style, region_style};
use crate::config::MapConfig;

/// Paint state of one rendered feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayer {
    pub style: RegionStyle,
    pub hovered: bool,
}

/// The external inputs that decide resting paint.
///
/// Captured fresh on every sync and every hover change; never cached across
/// a hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintInputs {
    pub selection_revision: u64,
    pub game_over: bool,
    /// Normalized name of the correct entity, present only once over.
    pub correct_key: Option<String>,
    pub day_generation: u64,
}

impl PaintInputs {
    pub fn capture(view: &SessionView, selection: &SharedSelection) -> Self {
        let game_over = view.is_game_over();
        Self {
            selection_revision: selection.revision(),
            game_over,
            correct_key: view
                .correct_entity()
                .filter(|_| game_over)
                .map(|entity| entity.region_key()),
            day_generation: view.day_generation,
        }
    }

    fn is_correct(&self, feature: &RegionFeature) -> bool {
        self.game_over && self.correct_key.as_deref() == Some(feature.key.as_str())
    }
}

/// What a [`MapLayer::sync`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    pub restyled: bool,
    /// A camera transition to the correct entity was started.
    pub revealed: bool,
}

/// Result of clicking the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug)]
pub struct MapLayer {
    dataset: Arc<RegionDataset>,
    layers: Vec<FeatureLayer>,
    /// Draw order, bottom first. Correct features are moved to the end.
    paint_order: Vec<usize>,
    hovered: Option<usize>,
    camera: Camera,
    fly_duration: Duration,
    inputs: Option<PaintInputs>,
    /// Correct entity already flown to, with the day it belonged to.
    revealed: Option<(u64, String)>,
    restyles: u64,
}

impl MapLayer {
    pub fn mount(dataset: Arc<RegionDataset>, config: &MapConfig) -> Self {
        let neutral = region_style(false, false);
        let layers = dataset
            .features()
            .iter()
            .map(|_| FeatureLayer {
                style: neutral,
                hovered: false,
            })
            .collect();
        let camera = Camera::new(dataset.bounds(), config.max_zoom);

        tracing::debug!(
            mode = %dataset.mode(),
            features = dataset.len(),
            "mounted map layer"
        );

        Self {
            paint_order: (0..dataset.len()).collect(),
            dataset,
            layers,
            hovered: None,
            camera,
            fly_duration: config.fly_duration,
            inputs: None,
            revealed: None,
            restyles: 0,
        }
    }

    pub fn dataset(&self) -> &RegionDataset {
        &self.dataset
    }

    pub fn layers(&self) -> &[FeatureLayer] {
        &self.layers
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Number of full restyle passes so far.
    pub fn restyle_count(&self) -> u64 {
        self.restyles
    }

    /// Features with their current paint, in draw order.
    pub fn painted(&self) -> impl Iterator<Item = (&RegionFeature, &FeatureLayer)> {
        self.paint_order
            .iter()
            .map(|&index| (&self.dataset.features()[index], &self.layers[index]))
    }

    pub fn hovered_label(&self) -> Option<&str> {
        self.hovered
            .map(|index| self.dataset.features()[index].label.as_str())
    }

    /// Bring paint up to date with the session and the selection.
    ///
    /// Cheap when nothing changed. On the transition into game over, the
    /// correct entity is also flown to.
    pub fn sync(
        &mut self,
        view: &SessionView,
        selection: &SharedSelection,
        now: Instant,
    ) -> SyncOutcome {
        let inputs = PaintInputs::capture(view, selection);
        if self.inputs.as_ref() == Some(&inputs) {
            return SyncOutcome::default();
        }

        selection.read(|set| self.restyle(set, &inputs));
        let revealed = self.reveal_once(&inputs, now);
        self.inputs = Some(inputs);

        SyncOutcome {
            restyled: true,
            revealed,
        }
    }

    /// Re-run the paint function over every layer, in place.
    fn restyle(&mut self, selection: &SelectionSet, inputs: &PaintInputs) {
        let features = self.dataset.features();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            let feature = &features[index];
            let base = region_style(selection.contains_key(&feature.key), inputs.is_correct(feature));
            layer.style = if layer.hovered { hover_style(base) } else { base };
        }

        // Stable sort keeps dataset order within each group.
        self.paint_order = (0..self.layers.len()).collect();
        self.paint_order
            .sort_by_key(|&index| self.layers[index].style.role == PaintRole::Correct);
        self.restyles += 1;
    }

    fn reveal_once(&mut self, inputs: &PaintInputs, now: Instant) -> bool {
        let Some(key) = inputs.correct_key.as_ref() else {
            return false;
        };
        let marker = (inputs.day_generation, key.clone());
        if self.revealed.as_ref() == Some(&marker) {
            return false;
        }
        self.revealed = Some(marker);
        self.fly_to_key(key, now)
    }

    fn fly_to_key(&mut self, key: &str, now: Instant) -> bool {
        match self.dataset.focus_bounds(key) {
            Some(bounds) => {
                self.camera.fly_to(&bounds, self.fly_duration, now);
                true
            }
            None => {
                tracing::debug!(%key, "correct entity has no map feature");
                false
            }
        }
    }

    /// Fly to the correct entity again. No-op before game over or when the
    /// dataset has no matching feature.
    pub fn reveal(&mut self, view: &SessionView, now: Instant) -> bool {
        if !view.is_game_over() {
            return false;
        }
        match view.correct_entity() {
            Some(entity) => self.fly_to_key(&entity.region_key(), now),
            None => false,
        }
    }

    /// Topmost feature under `point`.
    pub fn feature_at(&self, point: GeoPoint) -> Option<usize> {
        self.paint_order
            .iter()
            .rev()
            .copied()
            .find(|&index| self.dataset.features()[index].contains(point))
    }

    /// Track the pointer. Returns whether any paint changed.
    ///
    /// Both entering and leaving recompute the resting style from the
    /// current view and selection.
    pub fn pointer_moved(
        &mut self,
        point: Option<GeoPoint>,
        view: &SessionView,
        selection: &SharedSelection,
    ) -> bool {
        let target = point.and_then(|point| self.feature_at(point));
        if target == self.hovered {
            return false;
        }

        let inputs = PaintInputs::capture(view, selection);
        selection.read(|set| {
            if let Some(previous) = self.hovered.take() {
                self.layers[previous].hovered = false;
                self.layers[previous].style = self.resting_style(previous, set, &inputs);
            }
            if let Some(next) = target {
                self.layers[next].hovered = true;
                self.layers[next].style = hover_style(self.resting_style(next, set, &inputs));
            }
        });
        self.hovered = target;
        true
    }

    fn resting_style(&self, index: usize, selection: &SelectionSet, inputs: &PaintInputs) -> RegionStyle {
        let feature = &self.dataset.features()[index];
        region_style(selection.contains_key(&feature.key), inputs.is_correct(feature))
    }

    /// Toggle the region under `point` in the selection.
    ///
    /// Works regardless of game state. Paint follows on the next
    /// [`MapLayer::sync`].
    pub fn click(&self, point: GeoPoint, selection: &SharedSelection) -> Option<ClickOutcome> {
        let index = self.feature_at(point)?;
        let feature = &self.dataset.features()[index];
        let selected = selection.toggle(&feature.key);
        tracing::trace!(region = %feature.key, selected, "toggled region");
        Some(ClickOutcome {
            label: feature.label.clone(),
            selected,
        })
    }

    /// Advance camera animation. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let was_animating = self.camera.is_animating();
        self.camera.tick(now);
        was_animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::dataset::tests::countries;
    use crate::map::style::Rgb;
    use game_core::{DailyState, Entity, EntityId, GameDate, SessionSnapshot};
    use runtime::SessionPhase;

    const GREEN: Rgb = Rgb(0x22, 0xcc, 0x22);
    const RED: Rgb = Rgb(0xcc, 0x22, 0x22);
    const GREY: Rgb = Rgb(0x24, 0x24, 0x24);

    fn config() -> MapConfig {
        MapConfig {
            fly_duration: Duration::from_secs(2),
            max_zoom: 64.0,
        }
    }

    fn view(over: bool, correct: Option<&str>) -> SessionView {
        let mut view = SessionView::new(game_core::GameMode::Country);
        let snapshot = SessionSnapshot {
            remaining_questions: 3,
            remaining_guesses: if over { 0 } else { 2 },
            questions_asked: 7,
            guesses_made: 1,
            is_game_over: over,
            won: over,
            points: None,
        };
        let mut daily = DailyState::new(GameDate::ymd(2024, 6, 10).unwrap(), snapshot);
        daily.correct_entity = correct.map(|name| Entity::new(EntityId(1), name));
        view.daily = Some(daily);
        view.phase = if over {
            SessionPhase::GameOver
        } else {
            SessionPhase::Active
        };
        view
    }

    fn fill_of(layer: &MapLayer, index: usize) -> Rgb {
        layer.layers()[index].style.fill
    }

    #[test]
    fn selection_changes_restyle_in_place() {
        let selection = SharedSelection::new();
        let mut map = MapLayer::mount(Arc::new(countries()), &config());
        let active = view(false, None);
        let now = Instant::now();

        assert!(map.sync(&active, &selection, now).restyled);
        assert!(!map.sync(&active, &selection, now).restyled);
        assert_eq!(map.restyle_count(), 1);

        selection.toggle("spain");
        map.sync(&active, &selection, now);
        assert_eq!(fill_of(&map, 1), RED);
        assert_eq!(fill_of(&map, 0), GREY);
        assert_eq!(map.restyle_count(), 2);
    }

    #[test]
    fn game_over_highlights_raises_and_flies_once() {
        let selection = SharedSelection::new();
        selection.toggle("France");
        let mut map = MapLayer::mount(Arc::new(countries()), &config());
        let now = Instant::now();
        map.sync(&view(false, None), &selection, now);
        assert_eq!(fill_of(&map, 0), RED);

        let over = view(true, Some("France"));
        let outcome = map.sync(&over, &selection, now);
        assert!(outcome.revealed);
        assert!(map.camera().is_animating());
        assert_eq!(fill_of(&map, 0), GREEN);
        assert_eq!(fill_of(&map, 2), GREEN);

        let order: Vec<&str> = map.painted().map(|(feature, _)| feature.label.as_str()).collect();
        assert_eq!(order, vec!["Spain", "France", "French Guiana"]);

        selection.toggle("Spain");
        assert!(!map.sync(&over, &selection, now).revealed);
        assert!(map.reveal(&over, now));
    }

    #[test]
    fn reveal_frames_mainland_not_overseas_parts() {
        const SPLIT: &str = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"SOVEREIGNT": "France", "ADMIN": "France"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-5,42],[8,42],[8,51],[-5,51],[-5,42]]]}},
                {"type": "Feature",
                 "properties": {"SOVEREIGNT": "France", "ADMIN": "French Polynesia"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-152,-18],[-148,-18],[-148,-14],[-152,-14],[-152,-18]]]}},
                {"type": "Feature",
                 "properties": {"SOVEREIGNT": "France", "ADMIN": "New Caledonia"},
                 "geometry": {"type": "Polygon", "coordinates": [[[164,-23],[168,-23],[168,-19],[164,-19],[164,-23]]]}}
            ]
        }"#;
        let dataset = RegionDataset::from_geojson(game_core::GameMode::Country, SPLIT).unwrap();
        let selection = SharedSelection::new();
        let mut map = MapLayer::mount(Arc::new(dataset), &config());
        let now = Instant::now();

        assert!(map.sync(&view(true, Some("France")), &selection, now).revealed);
        map.tick(now + Duration::from_secs(3));

        assert!(!map.camera().is_animating());
        assert!(map.camera().zoom() > 5.0);
        let visible = map.camera().visible_bounds();
        assert!(visible.min.lon <= -5.0 && visible.max.lon >= 8.0);
        assert!(visible.min.lon > -60.0 && visible.max.lon < 60.0);
        assert!(map.layers().iter().all(|layer| layer.style.fill == GREEN));
    }

    #[test]
    fn missing_correct_feature_is_skipped_silently() {
        let selection = SharedSelection::new();
        let mut map = MapLayer::mount(Arc::new(countries()), &config());
        let outcome = map.sync(&view(true, Some("Atlantis")), &selection, Instant::now());
        assert!(outcome.restyled);
        assert!(!outcome.revealed);
        assert!(!map.camera().is_animating());
        assert!(map.layers().iter().all(|layer| layer.style.fill != GREEN));
    }

    #[test]
    fn hover_exit_uses_current_state() {
        let selection = SharedSelection::new();
        let mut map = MapLayer::mount(Arc::new(countries()), &config());
        let active = view(false, None);
        map.sync(&active, &selection, Instant::now());

        let inside_spain = GeoPoint::new(12.0, 2.0);
        assert!(map.pointer_moved(Some(inside_spain), &active, &selection));
        assert_eq!(map.hovered_label(), Some("Spain"));
        assert_eq!(map.layers()[1].style.weight, 2.0);

        // Selection changes while hovering; exit must not restore the old paint.
        selection.toggle("Spain");
        assert!(map.pointer_moved(None, &active, &selection));
        assert_eq!(map.layers()[1].style, region_style(true, false));
        assert!(map.hovered_label().is_none());
    }

    #[test]
    fn click_toggles_even_after_game_over() {
        let selection = SharedSelection::new();
        let mut map = MapLayer::mount(Arc::new(countries()), &config());
        map.sync(&view(true, Some("Spain")), &selection, Instant::now());

        let outcome = map.click(GeoPoint::new(5.0, 5.0), &selection).unwrap();
        assert_eq!(outcome.label, "France");
        assert!(outcome.selected);
        assert!(selection.contains("FRANCE"));

        assert!(map.click(GeoPoint::new(100.0, 0.0), &selection).is_none());
        let outcome = map.click(GeoPoint::new(5.0, 5.0), &selection).unwrap();
        assert!(!outcome.selected);
    }
}
