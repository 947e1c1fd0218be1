//! Static polygon datasets, one GeoJSON file per game mode.
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

use game_core::{GameMode, normalize_region_name};

/// Which file a mode draws and which feature properties name its regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetLayout {
    pub file_name: &'static str,
    /// Canonical property matched against selections and the correct entity.
    pub name_property: &'static str,
    /// Property shown to the player; falls back to the canonical name.
    pub label_property: &'static str,
}

impl DatasetLayout {
    pub const fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Country => Self {
                file_name: "countries_50m.geojson",
                name_property: "SOVEREIGNT",
                label_property: "ADMIN",
            },
            GameMode::UsStates => Self {
                file_name: "us-states.geojson",
                name_property: "name",
                label_property: "name",
            },
            GameMode::Powiaty => Self {
                file_name: "powiaty-min.geojson",
                name_property: "nazwa",
                label_property: "nazwa",
            },
            GameMode::Wojewodztwa => Self {
                file_name: "wojewodztwa-min.geojson",
                name_property: "nazwa",
                label_property: "nazwa",
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read map dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download map dataset from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("map dataset is not valid GeoJSON")]
    Parse(#[from] serde_json::Error),

    #[error("map dataset {file} has no drawable {property:?} regions")]
    Empty {
        file: &'static str,
        property: &'static str,
    },
}

/// Longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned extent in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl Bounds {
    pub fn around(point: GeoPoint) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn from_center(center: GeoPoint, half_width: f64, half_height: f64) -> Self {
        Self {
            min: GeoPoint::new(center.lon - half_width, center.lat - half_height),
            max: GeoPoint::new(center.lon + half_width, center.lat + half_height),
        }
    }

    pub fn include(&mut self, point: GeoPoint) {
        self.min.lon = self.min.lon.min(point.lon);
        self.min.lat = self.min.lat.min(point.lat);
        self.max.lon = self.max.lon.max(point.lon);
        self.max.lat = self.max.lat.max(point.lat);
    }

    pub fn union(mut self, other: &Bounds) -> Self {
        self.include(other.min);
        self.include(other.max);
        self
    }

    pub fn width(&self) -> f64 {
        self.max.lon - self.min.lon
    }

    pub fn height(&self) -> f64 {
        self.max.lat - self.min.lat
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min.lon..=self.max.lon).contains(&point.lon)
            && (self.min.lat..=self.max.lat).contains(&point.lat)
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.lon <= other.max.lon
            && other.min.lon <= self.max.lon
            && self.min.lat <= other.max.lat
            && other.min.lat <= self.max.lat
    }
}

/// Outer ring plus holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<GeoPoint>,
    pub holes: Vec<Vec<GeoPoint>>,
}

impl Polygon {
    pub fn contains(&self, point: GeoPoint) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|hole| ring_contains(hole, point))
    }

    pub fn rings(&self) -> impl Iterator<Item = &[GeoPoint]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }
}

/// Even-odd ray cast.
fn ring_contains(ring: &[GeoPoint], point: GeoPoint) -> bool {
    let mut inside = false;
    let mut previous = match ring.last() {
        Some(last) => *last,
        None => return false,
    };
    for &current in ring {
        if (current.lat > point.lat) != (previous.lat > point.lat) {
            let crossing = (previous.lon - current.lon) * (point.lat - current.lat)
                / (previous.lat - current.lat)
                + current.lon;
            if point.lon < crossing {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// One drawable administrative region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    /// Canonical name, normalized for matching.
    pub key: String,
    pub label: String,
    pub polygons: Vec<Polygon>,
    pub bounds: Bounds,
}

impl RegionFeature {
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.bounds.contains(point) && self.polygons.iter().any(|polygon| polygon.contains(point))
    }
}

/// Parsed dataset for a mode. Loaded once per mount and never mutated.
#[derive(Debug, Clone)]
pub struct RegionDataset {
    mode: GameMode,
    features: Vec<RegionFeature>,
    bounds: Bounds,
}

impl RegionDataset {
    pub fn from_geojson(mode: GameMode, source: &str) -> Result<Self, DatasetError> {
        let layout = DatasetLayout::for_mode(mode);
        let collection: WireCollection = serde_json::from_str(source)?;

        let features: Vec<RegionFeature> = collection
            .features
            .into_iter()
            .filter_map(|feature| feature.into_region(&layout))
            .collect();

        let bounds = features
            .iter()
            .map(|feature| feature.bounds)
            .reduce(|acc, next| acc.union(&next))
            .ok_or(DatasetError::Empty {
                file: layout.file_name,
                property: layout.name_property,
            })?;

        tracing::debug!(%mode, features = features.len(), "parsed map dataset");
        Ok(Self {
            mode,
            features,
            bounds,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn features(&self) -> &[RegionFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Indices of every feature whose canonical name matches `name`.
    ///
    /// Some datasets split one region over several features (a sovereignty
    /// and its dependencies), so this can return more than one.
    pub fn indices_named(&self, name: &str) -> Vec<usize> {
        let key = normalize_region_name(name);
        self.features
            .iter()
            .enumerate()
            .filter(|(_, feature)| feature.key == key)
            .map(|(index, _)| index)
            .collect()
    }

    /// Bounds of the first feature matching `name`, the one the camera
    /// focuses on. Overseas parts of a split region are highlighted but
    /// not framed.
    pub fn focus_bounds(&self, name: &str) -> Option<Bounds> {
        let key = normalize_region_name(name);
        self.features
            .iter()
            .find(|feature| feature.key == key)
            .map(|feature| feature.bounds)
    }
}

#[derive(Debug, Deserialize)]
struct WireCollection {
    features: Vec<WireFeature>,
}

#[derive(Debug, Deserialize)]
struct WireFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<WireGeometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WireGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl WireFeature {
    fn into_region(self, layout: &DatasetLayout) -> Option<RegionFeature> {
        let properties = self.properties.unwrap_or_default();
        let name = properties.get(layout.name_property)?.as_str()?;
        let label = properties
            .get(layout.label_property)
            .and_then(Value::as_str)
            .unwrap_or(name);

        let polygons: Vec<Polygon> = match self.geometry? {
            WireGeometry::Polygon { coordinates } => convert_polygon(coordinates).into_iter().collect(),
            WireGeometry::MultiPolygon { coordinates } => {
                coordinates.into_iter().filter_map(convert_polygon).collect()
            }
            WireGeometry::Unsupported => return None,
        };

        let mut points = polygons.iter().flat_map(|polygon| polygon.exterior.iter());
        let mut bounds = Bounds::around(*points.next()?);
        points.for_each(|point| bounds.include(*point));

        Some(RegionFeature {
            key: normalize_region_name(name),
            label: label.to_string(),
            polygons,
            bounds,
        })
    }
}

fn convert_ring(ring: Vec<Vec<f64>>) -> Vec<GeoPoint> {
    ring.into_iter()
        .filter_map(|position| match position.as_slice() {
            [lon, lat, ..] => Some(GeoPoint::new(*lon, *lat)),
            _ => None,
        })
        .collect()
}

fn convert_polygon(rings: Vec<Vec<Vec<f64>>>) -> Option<Polygon> {
    let mut rings = rings.into_iter().map(convert_ring);
    let exterior = rings.next().filter(|ring| ring.len() >= 3)?;
    Some(Polygon {
        exterior,
        holes: rings.filter(|ring| ring.len() >= 3).collect(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two unit squares side by side plus a split region.
    pub(crate) const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"SOVEREIGNT": "France", "ADMIN": "France"},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
            {"type": "Feature",
             "properties": {"SOVEREIGNT": "Spain", "ADMIN": "Spain"},
             "geometry": {"type": "Polygon", "coordinates": [
                [[10,0],[20,0],[20,10],[10,10],[10,0]],
                [[14,4],[16,4],[16,6],[14,6],[14,4]]]}},
            {"type": "Feature",
             "properties": {"SOVEREIGNT": "France", "ADMIN": "French Guiana"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[30,-5],[32,-5],[32,-3],[30,-3],[30,-5]]]]}},
            {"type": "Feature",
             "properties": {"ADMIN": "Nameless"},
             "geometry": {"type": "Polygon", "coordinates": [[[50,50],[51,50],[51,51],[50,50]]]}},
            {"type": "Feature",
             "properties": {"SOVEREIGNT": "Dot"},
             "geometry": {"type": "Point", "coordinates": [1, 1]}}
        ]
    }"#;

    pub(crate) fn countries() -> RegionDataset {
        RegionDataset::from_geojson(GameMode::Country, COUNTRIES).unwrap()
    }

    #[test]
    fn keeps_only_named_polygon_features() {
        let dataset = countries();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.features()[0].key, "FRANCE");
        assert_eq!(dataset.features()[2].label, "French Guiana");
    }

    #[test]
    fn matching_is_case_insensitive_and_spans_split_regions() {
        let dataset = countries();
        assert_eq!(dataset.indices_named("france"), vec![0, 2]);
        let bounds = dataset.focus_bounds(" FRANCE ").unwrap();
        assert_eq!(bounds.min, GeoPoint::new(0.0, 0.0));
        assert_eq!(bounds.max, GeoPoint::new(10.0, 10.0));
        assert!(dataset.focus_bounds("Atlantis").is_none());
    }

    #[test]
    fn point_in_polygon_respects_holes() {
        let dataset = countries();
        let spain = &dataset.features()[1];
        assert!(spain.contains(GeoPoint::new(12.0, 2.0)));
        assert!(!spain.contains(GeoPoint::new(15.0, 5.0)));
        assert!(!spain.contains(GeoPoint::new(5.0, 5.0)));
    }

    #[test]
    fn empty_or_invalid_datasets_fail() {
        let empty = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(
            RegionDataset::from_geojson(GameMode::Powiaty, empty),
            Err(DatasetError::Empty { .. })
        ));
        assert!(matches!(
            RegionDataset::from_geojson(GameMode::Powiaty, "nope"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn polish_datasets_use_nazwa() {
        let source = r#"{"features": [{"properties": {"nazwa": "mazowieckie"},
            "geometry": {"type": "Polygon", "coordinates": [[[19,51],[22,51],[22,53],[19,53],[19,51]]]}}]}"#;
        let dataset = RegionDataset::from_geojson(GameMode::Wojewodztwa, source).unwrap();
        assert_eq!(dataset.features()[0].key, "MAZOWIECKIE");
        assert_eq!(dataset.features()[0].label, "mazowieckie");
    }
}
