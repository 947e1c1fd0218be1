//! Map sync layer: polygon datasets, paint rules, camera and feature layers.
//!
//! The layer reads the session through a synchronous [`runtime::SessionView`]
//! snapshot and never mutates it. Clicks only touch the selection set.
mod camera;
mod dataset;
mod layer;
mod style;

pub use camera::Camera;
pub use dataset::{
    Bounds, DatasetError, DatasetLayout, GeoPoint, Polygon, RegionDataset, RegionFeature,
};
pub use layer::{ClickOutcome, FeatureLayer, MapLayer, PaintInputs, SyncOutcome};
pub use style::{PaintRole, RegionStyle, Rgb, hover_style, region_style};
