//! SmartBirds - bird annotation dataset core
//!
//! Parses the flat-file catalogs of a CUB-style bird dataset, joins them into
//! per-image annotation bundles, projects annotation geometry into display
//! space and tracks per-image overlay state.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod detail;
pub mod format;
pub mod join;
pub mod model;
pub mod overlay;
pub mod projection;
pub mod source;

#[cfg(test)]
mod fixtures;

pub use assets::{AssetUrls, ImageUrls};
pub use catalog::{CatalogKind, Catalogs, load_catalogs, load_species_list};
pub use config::{DatasetConfig, LogLevel, SpeciesListOrigin};
pub use detail::{DetailStatus, DetailView, ImageMode, LoadTicket, Page, paginate};
pub use join::{
    ImageBundle, LookupError, SpeciesBundle, resolve_image_bundle, resolve_species_bundle,
};
pub use overlay::{DisplayToken, LoadEvent, OverlayBoard, OverlayScene, OverlayState};
pub use projection::{Extent, Geometry, Point, Rect, project};
pub use source::{FetchError, ResourceSource};
