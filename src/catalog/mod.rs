//! Loading every dataset catalog into one immutable value.
//!
//! Independent resources are fetched concurrently and awaited jointly. The two
//! two-stage catalogs (parts, attributes) fetch their definition file first and
//! their per-image file second. A resource that cannot be fetched resolves to
//! an empty catalog and is recorded in [`Catalogs::unavailable`]; loading never
//! fails as a whole.

mod loader;


use serde::Serialize;

use crate::format::{
    AttributeCatalog, BoundingBoxCatalog, CertaintyCatalog, ClassCatalog, ClassLabels,
    ImageCatalog, PartCatalog,
};

pub use loader::{load_catalogs, load_species_list};

/// The catalogs that make up the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CatalogKind {
    Classes,
    Images,
    ImageClassLabels,
    BoundingBoxes,
    Parts,
    Attributes,
    Certainties,
}

impl CatalogKind {
    /// Get the display name for this catalog.
    pub fn name(&self) -> &'static str {
        match self {
            CatalogKind::Classes => "classes",
            CatalogKind::Images => "images",
            CatalogKind::ImageClassLabels => "image class labels",
            CatalogKind::BoundingBoxes => "bounding boxes",
            CatalogKind::Parts => "parts",
            CatalogKind::Attributes => "attributes",
            CatalogKind::Certainties => "certainties",
        }
    }

    /// Get all catalogs.
    pub fn all() -> &'static [CatalogKind] {
        &[
            CatalogKind::Classes,
            CatalogKind::Images,
            CatalogKind::ImageClassLabels,
            CatalogKind::BoundingBoxes,
            CatalogKind::Parts,
            CatalogKind::Attributes,
            CatalogKind::Certainties,
        ]
    }
}

/// All parsed catalogs of one load.
///
/// Immutable once built; the join engine only reads from it.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub classes: ClassCatalog,
    pub images: ImageCatalog,
    pub labels: ClassLabels,
    pub bounding_boxes: BoundingBoxCatalog,
    pub parts: PartCatalog,
    pub attributes: AttributeCatalog,
    pub certainties: CertaintyCatalog,
    /// Catalogs whose resources could not be fetched and are therefore empty
    pub unavailable: Vec<CatalogKind>,
    /// Total number of lines dropped across all resources
    pub skipped_lines: usize,
}

impl Catalogs {
    /// Whether some catalogs are missing, leaving the data partial.
    pub fn is_partial(&self) -> bool {
        !self.unavailable.is_empty()
    }

    /// Display name of a certainty level.
    pub fn certainty_name(&self, certainty_id: &str) -> Option<&str> {
        self.certainties.name(certainty_id)
    }
}
