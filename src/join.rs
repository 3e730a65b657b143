//! Relation join engine.
//!
//! Reconstructs per-image annotation bundles from the independently parsed
//! catalogs, which share only their integer-looking identifiers.

use serde::Serialize;
use thiserror::Error;

use crate::assets::{AssetUrls, ImageUrls};
use crate::catalog::Catalogs;
use crate::format::lookup_key;
use crate::model::{
    AttributeObservation, BoundingBox, ClassId, ImageId, PartObservation, Species,
};

/// A species lookup that cannot produce a bundle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No species matches the requested name or id
    #[error("no species matches {query:?}")]
    NotFound {
        /// The query as given
        query: String,
    },

    /// The species exists but no image is assigned to it
    #[error("no images found for {name} (class {class_id})")]
    EmptyResult {
        /// Resolved class id
        class_id: ClassId,
        /// Display name of the species
        name: String,
    },
}

/// All annotation data for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBundle {
    pub image_id: ImageId,
    pub class_id: ClassId,
    pub relative_path: String,
    /// Absent when the image was never boxed; rendered as "unavailable"
    pub bounding_box: Option<BoundingBox>,
    pub parts: Vec<PartObservation>,
    pub attributes: Vec<AttributeObservation>,
}

impl ImageBundle {
    /// Raw and segmentation URLs of this image.
    pub fn urls(&self, assets: &AssetUrls) -> ImageUrls {
        assets.urls(&self.relative_path)
    }

    /// Whether the bounding box toggle has anything to show.
    pub fn has_bounding_box(&self) -> bool {
        self.bounding_box.is_some()
    }

    /// Whether the parts toggle should be enabled.
    pub fn has_parts(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Whether the attributes toggle should be enabled.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// A species with the bundles of all its images.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesBundle {
    pub species: Species,
    /// Ordered as the images appear in `image_class_labels.txt`
    pub images: Vec<ImageBundle>,
}

impl SpeciesBundle {
    /// Find the bundle of one image.
    pub fn image(&self, image_id: &str) -> Option<&ImageBundle> {
        self.images.iter().find(|b| b.image_id.as_str() == image_id)
    }
}

/// Resolve a species by display name (case-insensitive) or class id and join
/// the annotations of every image assigned to it.
///
/// Images without a path in `images.txt` are dropped with a warning. The
/// returned order is the order of `image_class_labels.txt`, not numeric.
pub fn resolve_species_bundle(
    catalogs: &Catalogs,
    query: &str,
) -> Result<SpeciesBundle, LookupError> {
    let species = catalogs
        .classes
        .resolve(query)
        .ok_or_else(|| LookupError::NotFound {
            query: query.to_string(),
        })?;
    log::debug!(
        "Resolved {:?} (key {:?}) to class {}",
        query,
        lookup_key(query),
        species.class_id
    );

    let image_ids: Vec<&ImageId> = catalogs.labels.images_of(&species.class_id).collect();
    if image_ids.is_empty() {
        return Err(LookupError::EmptyResult {
            class_id: species.class_id.clone(),
            name: species.display_name.clone(),
        });
    }

    let images: Vec<ImageBundle> = image_ids
        .into_iter()
        .filter_map(|image_id| build_image_bundle(catalogs, image_id, &species.class_id))
        .collect();

    log::info!(
        "Species {} ({}): {} images",
        species.display_name,
        species.class_id,
        images.len()
    );

    Ok(SpeciesBundle {
        species: species.clone(),
        images,
    })
}

/// Join the annotations of a single image.
///
/// Returns `None` when the image has no class assignment or no path.
pub fn resolve_image_bundle(catalogs: &Catalogs, image_id: &str) -> Option<ImageBundle> {
    let class_id = catalogs.labels.class_of(image_id)?;
    build_image_bundle(catalogs, &ImageId::new(image_id), class_id)
}

fn build_image_bundle(
    catalogs: &Catalogs,
    image_id: &ImageId,
    class_id: &ClassId,
) -> Option<ImageBundle> {
    let Some(relative_path) = catalogs.images.path(image_id.as_str()) else {
        log::warn!(
            "Image {} is labelled with class {} but has no path; skipping it",
            image_id,
            class_id
        );
        return None;
    };

    Some(ImageBundle {
        image_id: image_id.clone(),
        class_id: class_id.clone(),
        relative_path: relative_path.to_string(),
        bounding_box: catalogs.bounding_boxes.get(image_id.as_str()).cloned(),
        parts: catalogs.parts.for_image(image_id.as_str()).to_vec(),
        attributes: catalogs.attributes.for_image(image_id.as_str()).to_vec(),
    })
}
