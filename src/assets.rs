//! Raw image and segmentation URL construction.
//!
//! Pure string transforms: nothing here checks that an asset exists. A missing
//! segmentation mask shows up when the image fails to load, not before.

use serde::Serialize;

use crate::config::DatasetConfig;
use crate::constants::{SEGMENTATION_EXTENSION, SWAPPABLE_IMAGE_EXTENSIONS};

/// Builds asset URLs from image paths relative to the image directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    base: String,
    raw_images_dir: String,
    segmentations_dir: String,
}

/// Both renditions of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUrls {
    pub raw: String,
    pub segmentation: String,
}

impl AssetUrls {
    /// Create a URL builder.
    pub fn new(base: &str, raw_images_dir: &str, segmentations_dir: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            raw_images_dir: raw_images_dir.trim_matches('/').to_string(),
            segmentations_dir: segmentations_dir.trim_matches('/').to_string(),
        }
    }

    /// URL builder for a configuration's asset base and layout.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(
            &config.asset_base_url,
            &config.assets.raw_images_dir,
            &config.assets.segmentations_dir,
        )
    }

    /// URL of the raw photograph.
    pub fn raw_url(&self, relative_path: &str) -> String {
        format!("{}/{}/{}", self.base, self.raw_images_dir, relative_path)
    }

    /// URL of the segmentation mask.
    pub fn segmentation_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base,
            self.segmentations_dir,
            segmentation_path(relative_path)
        )
    }

    /// Both URLs of an image.
    pub fn urls(&self, relative_path: &str) -> ImageUrls {
        ImageUrls {
            raw: self.raw_url(relative_path),
            segmentation: self.segmentation_url(relative_path),
        }
    }
}

/// Swap a `.jpg`/`.jpeg`/`.png` extension (any case) for `.png`.
///
/// Paths with any other extension are returned unchanged.
pub fn segmentation_path(relative_path: &str) -> String {
    if let Some((stem, ext)) = relative_path.rsplit_once('.') {
        let swappable = !ext.contains('/')
            && SWAPPABLE_IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate));
        if swappable {
            return format!("{}.{}", stem, SEGMENTATION_EXTENSION);
        }
    }
    relative_path.to_string()
}
