//! Global constants for the SmartBirds dataset core

/// Base location of the hosted dataset assets
pub const DEFAULT_ASSET_BASE_URL: &str = "https://storage.googleapis.com/smartbirds-assets";

/// Directory (relative to the asset base) holding the raw photographs
pub const DEFAULT_RAW_IMAGES_DIR: &str = "raw_images";

/// Directory (relative to the asset base) holding the segmentation masks
pub const DEFAULT_SEGMENTATIONS_DIR: &str = "segmentations";

/// Extension every segmentation mask is stored with
pub const SEGMENTATION_EXTENSION: &str = "png";

/// Image extensions that are swapped for the segmentation extension
pub const SWAPPABLE_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Number of images shown per page in the species detail view
pub const DEFAULT_IMAGES_PER_PAGE: usize = 6;

/// Radius of a part marker in rendered pixels
pub const PART_MARKER_RADIUS: f32 = 5.0;

/// Lowest certainty level rendered as confident
pub const CONFIDENT_CERTAINTY_LEVEL: u32 = 3;

/// Certainty level rendered as tentative
pub const TENTATIVE_CERTAINTY_LEVEL: u32 = 2;

/// Default resource paths, relative to the asset base.
pub mod resources {
    pub const CLASSES: &str = "classes.txt";
    pub const IMAGES: &str = "images.txt";
    pub const IMAGE_CLASS_LABELS: &str = "image_class_labels.txt";
    pub const BOUNDING_BOXES: &str = "bounding_boxes.txt";
    pub const PARTS: &str = "parts/parts.txt";
    pub const PART_LOCATIONS: &str = "parts/part_locs.txt";
    pub const ATTRIBUTES: &str = "attributes.txt";
    pub const IMAGE_ATTRIBUTE_LABELS: &str = "image_attribute_labels.txt";
    pub const CERTAINTIES: &str = "attributes/certainties.txt";
    /// Species list shipped with the site itself (relative site path)
    pub const BUNDLED_SPECIES_LIST: &str = "classes.txt";
}
