//! Configuration file support for SmartBirds.
//!
//! This module provides serialization and deserialization of the dataset
//! location, resource layout and view settings. Every field has a default, so
//! a config file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{self, resources};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Where the upload page reads its species list from.
///
/// The two page variants disagree; both are kept and selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesListOrigin {
    /// The `classes.txt` shipped with the site itself
    #[default]
    Bundled,
    /// The asset bucket's `classes.txt`
    Remote,
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Paths of the dataset resources, relative to the asset base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub classes: String,
    pub images: String,
    pub image_class_labels: String,
    pub bounding_boxes: String,
    pub parts: String,
    pub part_locations: String,
    pub attributes: String,
    pub image_attribute_labels: String,
    pub certainties: String,
    /// Relative site path of the bundled species list
    pub bundled_species_list: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            classes: resources::CLASSES.to_string(),
            images: resources::IMAGES.to_string(),
            image_class_labels: resources::IMAGE_CLASS_LABELS.to_string(),
            bounding_boxes: resources::BOUNDING_BOXES.to_string(),
            parts: resources::PARTS.to_string(),
            part_locations: resources::PART_LOCATIONS.to_string(),
            attributes: resources::ATTRIBUTES.to_string(),
            image_attribute_labels: resources::IMAGE_ATTRIBUTE_LABELS.to_string(),
            certainties: resources::CERTAINTIES.to_string(),
            bundled_species_list: resources::BUNDLED_SPECIES_LIST.to_string(),
        }
    }
}

/// Where image assets live, relative to the asset base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetLayout {
    pub raw_images_dir: String,
    pub segmentations_dir: String,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            raw_images_dir: constants::DEFAULT_RAW_IMAGES_DIR.to_string(),
            segmentations_dir: constants::DEFAULT_SEGMENTATIONS_DIR.to_string(),
        }
    }
}

/// Species detail view settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Images per page in the species detail view
    pub images_per_page: usize,
    /// Origin of the upload page's species list
    pub species_list_origin: SpeciesListOrigin,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            images_per_page: constants::DEFAULT_IMAGES_PER_PAGE,
            species_list_origin: SpeciesListOrigin::default(),
        }
    }
}

/// Dataset configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Base URL (or directory) all resource paths are relative to
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,

    #[serde(default)]
    pub resources: ResourcePaths,

    #[serde(default)]
    pub assets: AssetLayout,

    #[serde(default)]
    pub view: ViewSettings,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_asset_base_url() -> String {
    constants::DEFAULT_ASSET_BASE_URL.to_string()
}

impl DatasetConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            asset_base_url: default_asset_base_url(),
            resources: ResourcePaths::default(),
            assets: AssetLayout::default(),
            view: ViewSettings::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from a JSON file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
