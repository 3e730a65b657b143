//! Species data model for dataset classes.

use serde::Serialize;

use super::ClassId;

/// A species class from `classes.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Species {
    /// Unique identifier for the class
    pub class_id: ClassId,
    /// Name as authored, e.g. `001.Black_footed_Albatross`
    pub raw_name: String,
    /// Human readable name, e.g. `Black footed Albatross`
    pub display_name: String,
}

impl Species {
    /// Create a new species record.
    pub fn new(class_id: ClassId, raw_name: &str, display_name: &str) -> Self {
        Self {
            class_id,
            raw_name: raw_name.to_string(),
            display_name: display_name.to_string(),
        }
    }

    /// Key used for case-insensitive name resolution.
    pub fn lookup_key(&self) -> String {
        crate::format::lookup_key(&self.display_name)
    }
}
