//! Flat-file parsers for the bird annotation dataset.
//!
//! Every resource is newline-delimited with whitespace-separated fields. Each
//! parser turns the raw text of one resource (or a definition/observation pair)
//! into a typed catalog keyed by entity id.
//!
//! ## Resources
//!
//! | Parser | File | Layout |
//! |---|---|---|
//! | [`parse_classes`] | `classes.txt` | `class_id name` |
//! | [`parse_images`] | `images.txt` | `image_id relative_path` |
//! | [`parse_image_class_labels`] | `image_class_labels.txt` | `image_id class_id` |
//! | [`parse_bounding_boxes`] | `bounding_boxes.txt` | `image_id x y width height` |
//! | [`parse_part_definitions`] | `parts/parts.txt` | `part_id name` |
//! | [`parse_part_locations`] | `parts/part_locs.txt` | `image_id part_id x y visible` |
//! | [`parse_attribute_definitions`] | `attributes.txt` | `attribute_id group::value` |
//! | [`parse_image_attribute_labels`] | `image_attribute_labels.txt` | `image_id attribute_id is_present certainty_id [time]` |
//! | [`parse_certainties`] | `attributes/certainties.txt` | `certainty_id name` |
//!
//! A malformed line never fails a parse: it is dropped, logged, and listed in
//! [`Parsed::warnings`].
//!
//! ## Usage
//!
//! ```rust
//! use smartbirds::format::parse_bounding_boxes;
//!
//! let parsed = parse_bounding_boxes("1 60.0 27.0 325.0 304.0\n2 oops\n");
//! assert_eq!(parsed.value.len(), 1);
//! assert_eq!(parsed.warnings.len(), 1);
//! ```

mod attributes;
mod bounding_boxes;
mod certainties;
mod classes;
mod error;
mod images;
mod parts;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use attributes::{
    AttributeCatalog, AttributeDefinitions, parse_attribute_definitions,
    parse_image_attribute_labels,
};
pub use bounding_boxes::{BoundingBoxCatalog, parse_bounding_boxes};
pub use certainties::{CertaintyCatalog, parse_certainties};
pub use classes::{ClassCatalog, format_species_name, parse_classes, parse_species_list};
pub use error::{LineIssue, ParseWarning, Parsed};
pub use images::{ClassLabels, ImageCatalog, parse_image_class_labels, parse_images};
pub use parts::{PartCatalog, PartDefinitions, parse_part_definitions, parse_part_locations};
pub use tokenizer::{display_name, lookup_key};
