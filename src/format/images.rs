//! `images.txt` and `image_class_labels.txt` parsers.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, split_fields, split_record};
use crate::model::{ClassId, ImageClassAssignment, ImageId, ImageRecord};

/// Image paths keyed by image id.
#[derive(Debug, Clone, Default)]
pub struct ImageCatalog {
    records: HashMap<ImageId, ImageRecord>,
}

impl ImageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image record, replacing any earlier entry for the same id.
    pub fn insert(&mut self, record: ImageRecord) {
        if let Some(previous) = self.records.insert(record.image_id.clone(), record) {
            log::warn!(
                "Duplicate image id {}, keeping the later path",
                previous.image_id
            );
        }
    }

    /// Relative path of an image.
    pub fn path(&self, image_id: &str) -> Option<&str> {
        self.records.get(image_id).map(|r| r.relative_path.as_str())
    }

    /// Get the full record of an image.
    pub fn get(&self, image_id: &str) -> Option<&ImageRecord> {
        self.records.get(image_id)
    }

    /// Get the number of images.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Image-to-class assignments, in the order they appear in the file.
///
/// The ordered list is what bundles iterate, so bundle order never depends on
/// hash map iteration.
#[derive(Debug, Clone, Default)]
pub struct ClassLabels {
    assignments: Vec<ImageClassAssignment>,
    index: HashMap<ImageId, usize>,
}

impl ClassLabels {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an image to a class.
    ///
    /// A repeated image id updates the existing assignment in place, keeping its
    /// original position.
    pub fn assign(&mut self, image_id: ImageId, class_id: ClassId) {
        match self.index.get(&image_id) {
            Some(&idx) => {
                log::warn!(
                    "Image {} assigned more than once, keeping class {}",
                    image_id,
                    class_id
                );
                self.assignments[idx].class_id = class_id;
            }
            None => {
                self.index.insert(image_id.clone(), self.assignments.len());
                self.assignments
                    .push(ImageClassAssignment { image_id, class_id });
            }
        }
    }

    /// Class of an image.
    pub fn class_of(&self, image_id: &str) -> Option<&ClassId> {
        self.index
            .get(image_id)
            .map(|&idx| &self.assignments[idx].class_id)
    }

    /// Images of a class, in file order.
    pub fn images_of<'a>(&'a self, class_id: &'a ClassId) -> impl Iterator<Item = &'a ImageId> + 'a {
        self.assignments
            .iter()
            .filter(move |a| a.class_id == *class_id)
            .map(|a| &a.image_id)
    }

    /// All assignments in file order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageClassAssignment> {
        self.assignments.iter()
    }

    /// Get the number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Check if there are no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Parse `images.txt`: `<image_id> <relative_path>`.
pub fn parse_images(text: &str) -> Parsed<ImageCatalog> {
    const RESOURCE: &str = "images.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut catalog = ImageCatalog::new();

    for (line_number, line) in tokenizer::records(text) {
        let Some(fields) = split_fields(line, 2) else {
            warnings.record(line_number, line, LineIssue::missing_fields(2, line));
            continue;
        };
        catalog.insert(ImageRecord {
            image_id: ImageId::new(fields[0]),
            relative_path: fields[1].to_string(),
        });
    }

    log::debug!("{}: parsed {} images", RESOURCE, catalog.len());
    warnings.finish(catalog)
}

/// Parse `image_class_labels.txt`: `<image_id> <class_id>`.
pub fn parse_image_class_labels(text: &str) -> Parsed<ClassLabels> {
    const RESOURCE: &str = "image_class_labels.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut labels = ClassLabels::new();

    for (line_number, line) in tokenizer::records(text) {
        match split_record(line, 2) {
            Ok(fields) => labels.assign(ImageId::new(fields[0]), ClassId::new(fields[1])),
            Err(issue) => warnings.record(line_number, line, issue),
        }
    }

    log::debug!("{}: parsed {} assignments", RESOURCE, labels.len());
    warnings.finish(labels)
}
