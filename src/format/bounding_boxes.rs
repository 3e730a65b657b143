//! `bounding_boxes.txt` parser.
//!
//! Line layout: `<image_id> <x> <y> <width> <height>` in natural pixels.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, parse_number, split_record};
use crate::model::{BoundingBox, ImageId};

const RESOURCE: &str = "bounding_boxes.txt";

/// At most one bounding box per image.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxCatalog {
    boxes: HashMap<ImageId, BoundingBox>,
}

impl BoundingBoxCatalog {
    /// Add a box, replacing any earlier box for the same image.
    pub fn insert(&mut self, bbox: BoundingBox) {
        if let Some(previous) = self.boxes.insert(bbox.image_id.clone(), bbox) {
            log::warn!("Image {} has more than one bounding box", previous.image_id);
        }
    }

    /// Bounding box of an image, if one was annotated.
    pub fn get(&self, image_id: &str) -> Option<&BoundingBox> {
        self.boxes.get(image_id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Parse `bounding_boxes.txt`.
pub fn parse_bounding_boxes(text: &str) -> Parsed<BoundingBoxCatalog> {
    let mut warnings = WarningLog::new(RESOURCE);
    let mut catalog = BoundingBoxCatalog::default();

    for (line_number, line) in tokenizer::records(text) {
        match parse_box(line) {
            Ok(bbox) => catalog.insert(bbox),
            Err(issue) => warnings.record(line_number, line, issue),
        }
    }

    log::debug!("{}: parsed {} boxes", RESOURCE, catalog.len());
    warnings.finish(catalog)
}

fn parse_box(line: &str) -> Result<BoundingBox, LineIssue> {
    let fields = split_record(line, 5)?;
    Ok(BoundingBox {
        image_id: ImageId::new(fields[0]),
        x: parse_number("x", fields[1])?,
        y: parse_number("y", fields[2])?,
        width: parse_number("width", fields[3])?,
        height: parse_number("height", fields[4])?,
    })
}
