//! Per-image annotation records.
//!
//! All coordinates are in natural pixel units of the source image with a
//! top-left origin.

use serde::Serialize;

use super::{AttributeId, CertaintyId, ClassId, ImageId, PartId};
use crate::constants::{CONFIDENT_CERTAINTY_LEVEL, TENTATIVE_CERTAINTY_LEVEL};

/// An image and its path relative to the image directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub image_id: ImageId,
    pub relative_path: String,
}

/// Assignment of an image to its species class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageClassAssignment {
    pub image_id: ImageId,
    pub class_id: ClassId,
}

/// Axis-aligned bounding box of the bird in an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub image_id: ImageId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A named body part (`parts.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartDefinition {
    pub part_id: PartId,
    pub part_name: String,
}

/// Location of one part in one image, enriched with the part name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartObservation {
    pub image_id: ImageId,
    pub part_id: PartId,
    pub part_name: String,
    pub x: f32,
    pub y: f32,
    /// Parts hidden in the photograph are still listed, usually at `(0, 0)`
    pub visible: bool,
}

/// A binary visual attribute (`attributes.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDefinition {
    pub attribute_id: AttributeId,
    /// Name with `::` separators replaced by spaces
    pub attribute_name: String,
}

/// One annotator judgement of an attribute for an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeObservation {
    pub image_id: ImageId,
    pub attribute_id: AttributeId,
    pub attribute_name: String,
    pub is_present: bool,
    pub certainty_id: CertaintyId,
    /// Seconds the annotator spent, when the file carries the column
    pub time: Option<f32>,
}

impl AttributeObservation {
    /// Presentation tone derived from the certainty level.
    pub fn tone(&self) -> CertaintyTone {
        CertaintyTone::from_certainty(&self.certainty_id)
    }
}

/// A certainty level (`certainties.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertaintyLevel {
    pub certainty_id: CertaintyId,
    pub certainty_name: String,
}

/// How confidently an attribute judgement should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CertaintyTone {
    /// Level 3 and above
    Confident,
    /// Level 2
    Tentative,
    /// Anything lower, or a non-numeric level
    Doubtful,
}

impl CertaintyTone {
    /// Classify a certainty identifier by its numeric level.
    pub fn from_certainty(certainty: &CertaintyId) -> Self {
        match certainty.level() {
            Some(level) if level >= CONFIDENT_CERTAINTY_LEVEL => CertaintyTone::Confident,
            Some(TENTATIVE_CERTAINTY_LEVEL) => CertaintyTone::Tentative,
            _ => CertaintyTone::Doubtful,
        }
    }

    /// Get the display name for this tone.
    pub fn name(&self) -> &'static str {
        match self {
            CertaintyTone::Confident => "Confident",
            CertaintyTone::Tentative => "Tentative",
            CertaintyTone::Doubtful => "Doubtful",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certainty_tone_thresholds() {
        assert_eq!(
            CertaintyTone::from_certainty(&CertaintyId::new("4")),
            CertaintyTone::Confident
        );
        assert_eq!(
            CertaintyTone::from_certainty(&CertaintyId::new("3")),
            CertaintyTone::Confident
        );
        assert_eq!(
            CertaintyTone::from_certainty(&CertaintyId::new("2")),
            CertaintyTone::Tentative
        );
        assert_eq!(
            CertaintyTone::from_certainty(&CertaintyId::new("1")),
            CertaintyTone::Doubtful
        );
    }

    #[test]
    fn test_non_numeric_certainty_is_doubtful() {
        assert_eq!(
            CertaintyTone::from_certainty(&CertaintyId::new("unsure")),
            CertaintyTone::Doubtful
        );
    }
}
