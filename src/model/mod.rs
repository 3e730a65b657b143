//! Data models for the bird annotation dataset.

mod annotation;
mod ids;
mod species;

pub use annotation::{
    AttributeDefinition, AttributeObservation, BoundingBox, CertaintyLevel, CertaintyTone,
    ImageClassAssignment, ImageRecord, PartDefinition, PartObservation,
};
pub use ids::{AttributeId, CertaintyId, ClassId, ImageId, PartId};
pub use species::Species;
