//! A small dataset shaped like the real asset bucket, for tests.
//!
//! Class 1 has images 1 and 3 (in that label order), class 2 has image 2 and
//! class 3 has no images at all. Image 3 has no bounding box.

use crate::constants::resources;
use crate::source::MemorySource;

pub const PART_LOCATIONS: &str = resources::PART_LOCATIONS;

pub const CLASSES: &str = "\
1 001.Black_footed_Albatross
2 002.Laysan_Albatross
3 003.Sooty_Albatross
";

pub const IMAGES: &str = "\
1 001.Black_footed_Albatross/Black_Footed_Albatross_0001_796111.jpg
2 002.Laysan_Albatross/Laysan_Albatross_0002_1027.jpg
3 001.Black_footed_Albatross/Black_Footed_Albatross_0003_796136.jpg
";

pub const IMAGE_CLASS_LABELS: &str = "\
1 1
2 2
3 1
";

pub const BOUNDING_BOXES: &str = "\
1 60.0 27.0 325.0 304.0
2 139.0 30.0 153.0 264.0
";

pub const PARTS: &str = "\
1 back
2 beak
3 belly
";

pub const PART_LOCS: &str = "\
1 1 0.0 0.0 0
1 2 312.0 182.0 1
2 3 100.0 221.0 1
3 2 140.0 60.0 1
";

pub const ATTRIBUTES: &str = "\
1 has_bill_shape::curved_(up_or_down)
2 has_bill_shape::dagger
";

pub const IMAGE_ATTRIBUTE_LABELS: &str = "\
1 1 0 3 27.7080
1 2 1 4 27.7080
2 1 1 2
";

pub const CERTAINTIES: &str = "\
1 not visible
2 guessing
3 probably
4 definitely
";

/// The sample dataset under its default resource paths.
pub fn sample_source() -> MemorySource {
    MemorySource::new()
        .with(resources::CLASSES, CLASSES)
        .with(resources::IMAGES, IMAGES)
        .with(resources::IMAGE_CLASS_LABELS, IMAGE_CLASS_LABELS)
        .with(resources::BOUNDING_BOXES, BOUNDING_BOXES)
        .with(resources::PARTS, PARTS)
        .with(resources::PART_LOCATIONS, PART_LOCS)
        .with(resources::ATTRIBUTES, ATTRIBUTES)
        .with(resources::IMAGE_ATTRIBUTE_LABELS, IMAGE_ATTRIBUTE_LABELS)
        .with(resources::CERTAINTIES, CERTAINTIES)
}
