//! Two-stage attributes parser: `attributes.txt`, then `image_attribute_labels.txt`.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, parse_flag, parse_integer, parse_number, split_fields, split_record};
use crate::model::{AttributeDefinition, AttributeId, AttributeObservation, CertaintyId, ImageId};

/// Attribute definitions keyed by attribute id, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct AttributeDefinitions {
    definitions: HashMap<AttributeId, AttributeDefinition>,
    order: Vec<AttributeId>,
}

impl AttributeDefinitions {
    /// Create an empty set of definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any earlier one with the same id.
    pub fn insert(&mut self, definition: AttributeDefinition) {
        let attribute_id = definition.attribute_id.clone();
        if self
            .definitions
            .insert(attribute_id.clone(), definition)
            .is_none()
        {
            self.order.push(attribute_id);
        } else {
            log::warn!("Duplicate attribute id {}, keeping the later name", attribute_id);
        }
    }

    /// Name of an attribute.
    pub fn name(&self, attribute_id: &str) -> Option<&str> {
        self.definitions
            .get(attribute_id)
            .map(|d| d.attribute_name.as_str())
    }

    /// Definitions in file order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.order.iter().filter_map(|id| self.definitions.get(id))
    }

    /// Get the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Attribute judgements grouped by image.
#[derive(Debug, Clone, Default)]
pub struct AttributeCatalog {
    definitions: AttributeDefinitions,
    observations: HashMap<ImageId, Vec<AttributeObservation>>,
}

impl AttributeCatalog {
    /// Attribute judgements of an image, in file order.
    pub fn for_image(&self, image_id: &str) -> &[AttributeObservation] {
        self.observations
            .get(image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The definitions the judgements were resolved against.
    pub fn definitions(&self) -> &AttributeDefinitions {
        &self.definitions
    }

    /// Number of images with at least one judgement.
    pub fn image_count(&self) -> usize {
        self.observations.len()
    }

    /// Check if no judgements were recorded.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Parse `attributes.txt`: `<attribute_id> <group::value>`.
///
/// `has_bill_shape::dagger` becomes `has_bill_shape dagger`.
pub fn parse_attribute_definitions(text: &str) -> Parsed<AttributeDefinitions> {
    const RESOURCE: &str = "attributes.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut definitions = AttributeDefinitions::new();

    for (line_number, line) in tokenizer::records(text) {
        let Some(fields) = split_fields(line, 2) else {
            warnings.record(line_number, line, LineIssue::missing_fields(2, line));
            continue;
        };
        definitions.insert(AttributeDefinition {
            attribute_id: AttributeId::new(fields[0]),
            attribute_name: fields[1].replace("::", " "),
        });
    }

    log::debug!("{}: parsed {} attributes", RESOURCE, definitions.len());
    warnings.finish(definitions)
}

/// Parse `image_attribute_labels.txt`:
/// `<image_id> <attribute_id> <is_present> <certainty_id> [time]`.
pub fn parse_image_attribute_labels(
    text: &str,
    definitions: AttributeDefinitions,
) -> Parsed<AttributeCatalog> {
    const RESOURCE: &str = "image_attribute_labels.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut observations: HashMap<ImageId, Vec<AttributeObservation>> = HashMap::new();

    for (line_number, line) in tokenizer::records(text) {
        match parse_label(line, &definitions) {
            Ok(observation) => observations
                .entry(observation.image_id.clone())
                .or_default()
                .push(observation),
            Err(issue) => warnings.record(line_number, line, issue),
        }
    }

    log::debug!(
        "{}: parsed attribute labels for {} images",
        RESOURCE,
        observations.len()
    );
    warnings.finish(AttributeCatalog {
        definitions,
        observations,
    })
}

fn parse_label(
    line: &str,
    definitions: &AttributeDefinitions,
) -> Result<AttributeObservation, LineIssue> {
    let fields = split_record(line, 4)?;
    parse_integer("certainty", fields[3])?;
    let attribute_name = definitions
        .name(fields[1])
        .ok_or_else(|| LineIssue::unresolved("attribute", fields[1]))?;
    // Trailing time column is informational only; a bad value does not drop the line
    let time = fields.get(4).and_then(|t| parse_number("time", t).ok());

    Ok(AttributeObservation {
        image_id: ImageId::new(fields[0]),
        attribute_id: AttributeId::new(fields[1]),
        attribute_name: attribute_name.to_string(),
        is_present: parse_flag(fields[2]),
        certainty_id: CertaintyId::new(fields[3]),
        time,
    })
}
