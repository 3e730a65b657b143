//! Two-stage parts parser: `parts.txt` definitions, then `part_locs.txt`.
//!
//! Locations are enriched with the part name at parse time, so the definition
//! file must be parsed first. A location whose part id is not defined is
//! dropped rather than stored without a name.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, parse_flag, parse_number, split_fields, split_record};
use crate::model::{ImageId, PartDefinition, PartId, PartObservation};

/// Part definitions keyed by part id, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct PartDefinitions {
    definitions: HashMap<PartId, PartDefinition>,
    order: Vec<PartId>,
}

impl PartDefinitions {
    /// Create an empty set of definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any earlier one with the same id.
    pub fn insert(&mut self, definition: PartDefinition) {
        let part_id = definition.part_id.clone();
        if self.definitions.insert(part_id.clone(), definition).is_none() {
            self.order.push(part_id);
        } else {
            log::warn!("Duplicate part id {}, keeping the later name", part_id);
        }
    }

    /// Name of a part.
    pub fn name(&self, part_id: &str) -> Option<&str> {
        self.definitions.get(part_id).map(|d| d.part_name.as_str())
    }

    /// Definitions in file order.
    pub fn iter(&self) -> impl Iterator<Item = &PartDefinition> {
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

/// Part locations grouped by image.
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    definitions: PartDefinitions,
    observations: HashMap<ImageId, Vec<PartObservation>>,
}

impl PartCatalog {
    /// Part locations of an image, in file order. Empty when none were recorded.
    pub fn for_image(&self, image_id: &str) -> &[PartObservation] {
        self.observations
            .get(image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The definitions the locations were resolved against.
    pub fn definitions(&self) -> &PartDefinitions {
        &self.definitions
    }

    /// Number of images with at least one recorded part.
    pub fn image_count(&self) -> usize {
        self.observations.len()
    }

    /// Check if no part locations were recorded.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Parse `parts.txt`: `<part_id> <part name>` (names may contain spaces).
pub fn parse_part_definitions(text: &str) -> Parsed<PartDefinitions> {
    const RESOURCE: &str = "parts.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut definitions = PartDefinitions::new();

    for (line_number, line) in tokenizer::records(text) {
        let Some(fields) = split_fields(line, 2) else {
            warnings.record(line_number, line, LineIssue::missing_fields(2, line));
            continue;
        };
        definitions.insert(PartDefinition {
            part_id: PartId::new(fields[0]),
            part_name: fields[1].to_string(),
        });
    }

    log::debug!("{}: parsed {} parts", RESOURCE, definitions.len());
    warnings.finish(definitions)
}

/// Parse `part_locs.txt`: `<image_id> <part_id> <x> <y> <visible>`.
pub fn parse_part_locations(text: &str, definitions: PartDefinitions) -> Parsed<PartCatalog> {
    const RESOURCE: &str = "part_locs.txt";
    let mut warnings = WarningLog::new(RESOURCE);
    let mut observations: HashMap<ImageId, Vec<PartObservation>> = HashMap::new();

    for (line_number, line) in tokenizer::records(text) {
        match parse_location(line, &definitions) {
            Ok(observation) => observations
                .entry(observation.image_id.clone())
                .or_default()
                .push(observation),
            Err(issue) => warnings.record(line_number, line, issue),
        }
    }

    log::debug!(
        "{}: parsed part locations for {} images",
        RESOURCE,
        observations.len()
    );
    warnings.finish(PartCatalog {
        definitions,
        observations,
    })
}

fn parse_location(line: &str, definitions: &PartDefinitions) -> Result<PartObservation, LineIssue> {
    let fields = split_record(line, 5)?;
    let x = parse_number("x", fields[2])?;
    let y = parse_number("y", fields[3])?;
    let part_name = definitions
        .name(fields[1])
        .ok_or_else(|| LineIssue::unresolved("part", fields[1]))?;

    Ok(PartObservation {
        image_id: ImageId::new(fields[0]),
        part_id: PartId::new(fields[1]),
        part_name: part_name.to_string(),
        x,
        y,
        visible: parse_flag(fields[4]),
    })
}
