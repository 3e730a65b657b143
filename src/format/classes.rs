//! `classes.txt` parser and the species list helpers built on the same file.
//!
//! Line layout: `<class_id> <name>`, e.g. `1 001.Black_footed_Albatross`.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, display_name, lookup_key, split_fields};
use crate::model::{ClassId, Species};

const RESOURCE: &str = "classes.txt";

/// Species catalog with a reverse lookup by lower-cased display name.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    species: HashMap<ClassId, Species>,
    order: Vec<ClassId>,
    by_name: HashMap<String, ClassId>,
}

impl ClassCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a species, replacing any earlier entry with the same id.
    pub fn insert(&mut self, species: Species) {
        let key = species.lookup_key();
        let collides = self
            .by_name
            .get(&key)
            .filter(|previous| **previous != species.class_id);
        if let Some(previous) = collides {
            log::warn!(
                "Species name {:?} used by classes {} and {}",
                species.display_name,
                previous,
                species.class_id
            );
        }
        self.by_name.insert(key, species.class_id.clone());

        let class_id = species.class_id.clone();
        match self.species.insert(class_id.clone(), species) {
            Some(replaced) => {
                log::warn!("Duplicate class id {}, keeping the later line", class_id);
                let stale_key = replaced.lookup_key();
                if self.by_name.get(&stale_key) == Some(&class_id)
                    && self.species.get(&class_id).map(Species::lookup_key) != Some(stale_key.clone())
                {
                    self.by_name.remove(&stale_key);
                }
            }
            None => self.order.push(class_id),
        }
    }

    /// Get a species by class id.
    pub fn get(&self, class_id: &str) -> Option<&Species> {
        self.species.get(class_id)
    }

    /// Class id for a lower-cased display name.
    pub fn id_for_name(&self, key: &str) -> Option<&ClassId> {
        self.by_name.get(key)
    }

    /// Resolve free text to a species: first by name (case-insensitive), then by id.
    pub fn resolve(&self, query: &str) -> Option<&Species> {
        let key = lookup_key(query);
        if key.is_empty() {
            return None;
        }
        self.by_name
            .get(&key)
            .and_then(|id| self.species.get(id))
            .or_else(|| self.species.get(query.trim()))
    }

    /// Species in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.order.iter().filter_map(|id| self.species.get(id))
    }

    /// Get the number of species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Parse `classes.txt`.
pub fn parse_classes(text: &str) -> Parsed<ClassCatalog> {
    let mut warnings = WarningLog::new(RESOURCE);
    let mut catalog = ClassCatalog::new();

    for (line_number, line) in tokenizer::records(text) {
        let Some(fields) = split_fields(line, 2) else {
            warnings.record(line_number, line, LineIssue::missing_fields(2, line));
            continue;
        };
        let (class_id, raw_name) = (fields[0], fields[1]);
        let name = display_name(raw_name);
        catalog.insert(Species::new(ClassId::new(class_id), raw_name, &name));
    }

    log::debug!("{}: parsed {} species", RESOURCE, catalog.len());
    warnings.finish(catalog)
}

/// Parse a species list: display names only, in file order.
///
/// Tokens after the id are joined with underscores before normalising, so
/// `"5 001.Black footed Albatross"` and `"5 001.Black_footed_Albatross"` both
/// yield `"Black footed Albatross"`. Lines without a name are skipped.
pub fn parse_species_list(text: &str) -> Vec<String> {
    tokenizer::records(text)
        .filter_map(|(_, line)| split_fields(line, 2))
        .map(|fields| display_name(fields[1]))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Normalise a class label (as returned by a classifier) for display.
pub fn format_species_name(label: &str) -> String {
    display_name(label)
}
