//! `certainties.txt` parser.
//!
//! Line layout: `<certainty_id> <name>`, e.g. `1 not visible` or `2 Guessing`.

use std::collections::HashMap;

use crate::format::error::{LineIssue, Parsed, WarningLog};
use crate::format::tokenizer::{self, split_fields};
use crate::model::{CertaintyId, CertaintyLevel};

const RESOURCE: &str = "certainties.txt";

/// Certainty levels keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CertaintyCatalog {
    levels: HashMap<CertaintyId, CertaintyLevel>,
    order: Vec<CertaintyId>,
}

impl CertaintyCatalog {
    /// Add a level, replacing any earlier one with the same id.
    pub fn insert(&mut self, level: CertaintyLevel) {
        let certainty_id = level.certainty_id.clone();
        if self.levels.insert(certainty_id.clone(), level).is_none() {
            self.order.push(certainty_id);
        }
    }

    /// Display name of a certainty level.
    pub fn name(&self, certainty_id: &str) -> Option<&str> {
        self.levels
            .get(certainty_id)
            .map(|l| l.certainty_name.as_str())
    }

    /// Levels in file order.
    pub fn iter(&self) -> impl Iterator<Item = &CertaintyLevel> {
        self.order.iter().filter_map(|id| self.levels.get(id))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Parse `certainties.txt`. Underscores in names become spaces.
pub fn parse_certainties(text: &str) -> Parsed<CertaintyCatalog> {
    let mut warnings = WarningLog::new(RESOURCE);
    let mut catalog = CertaintyCatalog::default();

    for (line_number, line) in tokenizer::records(text) {
        let Some(fields) = split_fields(line, 2) else {
            warnings.record(line_number, line, LineIssue::missing_fields(2, line));
            continue;
        };
        catalog.insert(CertaintyLevel {
            certainty_id: CertaintyId::new(fields[0]),
            certainty_name: fields[1].replace('_', " "),
        });
    }

    warnings.finish(catalog)
}
