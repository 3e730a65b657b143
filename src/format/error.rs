//! Line-level issues raised while parsing dataset files.
//!
//! None of these abort a parse. A line with an issue is dropped, logged, and
//! reported back to the caller as a [`ParseWarning`].

use thiserror::Error;

/// Why a single record was dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineIssue {
    /// Fewer whitespace-separated fields than the record needs
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields {
        /// Number of fields the record layout requires
        expected: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// A field that must be numeric could not be parsed
    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber {
        /// Name of the offending field
        field: &'static str,
        /// Raw text of the field
        value: String,
    },

    /// An observation names an id missing from its definition file
    #[error("unknown {kind} id {id}")]
    UnresolvedReference {
        /// Kind of definition that was looked up (e.g. "part")
        kind: &'static str,
        /// The missing identifier
        id: String,
    },
}

impl LineIssue {
    /// Create a missing fields issue.
    pub fn missing_fields(expected: usize, line: &str) -> Self {
        Self::MissingFields {
            expected,
            found: line.split_whitespace().count(),
        }
    }

    /// Create an invalid number issue.
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
        }
    }

    /// Create an unresolved reference issue.
    pub fn unresolved(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            kind,
            id: id.into(),
        }
    }

    /// Whether the line itself was well-formed but referenced an unknown id.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self, LineIssue::UnresolvedReference { .. })
    }
}

/// A dropped line, with enough context to find it in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// Resource the line came from (e.g. `part_locs.txt`)
    pub resource: &'static str,
    /// 1-based line number
    pub line_number: usize,
    /// Trimmed text of the line
    pub line: String,
    /// What was wrong with it
    pub issue: LineIssue,
}

/// Result of parsing one resource: the catalog plus every dropped line.
#[derive(Debug, Clone, Default)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    /// Check if any line was dropped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Discard the warnings and keep the catalog.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Collects warnings for one resource and logs each as it is recorded.
pub(crate) struct WarningLog {
    resource: &'static str,
    warnings: Vec<ParseWarning>,
}

impl WarningLog {
    pub(crate) fn new(resource: &'static str) -> Self {
        Self {
            resource,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, line_number: usize, line: &str, issue: LineIssue) {
        log::warn!(
            "{}:{}: skipping line ({}): {:?}",
            self.resource,
            line_number,
            issue,
            line
        );
        self.warnings.push(ParseWarning {
            resource: self.resource,
            line_number,
            line: line.to_string(),
            issue,
        });
    }

    pub(crate) fn finish<T>(self, value: T) -> Parsed<T> {
        if !self.warnings.is_empty() {
            log::info!(
                "{}: {} line(s) skipped",
                self.resource,
                self.warnings.len()
            );
        }
        Parsed {
            value,
            warnings: self.warnings,
        }
    }
}
