//! Record tokenizer shared by every catalog parser.

use crate::format::error::LineIssue;

/// Iterate over the non-blank lines of a resource as `(line_number, trimmed_line)`.
///
/// Line numbers are 1-based and count blank lines, so they match an editor.
pub fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Split a line into exactly `arity` fields.
///
/// The first `arity - 1` fields are single whitespace-delimited tokens; the last
/// field absorbs the remaining text (trimmed), so names and paths containing
/// spaces survive. Returns `None` when fewer than `arity` fields are present.
pub fn split_fields(line: &str, arity: usize) -> Option<Vec<&str>> {
    if arity == 0 {
        return None;
    }

    let mut fields = Vec::with_capacity(arity);
    let mut rest = line.trim();
    while fields.len() + 1 < arity {
        let end = rest.find(char::is_whitespace)?;
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    if rest.is_empty() {
        return None;
    }
    fields.push(rest);
    Some(fields)
}

/// Split a line on whitespace, requiring at least `min_fields` tokens.
///
/// Extra trailing tokens are kept; callers ignore what they do not need.
pub fn split_record(line: &str, min_fields: usize) -> Result<Vec<&str>, LineIssue> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < min_fields {
        return Err(LineIssue::MissingFields {
            expected: min_fields,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Turn an authored name into a display name.
///
/// Whitespace runs are treated like underscores, a leading `<digits>.` ordinal
/// (species folder convention) is stripped, and every underscore becomes a space:
/// `001.Black_footed_Albatross` becomes `Black footed Albatross`.
pub fn display_name(raw: &str) -> String {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join("_");
    strip_ordinal_prefix(&joined).replace('_', " ")
}

/// Case-insensitive key used to resolve a species by name.
pub fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Remove a leading `<digits>.` prefix, if present.
pub fn strip_ordinal_prefix(name: &str) -> &str {
    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match name[digits..].strip_prefix('.') {
        Some(rest) if digits > 0 => rest,
        _ => name,
    }
}

/// Parse a coordinate or other decimal field.
pub fn parse_number(field: &'static str, value: &str) -> Result<f32, LineIssue> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineIssue::invalid_number(field, value))
}

/// Parse an integer field (certainty levels).
pub fn parse_integer(field: &'static str, value: &str) -> Result<u32, LineIssue> {
    value
        .parse::<u32>()
        .map_err(|_| LineIssue::invalid_number(field, value))
}

/// Boolean columns are the literal `1` for true; anything else is false.
pub fn parse_flag(value: &str) -> bool {
    value == "1"
}
