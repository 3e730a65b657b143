//! Tests for the two-stage parts parser.

use crate::format::{LineIssue, parse_part_definitions, parse_part_locations};

const PARTS: &str = "\
1 back
2 beak
3 belly
10 left wing
";

#[test]
fn test_part_names_with_spaces() {
    let definitions = parse_part_definitions(PARTS).into_value();

    assert_eq!(definitions.len(), 4);
    assert_eq!(definitions.name("10"), Some("left wing"));
    let names: Vec<_> = definitions.iter().map(|d| d.part_name.as_str()).collect();
    assert_eq!(names, vec!["back", "beak", "belly", "left wing"]);
}

#[test]
fn test_locations_are_name_enriched() {
    let definitions = parse_part_definitions(PARTS).into_value();
    let parsed = parse_part_locations(
        "1 1 0.0 0.0 0\n1 2 312.0 182.0 1\n1 10 100.5 80.25 1\n2 3 5 6 1\n",
        definitions,
    );

    assert!(!parsed.has_warnings());
    let parts = parsed.value.for_image("1");
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[1].part_name, "beak");
    assert_eq!((parts[1].x, parts[1].y), (312.0, 182.0));
    assert!(parts[1].visible);
    assert!(!parts[0].visible);
    assert_eq!(parts[2].part_name, "left wing");
    assert_eq!(parsed.value.image_count(), 2);
}

#[test]
fn test_unknown_part_is_dropped() {
    let definitions = parse_part_definitions(PARTS).into_value();
    let parsed = parse_part_locations("1 1 1 1 1\n1 99 5 5 1\n", definitions);

    assert_eq!(parsed.value.for_image("1").len(), 1);
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].issue.is_unresolved_reference());
    assert_eq!(parsed.warnings[0].issue, LineIssue::unresolved("part", "99"));
}

#[test]
fn test_bad_coordinates_are_dropped() {
    let definitions = parse_part_definitions(PARTS).into_value();
    let parsed = parse_part_locations("1 1 x 1 1\n1 2 1 1\n1 3 4 5 1\n", definitions);

    assert_eq!(parsed.value.for_image("1").len(), 1);
    assert_eq!(parsed.warnings.len(), 2);
}

#[test]
fn test_no_definitions_drops_everything() {
    let parsed = parse_part_locations("1 1 1 1 1\n", Default::default());

    assert!(parsed.value.is_empty());
    assert!(parsed.value.for_image("1").is_empty());
    assert_eq!(parsed.warnings.len(), 1);
}
