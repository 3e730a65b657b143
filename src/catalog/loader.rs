//! Concurrent catalog loading.

use futures::join;

use crate::catalog::{CatalogKind, Catalogs};
use crate::config::{ResourcePaths, SpeciesListOrigin};
use crate::format::{self, Parsed};
use crate::source::ResourceSource;

/// Outcome of loading a single catalog.
struct Loaded<T> {
    value: T,
    skipped: usize,
    unavailable: Option<CatalogKind>,
}

impl<T: Default> Loaded<T> {
    fn parsed(parsed: Parsed<T>) -> Self {
        Self {
            skipped: parsed.warnings.len(),
            value: parsed.value,
            unavailable: None,
        }
    }

    fn unavailable(kind: CatalogKind) -> Self {
        Self {
            value: T::default(),
            skipped: 0,
            unavailable: Some(kind),
        }
    }
}

/// Fetch a resource, logging and swallowing the error.
async fn fetch_or_log<S: ResourceSource>(source: &S, kind: CatalogKind, path: &str) -> Option<String> {
    match source.fetch(path).await {
        Ok(text) => Some(text),
        Err(e) => {
            log::error!(
                "Failed to fetch {} from {}: {}; continuing without it",
                kind.name(),
                source.location(),
                e
            );
            None
        }
    }
}

/// Load a single-resource catalog.
async fn load_single<S, T>(
    source: &S,
    kind: CatalogKind,
    path: &str,
    parse: fn(&str) -> Parsed<T>,
) -> Loaded<T>
where
    S: ResourceSource,
    T: Default,
{
    match fetch_or_log(source, kind, path).await {
        Some(text) => Loaded::parsed(parse(&text)),
        None => Loaded::unavailable(kind),
    }
}

/// Load a two-stage catalog: definitions must resolve before observations.
async fn load_two_stage<S, D, T>(
    source: &S,
    kind: CatalogKind,
    definitions_path: &str,
    observations_path: &str,
    parse_definitions: fn(&str) -> Parsed<D>,
    parse_observations: fn(&str, D) -> Parsed<T>,
) -> Loaded<T>
where
    S: ResourceSource,
    T: Default,
{
    let Some(definitions_text) = fetch_or_log(source, kind, definitions_path).await else {
        return Loaded::unavailable(kind);
    };
    let definitions = parse_definitions(&definitions_text);
    let definition_skips = definitions.warnings.len();

    let Some(observations_text) = fetch_or_log(source, kind, observations_path).await else {
        return Loaded::unavailable(kind);
    };
    let mut loaded = Loaded::parsed(parse_observations(&observations_text, definitions.value));
    loaded.skipped += definition_skips;
    loaded
}

/// Fetch and parse every catalog.
///
/// Never fails: unfetchable resources yield empty catalogs listed in
/// [`Catalogs::unavailable`], malformed lines are dropped.
pub async fn load_catalogs<S: ResourceSource>(source: &S, paths: &ResourcePaths) -> Catalogs {
    log::info!("Loading dataset catalogs from {}", source.location());

    let (classes, images, labels, bounding_boxes, parts, attributes, certainties) = join!(
        load_single(source, CatalogKind::Classes, &paths.classes, format::parse_classes),
        load_single(source, CatalogKind::Images, &paths.images, format::parse_images),
        load_single(
            source,
            CatalogKind::ImageClassLabels,
            &paths.image_class_labels,
            format::parse_image_class_labels,
        ),
        load_single(
            source,
            CatalogKind::BoundingBoxes,
            &paths.bounding_boxes,
            format::parse_bounding_boxes,
        ),
        load_two_stage(
            source,
            CatalogKind::Parts,
            &paths.parts,
            &paths.part_locations,
            format::parse_part_definitions,
            format::parse_part_locations,
        ),
        load_two_stage(
            source,
            CatalogKind::Attributes,
            &paths.attributes,
            &paths.image_attribute_labels,
            format::parse_attribute_definitions,
            format::parse_image_attribute_labels,
        ),
        load_single(
            source,
            CatalogKind::Certainties,
            &paths.certainties,
            format::parse_certainties,
        ),
    );

    let unavailable: Vec<CatalogKind> = [
        classes.unavailable,
        images.unavailable,
        labels.unavailable,
        bounding_boxes.unavailable,
        parts.unavailable,
        attributes.unavailable,
        certainties.unavailable,
    ]
    .into_iter()
    .flatten()
    .collect();

    let skipped_lines = classes.skipped
        + images.skipped
        + labels.skipped
        + bounding_boxes.skipped
        + parts.skipped
        + attributes.skipped
        + certainties.skipped;

    let catalogs = Catalogs {
        classes: classes.value,
        images: images.value,
        labels: labels.value,
        bounding_boxes: bounding_boxes.value,
        parts: parts.value,
        attributes: attributes.value,
        certainties: certainties.value,
        unavailable,
        skipped_lines,
    };

    log::info!(
        "Loaded {} species, {} images, {} labels, {} boxes ({} lines skipped, {} catalogs unavailable)",
        catalogs.classes.len(),
        catalogs.images.len(),
        catalogs.labels.len(),
        catalogs.bounding_boxes.len(),
        catalogs.skipped_lines,
        catalogs.unavailable.len()
    );

    catalogs
}

/// Fetch the species display names for the upload page.
///
/// `Bundled` reads the list shipped with the site from `site`, `Remote` reads
/// the dataset's own `classes.txt` from `assets`. An unfetchable list is empty.
pub async fn load_species_list<L, R>(
    origin: SpeciesListOrigin,
    site: &L,
    assets: &R,
    paths: &ResourcePaths,
) -> Vec<String>
where
    L: ResourceSource,
    R: ResourceSource,
{
    let fetched = match origin {
        SpeciesListOrigin::Bundled => {
            fetch_or_log(site, CatalogKind::Classes, &paths.bundled_species_list).await
        }
        SpeciesListOrigin::Remote => fetch_or_log(assets, CatalogKind::Classes, &paths.classes).await,
    };

    fetched
        .map(|text| format::parse_species_list(&text))
        .unwrap_or_default()
}
