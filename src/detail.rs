//! Species detail view model.
//!
//! Holds the load status of one species lookup, the page of images being
//! shown, the raw/segmentation display mode and the overlay board of the
//! images on screen. Loads are identified by [`LoadTicket`]s so that a result
//! arriving after the view moved on (new query, teardown) is discarded.

use serde::Serialize;

use crate::assets::{AssetUrls, ImageUrls};
use crate::catalog::{CatalogKind, load_catalogs};
use crate::config::DatasetConfig;
use crate::join::{ImageBundle, LookupError, SpeciesBundle, resolve_species_bundle};
use crate::overlay::{DisplayToken, OverlayBoard};
use crate::source::ResourceSource;

/// Which rendition of an image is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ImageMode {
    /// The original photograph
    #[default]
    Raw,
    /// The segmentation mask
    Segmentation,
}

impl ImageMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ImageMode::Raw => ImageMode::Segmentation,
            ImageMode::Segmentation => ImageMode::Raw,
        }
    }

    /// Pick the URL for this mode.
    pub fn url<'a>(&self, urls: &'a ImageUrls) -> &'a str {
        match self {
            ImageMode::Raw => &urls.raw,
            ImageMode::Segmentation => &urls.segmentation,
        }
    }
}

/// One page of an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// 1-based page number as requested
    pub number: usize,
    pub total_pages: usize,
    pub items: &'a [T],
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice out page `number` (1-based). Out-of-range pages are empty.
///
/// A `per_page` of zero is treated as one.
pub fn paginate<T>(items: &[T], per_page: usize, number: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);

    let page_items = if number == 0 || number > total_pages {
        &items[..0]
    } else {
        let start = (number - 1) * per_page;
        let end = (start + per_page).min(items.len());
        &items[start..end]
    };

    Page {
        number,
        total_pages,
        items: page_items,
    }
}

/// Outcome of fetching a species detail.
#[derive(Debug, Clone)]
pub struct DetailOutcome {
    pub result: Result<SpeciesBundle, LookupError>,
    /// Catalogs that could not be fetched for this lookup
    pub unavailable: Vec<CatalogKind>,
}

/// Load every catalog from `source` and resolve `query` against them.
pub async fn fetch_detail<S: ResourceSource>(
    source: &S,
    config: &DatasetConfig,
    query: &str,
) -> DetailOutcome {
    let catalogs = load_catalogs(source, &config.resources).await;
    DetailOutcome {
        result: resolve_species_bundle(&catalogs, query),
        unavailable: catalogs.unavailable,
    }
}

/// Load status of the detail view.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum DetailStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Failed(#[serde(serialize_with = "serialize_lookup_error")] LookupError),
    Ready {
        /// Catalogs missing from the data shown
        partial: Vec<CatalogKind>,
    },
}

fn serialize_lookup_error<S: serde::Serializer>(
    error: &LookupError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Identifies one load started by [`DetailView::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    generation: u64,
}

/// View model of the species detail page.
#[derive(Debug)]
pub struct DetailView {
    query: Option<String>,
    status: DetailStatus,
    bundle: Option<SpeciesBundle>,
    mode: ImageMode,
    page: usize,
    images_per_page: usize,
    overlays: OverlayBoard,
    generation: u64,
    torn_down: bool,
}

impl DetailView {
    /// Create an idle view.
    pub fn new(images_per_page: usize) -> Self {
        Self {
            query: None,
            status: DetailStatus::Idle,
            bundle: None,
            mode: ImageMode::default(),
            page: 1,
            images_per_page: images_per_page.max(1),
            overlays: OverlayBoard::new(),
            generation: 0,
            torn_down: false,
        }
    }

    /// Create an idle view with the page size from `config`.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.view.images_per_page)
    }

    /// Start a load for `query`, superseding any load in flight.
    pub fn begin_load(&mut self, query: &str) -> LoadTicket {
        self.generation += 1;
        self.query = Some(query.to_string());
        self.status = DetailStatus::Loading;
        self.bundle = None;
        self.page = 1;
        self.overlays.clear();
        self.torn_down = false;
        log::debug!("Detail load {} started for {:?}", self.generation, query);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Whether a result for `ticket` would still be applied.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        !self.torn_down && ticket.generation == self.generation
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// A successful load mounts the images of page 1 on the overlay board;
    /// their tokens are available from [`OverlayBoard::token`].
    ///
    /// Returns false, leaving the view untouched, when the load was superseded
    /// or the view torn down.
    pub fn finish_load(&mut self, ticket: &LoadTicket, outcome: DetailOutcome) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding result of superseded detail load {}", ticket.generation);
            return false;
        }

        match outcome.result {
            Ok(bundle) => {
                if !outcome.unavailable.is_empty() {
                    log::warn!(
                        "Showing {} with partial data ({} catalogs unavailable)",
                        bundle.species.display_name,
                        outcome.unavailable.len()
                    );
                }
                self.bundle = Some(bundle);
                self.status = DetailStatus::Ready {
                    partial: outcome.unavailable,
                };
                self.show_page(1);
            }
            Err(e) => {
                log::warn!("Detail lookup failed: {}", e);
                self.status = DetailStatus::Failed(e);
            }
        }
        true
    }

    /// Run a complete load for `query`.
    pub async fn load<S: ResourceSource>(
        &mut self,
        source: &S,
        config: &DatasetConfig,
        query: &str,
    ) -> &DetailStatus {
        let ticket = self.begin_load(query);
        let outcome = fetch_detail(source, config, query).await;
        self.finish_load(&ticket, outcome);
        &self.status
    }

    /// Drop all state; results of loads in flight will be discarded.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.bundle = None;
        self.status = DetailStatus::Idle;
        self.overlays.clear();
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    /// Query of the most recent load.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn bundle(&self) -> Option<&SpeciesBundle> {
        self.bundle.as_ref()
    }

    pub fn mode(&self) -> ImageMode {
        self.mode
    }

    /// Switch between raw images and segmentations.
    pub fn toggle_mode(&mut self) -> ImageMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Current page of images.
    pub fn page(&self) -> Page<'_, ImageBundle> {
        let images = self.bundle.as_ref().map(|b| b.images.as_slice()).unwrap_or(&[]);
        paginate(images, self.images_per_page, self.page)
    }

    /// Show page `number` and mount its images on the overlay board.
    ///
    /// Overlay state of the previous page is discarded.
    pub fn show_page(&mut self, number: usize) -> Vec<DisplayToken> {
        self.page = number;
        self.overlays.clear();

        let image_ids: Vec<_> = self.page().items.iter().map(|i| i.image_id.clone()).collect();
        image_ids
            .into_iter()
            .map(|image_id| self.overlays.mount(image_id))
            .collect()
    }

    /// URL of an image in the current display mode.
    pub fn image_url(&self, assets: &AssetUrls, image: &ImageBundle) -> String {
        let urls = image.urls(assets);
        self.mode.url(&urls).to_string()
    }

    pub fn overlays(&self) -> &OverlayBoard {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayBoard {
        &mut self.overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::ClassId;
    use crate::overlay::LoadEvent;

    fn not_found(query: &str) -> DetailOutcome {
        DetailOutcome {
            result: Err(LookupError::NotFound {
                query: query.to_string(),
            }),
            unavailable: Vec::new(),
        }
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();

        let first = paginate(&items, 3, 1);
        assert_eq!(first.items, &[1, 2, 3]);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 3, 3);
        assert_eq!(last.items, &[7]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let items: Vec<u32> = (1..=4).collect();
        assert!(paginate(&items, 2, 0).is_empty());
        assert!(paginate(&items, 2, 3).is_empty());
        assert_eq!(paginate::<u32>(&[], 6, 1).total_pages, 0);
        assert_eq!(paginate(&items, 0, 2).items, &[2]);
    }

    #[test]
    fn test_mode_toggle() {
        let urls = ImageUrls {
            raw: "raw.jpg".into(),
            segmentation: "seg.png".into(),
        };
        assert_eq!(ImageMode::Raw.url(&urls), "raw.jpg");
        assert_eq!(ImageMode::Raw.toggled().url(&urls), "seg.png");
        assert_eq!(ImageMode::Segmentation.toggled(), ImageMode::Raw);
    }

    #[test]
    fn test_load_ready() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let mut view = DetailView::from_config(&config);

        let status = pollster::block_on(view.load(&source, &config, "black footed albatross"));
        assert_eq!(status, &DetailStatus::Ready { partial: vec![] });

        let bundle = view.bundle().unwrap();
        assert_eq!(bundle.species.class_id, ClassId::new("1"));
        assert_eq!(view.page().items.len(), 2);
    }

    #[test]
    fn test_load_partial() {
        let source = fixtures::sample_source().with_failure(fixtures::PART_LOCATIONS, 500);
        let config = DatasetConfig::new();
        let mut view = DetailView::from_config(&config);

        let status = pollster::block_on(view.load(&source, &config, "1"));
        assert_eq!(
            status,
            &DetailStatus::Ready {
                partial: vec![CatalogKind::Parts]
            }
        );
        assert!(view.bundle().unwrap().images.iter().all(|i| i.parts.is_empty()));
    }

    #[test]
    fn test_load_failed() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let mut view = DetailView::from_config(&config);

        let status = pollster::block_on(view.load(&source, &config, "Dodo"));
        assert!(matches!(status, DetailStatus::Failed(LookupError::NotFound { .. })));
        assert!(view.bundle().is_none());
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let mut view = DetailView::new(6);
        let first = view.begin_load("Dodo");
        let second = view.begin_load("Moa");

        assert!(!view.finish_load(&first, not_found("Dodo")));
        assert_eq!(view.status(), &DetailStatus::Loading);
        assert!(view.finish_load(&second, not_found("Moa")));
        assert_eq!(view.query(), Some("Moa"));
    }

    #[test]
    fn test_result_after_teardown_is_discarded() {
        let mut view = DetailView::new(6);
        let ticket = view.begin_load("Dodo");
        view.teardown();

        assert!(!view.finish_load(&ticket, not_found("Dodo")));
        assert_eq!(view.status(), &DetailStatus::Idle);
    }

    #[test]
    fn test_show_page_mounts_images() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let mut view = DetailView::new(1);
        pollster::block_on(view.load(&source, &config, "1"));

        let tokens = view.show_page(2);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].image_id().as_str(), "3");
        assert!(view.overlays_mut().apply_load(&tokens[0], LoadEvent::new(500.0, 300.0, 250.0, 150.0)));

        let stale = tokens[0].clone();
        view.show_page(1);
        assert!(!view.overlays_mut().apply_load(&stale, LoadEvent::new(1.0, 1.0, 1.0, 1.0)));
        assert!(view.overlays().state("1").is_some());
    }

    #[test]
    fn test_first_page_mounted_after_load() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let mut view = DetailView::new(1);
        pollster::block_on(view.load(&source, &config, "1"));

        assert_eq!(view.overlays().len(), 1);
        assert_eq!(view.overlays_mut().toggle_bounding_box("1"), Some(true));
        assert_eq!(view.overlays_mut().toggle_bounding_box("3"), None);

        let token = view.overlays().token("1").unwrap();
        assert!(view.overlays_mut().apply_load(&token, LoadEvent::new(500.0, 300.0, 250.0, 150.0)));
        assert!(view.overlays().state("1").unwrap().is_loaded());
    }

    #[test]
    fn test_failed_load_mounts_nothing() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let mut view = DetailView::from_config(&config);
        pollster::block_on(view.load(&source, &config, "Dodo"));

        assert!(view.overlays().is_empty());
    }

    #[test]
    fn test_image_url_follows_mode() {
        let source = fixtures::sample_source();
        let config = DatasetConfig::new();
        let assets = AssetUrls::new("https://host/assets", "raw_images", "segmentations");
        let mut view = DetailView::from_config(&config);
        pollster::block_on(view.load(&source, &config, "1"));

        let image = view.bundle().unwrap().images[0].clone();
        assert_eq!(
            view.image_url(&assets, &image),
            "https://host/assets/raw_images/001.Black_footed_Albatross/Black_Footed_Albatross_0001_796111.jpg"
        );
        view.toggle_mode();
        assert_eq!(
            view.image_url(&assets, &image),
            "https://host/assets/segmentations/001.Black_footed_Albatross/Black_Footed_Albatross_0001_796111.png"
        );
    }
}
