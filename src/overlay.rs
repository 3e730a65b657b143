//! Per-image overlay state.
//!
//! Every displayed image has three independent visibility toggles (bounding
//! box, parts, attributes) and a load phase. The phase starts `Unloaded` and
//! becomes `Loaded` when the host reports the image's natural and rendered
//! extents. Toggles may be flipped in either phase; before `Loaded` there is
//! nothing to project against, so no geometry is produced.
//!
//! Load events arrive asynchronously. Each display instance is identified by a
//! [`DisplayToken`] handed out by [`OverlayBoard::mount`]; events carrying a
//! token from an instance that was unmounted (or replaced) are discarded.

use std::collections::HashMap;

use serde::Serialize;

use crate::constants::PART_MARKER_RADIUS;
use crate::join::ImageBundle;
use crate::model::{AttributeObservation, ImageId, PartId};
use crate::projection::{Extent, Point, Rect, Scale};

/// Whether an image's extents are known.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum LoadPhase {
    /// Waiting for the image's load-completion signal
    #[default]
    Unloaded,
    /// Extents reported by the host
    Loaded { natural: Extent, rendered: Extent },
}

/// Payload of the host image's load-completion signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadEvent {
    pub natural: Extent,
    pub rendered: Extent,
}

impl LoadEvent {
    /// Create an event from raw pixel dimensions.
    pub fn new(natural_width: f32, natural_height: f32, rendered_width: f32, rendered_height: f32) -> Self {
        Self {
            natural: Extent::new(natural_width, natural_height),
            rendered: Extent::new(rendered_width, rendered_height),
        }
    }
}

/// Overlay state of one displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OverlayState {
    pub bounding_box_shown: bool,
    pub parts_shown: bool,
    pub attributes_shown: bool,
    pub phase: LoadPhase,
}

impl OverlayState {
    /// Fresh state: everything hidden, extents unknown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_bounding_box(&mut self) {
        self.bounding_box_shown = !self.bounding_box_shown;
    }

    pub fn toggle_parts(&mut self) {
        self.parts_shown = !self.parts_shown;
    }

    pub fn toggle_attributes(&mut self) {
        self.attributes_shown = !self.attributes_shown;
    }

    /// Record the extents from a load-completion signal.
    ///
    /// A repeated signal (the host re-fires it after a resize) replaces the
    /// extents; the phase stays `Loaded`.
    pub fn apply_load(&mut self, event: LoadEvent) {
        if matches!(self.phase, LoadPhase::Loaded { .. }) {
            log::debug!("Image reloaded, refreshing extents");
        }
        self.phase = LoadPhase::Loaded {
            natural: event.natural,
            rendered: event.rendered,
        };
    }

    /// Update the rendered extent after a viewport resize.
    ///
    /// Ignored until the image has loaded.
    pub fn resize(&mut self, rendered: Extent) {
        if let LoadPhase::Loaded { natural, .. } = self.phase {
            self.phase = LoadPhase::Loaded { natural, rendered };
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, LoadPhase::Loaded { .. })
    }

    /// Natural extent, zero until loaded.
    pub fn natural_extent(&self) -> Extent {
        match self.phase {
            LoadPhase::Loaded { natural, .. } => natural,
            LoadPhase::Unloaded => Extent::ZERO,
        }
    }

    /// Rendered extent, zero until loaded.
    pub fn rendered_extent(&self) -> Extent {
        match self.phase {
            LoadPhase::Loaded { rendered, .. } => rendered,
            LoadPhase::Unloaded => Extent::ZERO,
        }
    }

    /// Current natural-to-rendered scale, if the extents are known.
    pub fn scale(&self) -> Option<Scale> {
        Scale::between(self.natural_extent(), self.rendered_extent())
    }

    /// Build what should be drawn over `image` right now.
    ///
    /// Geometry is projected afresh on every call. Parts marked not visible in
    /// the dataset are left out; they carry placeholder coordinates.
    pub fn scene<'a>(&self, image: &'a ImageBundle) -> OverlayScene<'a> {
        let scale = self.scale();

        let bounding_box = match (self.bounding_box_shown, scale, &image.bounding_box) {
            (true, Some(scale), Some(bbox)) => Some(scale.rect(Rect::from(bbox))),
            _ => None,
        };

        let part_markers = match (self.parts_shown, scale) {
            (true, Some(scale)) => image
                .parts
                .iter()
                .filter(|part| part.visible)
                .map(|part| PartMarker {
                    part_id: part.part_id.clone(),
                    label: part.part_name.clone(),
                    center: scale.point(Point::new(part.x, part.y)),
                    radius: PART_MARKER_RADIUS,
                })
                .collect(),
            _ => Vec::new(),
        };

        let attributes = if self.attributes_shown {
            image.attributes.iter().collect()
        } else {
            Vec::new()
        };

        OverlayScene {
            bounding_box,
            part_markers,
            attributes,
        }
    }
}

/// A part drawn as a labelled circle in rendered space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartMarker {
    pub part_id: PartId,
    pub label: String,
    pub center: Point,
    pub radius: f32,
}

/// Everything to draw over one image.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OverlayScene<'a> {
    /// Projected bounding box, when shown, loaded and annotated
    pub bounding_box: Option<Rect>,
    /// Projected markers of visible parts, when shown and loaded
    pub part_markers: Vec<PartMarker>,
    /// Attribute judgements, when shown (not geometry, so no load required)
    pub attributes: Vec<&'a AttributeObservation>,
}

impl OverlayScene<'_> {
    /// Check if nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.bounding_box.is_none() && self.part_markers.is_empty() && self.attributes.is_empty()
    }
}

/// Which toggles have anything to show for an image.
///
/// A bounding box toggle without a box is shown as "unavailable"; the parts and
/// attributes toggles are disabled when their lists are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleAvailability {
    pub bounding_box: bool,
    pub parts: bool,
    pub attributes: bool,
}

impl ToggleAvailability {
    pub fn of(image: &ImageBundle) -> Self {
        Self {
            bounding_box: image.has_bounding_box(),
            parts: image.has_parts(),
            attributes: image.has_attributes(),
        }
    }
}

/// Handle of one display instance of an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayToken {
    image_id: ImageId,
    generation: u64,
}

impl DisplayToken {
    /// Image this display instance shows.
    pub fn image_id(&self) -> &ImageId {
        &self.image_id
    }
}

#[derive(Debug)]
struct Mounted {
    generation: u64,
    state: OverlayState,
}

/// Overlay states of every currently displayed image.
///
/// Images never share state; toggling or loading one image leaves the others
/// untouched.
#[derive(Debug, Default)]
pub struct OverlayBoard {
    mounted: HashMap<ImageId, Mounted>,
    next_generation: u64,
}

impl OverlayBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start displaying an image with a fresh state.
    ///
    /// Mounting an image that is already mounted replaces its state and
    /// invalidates the previous token.
    pub fn mount(&mut self, image_id: ImageId) -> DisplayToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.mounted.insert(
            image_id.clone(),
            Mounted {
                generation,
                state: OverlayState::new(),
            },
        );
        DisplayToken {
            image_id,
            generation,
        }
    }

    /// Stop displaying an image. Returns false for a stale token.
    pub fn unmount(&mut self, token: &DisplayToken) -> bool {
        if self.is_current(token) {
            self.mounted.remove(&token.image_id);
            true
        } else {
            false
        }
    }

    /// Remove every image.
    pub fn clear(&mut self) {
        self.mounted.clear();
    }

    /// Whether the token still refers to a mounted display instance.
    pub fn is_current(&self, token: &DisplayToken) -> bool {
        self.mounted
            .get(&token.image_id)
            .is_some_and(|m| m.generation == token.generation)
    }

    /// Apply a load-completion signal.
    ///
    /// Returns false, leaving every state untouched, when the display instance
    /// the token belongs to is gone.
    pub fn apply_load(&mut self, token: &DisplayToken, event: LoadEvent) -> bool {
        match self.current_mut(token) {
            Some(state) => {
                state.apply_load(event);
                true
            }
            None => {
                log::debug!(
                    "Discarding load event for image {} from a stale display",
                    token.image_id
                );
                false
            }
        }
    }

    /// Refresh the rendered extent after a resize. False for a stale token.
    pub fn resize(&mut self, token: &DisplayToken, rendered: Extent) -> bool {
        match self.current_mut(token) {
            Some(state) => {
                state.resize(rendered);
                true
            }
            None => false,
        }
    }

    /// Token of the current display instance of an image.
    pub fn token(&self, image_id: &str) -> Option<DisplayToken> {
        self.mounted.get_key_value(image_id).map(|(image_id, m)| DisplayToken {
            image_id: image_id.clone(),
            generation: m.generation,
        })
    }

    /// State of a mounted image.
    pub fn state(&self, image_id: &str) -> Option<&OverlayState> {
        self.mounted.get(image_id).map(|m| &m.state)
    }

    /// Flip the bounding box toggle. Returns the new value.
    pub fn toggle_bounding_box(&mut self, image_id: &str) -> Option<bool> {
        self.mounted.get_mut(image_id).map(|m| {
            m.state.toggle_bounding_box();
            m.state.bounding_box_shown
        })
    }

    /// Flip the parts toggle. Returns the new value.
    pub fn toggle_parts(&mut self, image_id: &str) -> Option<bool> {
        self.mounted.get_mut(image_id).map(|m| {
            m.state.toggle_parts();
            m.state.parts_shown
        })
    }

    /// Flip the attributes toggle. Returns the new value.
    pub fn toggle_attributes(&mut self, image_id: &str) -> Option<bool> {
        self.mounted.get_mut(image_id).map(|m| {
            m.state.toggle_attributes();
            m.state.attributes_shown
        })
    }

    /// Number of mounted images.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    fn current_mut(&mut self, token: &DisplayToken) -> Option<&mut OverlayState> {
        self.mounted
            .get_mut(&token.image_id)
            .filter(|m| m.generation == token.generation)
            .map(|m| &mut m.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeId, BoundingBox, CertaintyId, ClassId, PartObservation};

    fn bundle() -> ImageBundle {
        let image_id = ImageId::new("1");
        ImageBundle {
            image_id: image_id.clone(),
            class_id: ClassId::new("1"),
            relative_path: "001.Black_footed_Albatross/a.jpg".into(),
            bounding_box: Some(BoundingBox {
                image_id: image_id.clone(),
                x: 60.0,
                y: 27.0,
                width: 325.0,
                height: 304.0,
            }),
            parts: vec![
                PartObservation {
                    image_id: image_id.clone(),
                    part_id: PartId::new("1"),
                    part_name: "back".into(),
                    x: 0.0,
                    y: 0.0,
                    visible: false,
                },
                PartObservation {
                    image_id: image_id.clone(),
                    part_id: PartId::new("2"),
                    part_name: "beak".into(),
                    x: 312.0,
                    y: 182.0,
                    visible: true,
                },
            ],
            attributes: vec![AttributeObservation {
                image_id,
                attribute_id: AttributeId::new("2"),
                attribute_name: "has_bill_shape dagger".into(),
                is_present: true,
                certainty_id: CertaintyId::new("3"),
                time: None,
            }],
        }
    }

    fn half_scale() -> LoadEvent {
        LoadEvent::new(500.0, 300.0, 250.0, 150.0)
    }

    #[test]
    fn test_initial_state() {
        let state = OverlayState::new();
        assert!(!state.bounding_box_shown);
        assert!(!state.parts_shown);
        assert!(!state.attributes_shown);
        assert_eq!(state.natural_extent(), Extent::ZERO);
        assert_eq!(state.rendered_extent(), Extent::ZERO);
        assert!(state.scale().is_none());
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut state = OverlayState::new();
        state.toggle_bounding_box();
        assert!(state.bounding_box_shown);
        state.toggle_bounding_box();
        assert!(!state.bounding_box_shown);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut state = OverlayState::new();
        state.toggle_parts();
        assert!(state.parts_shown);
        assert!(!state.bounding_box_shown);
        assert!(!state.attributes_shown);
    }

    #[test]
    fn test_toggle_before_load_draws_no_geometry() {
        let image = bundle();
        let mut state = OverlayState::new();
        state.toggle_bounding_box();
        state.toggle_parts();
        state.toggle_attributes();

        let scene = state.scene(&image);
        assert!(scene.bounding_box.is_none());
        assert!(scene.part_markers.is_empty());
        assert_eq!(scene.attributes.len(), 1, "attributes need no extents");
    }

    #[test]
    fn test_scene_after_load() {
        let image = bundle();
        let mut state = OverlayState::new();
        state.toggle_bounding_box();
        state.toggle_parts();
        state.apply_load(half_scale());

        let scene = state.scene(&image);
        assert_eq!(scene.bounding_box, Some(Rect::new(30.0, 13.5, 162.5, 152.0)));
        assert_eq!(scene.part_markers.len(), 1, "hidden parts are not drawn");
        assert_eq!(scene.part_markers[0].label, "beak");
        assert_eq!(scene.part_markers[0].center, Point::new(156.0, 91.0));
        assert!(scene.attributes.is_empty());
    }

    #[test]
    fn test_hidden_toggles_draw_nothing() {
        let image = bundle();
        let mut state = OverlayState::new();
        state.apply_load(half_scale());
        assert!(state.scene(&image).is_empty());
    }

    #[test]
    fn test_missing_box_draws_nothing() {
        let mut image = bundle();
        image.bounding_box = None;
        let mut state = OverlayState::new();
        state.toggle_bounding_box();
        state.apply_load(half_scale());

        assert!(state.scene(&image).bounding_box.is_none());
    }

    #[test]
    fn test_resize_reprojects() {
        let image = bundle();
        let mut state = OverlayState::new();
        state.toggle_bounding_box();
        state.apply_load(half_scale());
        state.resize(Extent::new(500.0, 300.0));

        assert_eq!(
            state.scene(&image).bounding_box,
            Some(Rect::new(60.0, 27.0, 325.0, 304.0))
        );
    }

    #[test]
    fn test_resize_before_load_is_ignored() {
        let mut state = OverlayState::new();
        state.resize(Extent::new(500.0, 300.0));
        assert!(!state.is_loaded());
    }

    #[test]
    fn test_toggle_availability() {
        let mut image = bundle();
        assert_eq!(
            ToggleAvailability::of(&image),
            ToggleAvailability {
                bounding_box: true,
                parts: true,
                attributes: true
            }
        );

        image.bounding_box = None;
        image.attributes.clear();
        let available = ToggleAvailability::of(&image);
        assert!(!available.bounding_box);
        assert!(available.parts);
        assert!(!available.attributes);
    }

    #[test]
    fn test_board_applies_load_for_current_token() {
        let mut board = OverlayBoard::new();
        let token = board.mount(ImageId::new("1"));

        assert!(board.apply_load(&token, half_scale()));
        assert!(board.state("1").unwrap().is_loaded());
    }

    #[test]
    fn test_board_discards_load_after_unmount() {
        let mut board = OverlayBoard::new();
        let token = board.mount(ImageId::new("1"));
        assert!(board.unmount(&token));

        assert!(!board.apply_load(&token, half_scale()));
        assert!(board.state("1").is_none());
        assert!(!board.unmount(&token));
    }

    #[test]
    fn test_board_discards_load_from_replaced_display() {
        let mut board = OverlayBoard::new();
        let stale = board.mount(ImageId::new("1"));
        let fresh = board.mount(ImageId::new("1"));

        assert!(!board.apply_load(&stale, half_scale()));
        assert!(!board.state("1").unwrap().is_loaded());
        assert!(board.apply_load(&fresh, half_scale()));
        assert!(board.state("1").unwrap().is_loaded());
    }

    #[test]
    fn test_board_token_lookup() {
        let mut board = OverlayBoard::new();
        assert!(board.token("1").is_none());

        let stale = board.mount(ImageId::new("1"));
        let fresh = board.mount(ImageId::new("1"));
        assert_eq!(board.token("1"), Some(fresh));
        assert_ne!(board.token("1"), Some(stale));
    }

    #[test]
    fn test_board_images_do_not_interfere() {
        let mut board = OverlayBoard::new();
        let first = board.mount(ImageId::new("1"));
        board.mount(ImageId::new("2"));

        assert_eq!(board.toggle_bounding_box("1"), Some(true));
        board.apply_load(&first, half_scale());

        let other = board.state("2").unwrap();
        assert!(!other.bounding_box_shown);
        assert!(!other.is_loaded());
        assert_eq!(board.toggle_parts("3"), None);
    }
}
