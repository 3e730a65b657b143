//! Natural-to-rendered coordinate projection.
//!
//! Annotations are authored in the natural pixel space of the source image.
//! When the image is displayed at a different size, every coordinate is scaled
//! per axis by `rendered / natural`. Nothing is cached: callers re-project
//! whenever either extent changes.

use serde::Serialize;

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    /// Extent of an image whose dimensions are not known yet.
    pub const ZERO: Extent = Extent {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new extent.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are usable as a projection source.
    pub fn is_known(&self) -> bool {
        is_positive(self.width) && is_positive(self.height)
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Per-axis scale factors from natural to rendered space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    /// Identity scale.
    pub fn identity() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    /// Scale between two extents.
    ///
    /// Returns `None` while the natural extent is unknown (zero), in which case
    /// nothing should be rendered.
    pub fn between(natural: Extent, rendered: Extent) -> Option<Self> {
        if !natural.is_known() {
            return None;
        }
        Some(Self {
            x: rendered.width / natural.width,
            y: rendered.height / natural.height,
        })
    }

    /// Scale a point.
    pub fn point(&self, point: Point) -> Point {
        Point {
            x: point.x * self.x,
            y: point.y * self.y,
        }
    }

    /// Scale a rectangle (origin and size).
    pub fn rect(&self, rect: Rect) -> Rect {
        Rect {
            x: rect.x * self.x,
            y: rect.y * self.y,
            width: rect.width * self.x,
            height: rect.height * self.y,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}

/// A point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (same as `x`, named for rendering code).
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (same as `y`, named for rendering code).
    pub fn top(&self) -> f32 {
        self.y
    }
}

/// A rectangle given by two opposite corners, as detectors report boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CornerBox {
    /// Create a new corner box.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Convert to origin and size: `(x1, y1, x2 - x1, y2 - y1)`.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1)
    }
}

impl From<CornerBox> for Rect {
    fn from(corners: CornerBox) -> Self {
        corners.to_rect()
    }
}

impl From<&crate::model::BoundingBox> for Rect {
    fn from(bbox: &crate::model::BoundingBox) -> Self {
        Rect::new(bbox.x, bbox.y, bbox.width, bbox.height)
    }
}

/// Geometry that can be projected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Geometry {
    Point(Point),
    Rect(Rect),
    Corners(CornerBox),
}

impl Geometry {
    /// Apply a scale. Corner boxes come out as origin-and-size rectangles.
    pub fn scaled(&self, scale: Scale) -> Geometry {
        match self {
            Geometry::Point(point) => Geometry::Point(scale.point(*point)),
            Geometry::Rect(rect) => Geometry::Rect(scale.rect(*rect)),
            Geometry::Corners(corners) => Geometry::Rect(scale.rect(corners.to_rect())),
        }
    }
}

/// Project natural-space geometry into rendered space.
///
/// Returns `None` when the natural extent is not known yet.
pub fn project(natural: Extent, rendered: Extent, geometry: Geometry) -> Option<Geometry> {
    Scale::between(natural, rendered).map(|scale| geometry.scaled(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn rect_of(geometry: Option<Geometry>) -> Rect {
        match geometry {
            Some(Geometry::Rect(rect)) => rect,
            other => panic!("Expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_half_scale_box() {
        let natural = Extent::new(500.0, 300.0);
        let rendered = Extent::new(250.0, 150.0);
        let rect = rect_of(project(
            natural,
            rendered,
            Geometry::Rect(Rect::new(60.0, 27.0, 325.0, 304.0)),
        ));

        assert!(approx_eq(rect.left(), 30.0));
        assert!(approx_eq(rect.top(), 13.5));
        assert!(approx_eq(rect.width, 162.5));
        assert!(approx_eq(rect.height, 152.0));
    }

    #[test]
    fn test_identity_projection() {
        let extent = Extent::new(500.0, 375.0);
        let geometries = [
            Geometry::Point(Point::new(312.0, 182.0)),
            Geometry::Rect(Rect::new(60.0, 27.0, 325.0, 304.0)),
            Geometry::Point(Point::new(0.0, 0.0)),
        ];

        for geometry in geometries {
            assert_eq!(project(extent, extent, geometry), Some(geometry));
        }
    }

    #[test]
    fn test_axes_scale_independently() {
        let projected = project(
            Extent::new(400.0, 200.0),
            Extent::new(200.0, 200.0),
            Geometry::Point(Point::new(100.0, 50.0)),
        );
        assert_eq!(projected, Some(Geometry::Point(Point::new(50.0, 50.0))));
    }

    #[test]
    fn test_unknown_natural_extent_projects_nothing() {
        let point = Geometry::Point(Point::new(1.0, 1.0));
        assert_eq!(project(Extent::ZERO, Extent::new(250.0, 150.0), point), None);
        assert_eq!(
            project(Extent::new(500.0, 0.0), Extent::new(250.0, 150.0), point),
            None
        );
        assert!(Scale::between(Extent::new(f32::NAN, 10.0), Extent::ZERO).is_none());
    }

    #[test]
    fn test_corner_box_converted_before_scaling() {
        let rect = rect_of(project(
            Extent::new(640.0, 480.0),
            Extent::new(320.0, 240.0),
            Geometry::Corners(CornerBox::new(100.0, 50.0, 300.0, 250.0)),
        ));

        assert_eq!(rect, Rect::new(50.0, 25.0, 100.0, 100.0));
    }

    #[test]
    fn test_corner_box_to_rect() {
        let rect: Rect = CornerBox::new(10.0, 20.0, 110.0, 70.0).into();
        assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_upscale() {
        let scale = Scale::between(Extent::new(100.0, 100.0), Extent::new(300.0, 150.0)).unwrap();
        assert!(approx_eq(scale.x, 3.0));
        assert!(approx_eq(scale.y, 1.5));
    }
}
