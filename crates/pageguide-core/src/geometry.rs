//! Bounding boxes of canvas elements.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::alignment::AlignmentAxis;
use crate::dimension::Dimension;

/// Axis-aligned box of a rendered element.
///
/// All boxes compared against each other must live in the same coordinate
/// frame. `y` grows downwards, as in the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    rect: Rect,
}

impl Bounds {
    /// Create bounds from a position and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::from_rect(Rect::new(left, top, left + width, top + height))
    }

    /// Create bounds from a rectangle, normalizing flipped corners.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect: rect.abs() }
    }

    /// The underlying rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn top(&self) -> f64 {
        self.rect.y0
    }

    /// Vertical center.
    pub fn middle(&self) -> f64 {
        self.rect.y0 + self.height() / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.rect.y1
    }

    pub fn left(&self) -> f64 {
        self.rect.x0
    }

    /// Horizontal center.
    pub fn center(&self) -> f64 {
        self.rect.x0 + self.width() / 2.0
    }

    pub fn right(&self) -> f64 {
        self.rect.x1
    }

    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Coordinate of this box on an alignment axis.
    pub fn coordinate(&self, axis: AlignmentAxis) -> f64 {
        match axis {
            AlignmentAxis::Top => self.top(),
            AlignmentAxis::Middle => self.middle(),
            AlignmentAxis::Bottom => self.bottom(),
            AlignmentAxis::Left => self.left(),
            AlignmentAxis::Center => self.center(),
            AlignmentAxis::Right => self.right(),
        }
    }

    /// Size of this box along a dimension.
    pub fn dimension(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Width => self.width(),
            Dimension::Height => self.height(),
        }
    }

    /// Shift the box, e.g. from viewport to document coordinates.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self { rect: self.rect + offset }
    }

    /// Whether the box can take part in alignment.
    ///
    /// Detached or hidden elements report an empty box at the origin, which
    /// would otherwise line up with everything sitting at the page corner.
    pub fn is_measurable(&self) -> bool {
        let r = self.rect;
        r.x0.is_finite()
            && r.y0.is_finite()
            && r.x1.is_finite()
            && r.y1.is_finite()
            && r.width() > 0.0
            && r.height() > 0.0
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// An element whose rendered box can be read.
///
/// Implementations must read live layout on every call; the session never
/// caches bounds between frames.
pub trait LayoutElement {
    /// Current bounds, or `None` if the element cannot be measured.
    fn bounds(&self) -> Option<Bounds>;
}

/// Read an element's bounds, discarding boxes that cannot take part in alignment.
pub fn measure<E: LayoutElement + ?Sized>(element: &E) -> Option<Bounds> {
    element.bounds().filter(Bounds::is_measurable)
}

/// An element with an id and a box known up front.
///
/// Equality compares ids only, so a mover keeps its identity while its box
/// changes from frame to frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: u64,
    pub bounds: Bounds,
}

impl PlacedElement {
    pub fn new(id: u64, bounds: Bounds) -> Self {
        Self { id, bounds }
    }
}

impl PartialEq for PlacedElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlacedElement {}

impl LayoutElement for PlacedElement {
    fn bounds(&self) -> Option<Bounds> {
        Some(self.bounds)
    }
}

impl<E: LayoutElement + ?Sized> LayoutElement for &E {
    fn bounds(&self) -> Option<Bounds> {
        (**self).bounds()
    }
}
