//! Geometry of move and corner-resize gestures.

use std::fmt;
use std::str::FromStr;

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridSnapper;

/// Corner handle being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeCorner {
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

impl ResizeCorner {
    pub fn is_north(self) -> bool {
        matches!(self, ResizeCorner::NorthEast | ResizeCorner::NorthWest)
    }

    pub fn is_west(self) -> bool {
        matches!(self, ResizeCorner::NorthWest | ResizeCorner::SouthWest)
    }

    pub fn code(self) -> &'static str {
        match self {
            ResizeCorner::NorthEast => "ne",
            ResizeCorner::NorthWest => "nw",
            ResizeCorner::SouthEast => "se",
            ResizeCorner::SouthWest => "sw",
        }
    }

    /// Position of this corner on `rect`.
    pub fn point(self, rect: Rect) -> Point {
        let x = if self.is_west() { rect.x0 } else { rect.x1 };
        let y = if self.is_north() { rect.y0 } else { rect.y1 };
        Point::new(x, y)
    }

    /// The corner that stays put while this one is dragged.
    pub fn opposite(self) -> Self {
        match self {
            ResizeCorner::NorthEast => ResizeCorner::SouthWest,
            ResizeCorner::NorthWest => ResizeCorner::SouthEast,
            ResizeCorner::SouthEast => ResizeCorner::NorthWest,
            ResizeCorner::SouthWest => ResizeCorner::NorthEast,
        }
    }
}

impl fmt::Display for ResizeCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error parsing a [`ResizeCorner`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid resize corner: {0:?}")]
pub struct ParseResizeCornerError(pub String);

impl FromStr for ResizeCorner {
    type Err = ParseResizeCornerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ne" => Ok(ResizeCorner::NorthEast),
            "nw" => Ok(ResizeCorner::NorthWest),
            "se" => Ok(ResizeCorner::SouthEast),
            "sw" => Ok(ResizeCorner::SouthWest),
            other => Err(ParseResizeCornerError(other.to_string())),
        }
    }
}

/// Resizing an element by one of its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    /// Element box when the gesture started.
    pub original: Rect,
    pub corner: ResizeCorner,
    pub min_size: Size,
    /// Locked height/width ratio (images, video, svg).
    pub aspect: Option<f64>,
}

impl ResizeGesture {
    pub fn new(original: Rect, corner: ResizeCorner) -> Self {
        Self {
            original: original.abs(),
            corner,
            min_size: Size::ZERO,
            aspect: None,
        }
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Lock the ratio to `height / width`.
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = (aspect.is_finite() && aspect > 0.0).then_some(aspect);
        self
    }

    /// Lock the ratio to that of the original box.
    pub fn preserving_aspect(self) -> Self {
        let ratio = self.original.height() / self.original.width();
        self.with_aspect(ratio)
    }

    /// New box after the pointer moved `delta` since the gesture started.
    ///
    /// The dragged corner is grid-snapped relative to the element's original
    /// top-left, the opposite corner stays anchored, and the size never drops
    /// below `min_size`.
    pub fn resize(&self, delta: Vec2, snapper: &GridSnapper, bypass: bool) -> Rect {
        let o = self.original;
        let origin = o.origin();
        let target = self.corner.point(o) + delta;
        let snapped = snapper.position((target - origin).to_point(), bypass).point;
        let target = origin + snapped.to_vec2();

        let (mut left, mut top) = (o.x0, o.y0);
        let potential_height = if self.corner.is_north() {
            top = target.y;
            o.y1 - target.y
        } else {
            target.y - o.y0
        };
        let potential_width = if self.corner.is_west() {
            left = target.x;
            o.x1 - target.x
        } else {
            target.x - o.x0
        };

        let width = potential_width.max(self.min_size.width);
        let height = potential_height.max(self.min_size.height);
        if width != potential_width && self.corner.is_west() {
            left = o.x1 - width;
        }
        if height != potential_height && self.corner.is_north() {
            top = o.y1 - height;
        }
        let free = Rect::new(left, top, left + width, top + height);

        match self.aspect {
            Some(aspect) => self.constrain_aspect(free, aspect),
            None => free,
        }
    }

    /// Project the dragged corner onto the diagonal through the anchor.
    fn constrain_aspect(&self, free: Rect, aspect: f64) -> Rect {
        let anchor = self.corner.opposite().point(self.original);
        let sx = if self.corner.is_west() { -1.0 } else { 1.0 };
        let sy = if self.corner.is_north() { -1.0 } else { 1.0 };
        let diagonal = Vec2::new(sx, sy * aspect);

        let dragged = self.corner.point(free) - anchor;
        let mut width = dragged.dot(diagonal) / diagonal.dot(diagonal);
        let mut height = width * aspect;

        if width < self.min_size.width {
            width = self.min_size.width;
            height = width * aspect;
        }
        if height < self.min_size.height {
            height = self.min_size.height;
            width = height / aspect;
        }

        let far = Point::new(anchor.x + sx * width, anchor.y + sy * height);
        Rect::from_points(anchor, far)
    }
}

/// Moving an element that was grabbed at `grab_offset` from its top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveGesture {
    pub grab_offset: Vec2,
}

impl MoveGesture {
    pub fn new(grab_offset: Vec2) -> Self {
        Self { grab_offset }
    }

    /// Start a move with the pointer at `pointer` over an element at `bounds`.
    pub fn grab(pointer: Point, bounds: Rect) -> Self {
        Self::new(pointer - bounds.origin())
    }

    /// New top-left of the element for the current pointer position.
    pub fn position(&self, pointer: Point, snapper: &GridSnapper, bypass: bool) -> Point {
        snapper.position(pointer - self.grab_offset, bypass).point
    }
}
