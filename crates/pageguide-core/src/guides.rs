//! Layout of detected alignments into renderable guide lines.

use kurbo::{Line, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::alignment::{AlignmentAxis, AlignmentGroup, AxisFamily, detect_alignments};
use crate::dimension::{Dimension, DimensionMatchGroup, detect_equal_dimensions};
use crate::geometry::Bounds;
use crate::session::DragAction;

/// What a guide line marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GuideKind {
    /// Edges or centers lining up.
    Alignment(AlignmentAxis),
    /// A box sharing the resized box's width or height.
    EqualDimension(Dimension),
}

/// Direction a guide line runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Fixed y, spans along x.
    Horizontal,
    /// Fixed x, spans along y.
    Vertical,
}

impl GuideKind {
    pub fn orientation(self) -> Orientation {
        match self {
            GuideKind::Alignment(axis) => match axis.family() {
                AxisFamily::Horizontal => Orientation::Horizontal,
                AxisFamily::Vertical => Orientation::Vertical,
            },
            // Equal widths are shown by a line across the box, and vice versa.
            GuideKind::EqualDimension(Dimension::Width) => Orientation::Horizontal,
            GuideKind::EqualDimension(Dimension::Height) => Orientation::Vertical,
        }
    }
}

/// A guide line descriptor, handed to the host for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub kind: GuideKind,
    /// Fixed coordinate: y for horizontal lines, x for vertical lines.
    pub position: f64,
    /// Start of the span along the line's direction.
    pub start: f64,
    /// End of the span along the line's direction.
    pub end: f64,
}

impl GuideLine {
    pub fn orientation(&self) -> Orientation {
        self.kind.orientation()
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Geometric center line.
    pub fn line(&self) -> Line {
        match self.orientation() {
            Orientation::Horizontal => Line::new(
                Point::new(self.start, self.position),
                Point::new(self.end, self.position),
            ),
            Orientation::Vertical => Line::new(
                Point::new(self.position, self.start),
                Point::new(self.position, self.end),
            ),
        }
    }

    /// Area covered when drawn `thickness` wide, centered on `position`.
    pub fn painted_rect(&self, thickness: f64) -> Rect {
        let half = thickness / 2.0;
        match self.orientation() {
            Orientation::Horizontal => Rect::new(
                self.start,
                self.position - half,
                self.end,
                self.position + half,
            ),
            Orientation::Vertical => Rect::new(
                self.position - half,
                self.start,
                self.position + half,
                self.end,
            ),
        }
    }
}

/// Guides shown for one position of the moving element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideFrame {
    /// Alignment lines, at most one per axis, in axis order.
    pub lines: Vec<GuideLine>,
    /// Equal-dimension markers, one per matching box.
    pub markers: Vec<GuideLine>,
}

impl GuideFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.markers.is_empty()
    }

    /// Total number of visible guides.
    pub fn len(&self) -> usize {
        self.lines.len() + self.markers.len()
    }

    /// The alignment line drawn for an axis, if any.
    pub fn line(&self, axis: AlignmentAxis) -> Option<&GuideLine> {
        self.lines
            .iter()
            .find(|l| l.kind == GuideKind::Alignment(axis))
    }

    /// Markers for one dimension.
    pub fn markers_for(&self, dimension: Dimension) -> impl Iterator<Item = &GuideLine> {
        self.markers
            .iter()
            .filter(move |m| m.kind == GuideKind::EqualDimension(dimension))
    }

    /// Every guide, alignment lines first.
    pub fn iter(&self) -> impl Iterator<Item = &GuideLine> {
        self.lines.iter().chain(self.markers.iter())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.markers.clear();
    }
}

/// Line spanning exactly the outer edges of an alignment group.
pub fn alignment_line(group: &AlignmentGroup) -> GuideLine {
    let (start, end) = group.span();
    GuideLine {
        kind: GuideKind::Alignment(group.axis),
        position: group.coordinate,
        start,
        end,
    }
}

/// One marker per member, each across that member's own box.
pub fn dimension_markers(group: &DimensionMatchGroup) -> Vec<GuideLine> {
    group
        .members
        .iter()
        .map(|bounds| dimension_marker(group.dimension, bounds))
        .collect()
}

fn dimension_marker(dimension: Dimension, bounds: &Bounds) -> GuideLine {
    let kind = GuideKind::EqualDimension(dimension);
    match dimension {
        Dimension::Width => GuideLine {
            kind,
            position: bounds.middle(),
            start: bounds.left(),
            end: bounds.right(),
        },
        Dimension::Height => GuideLine {
            kind,
            position: bounds.center(),
            start: bounds.top(),
            end: bounds.bottom(),
        },
    }
}

/// Lay out detected groups into a frame.
pub fn build_frame(alignments: &[AlignmentGroup], dimensions: &[DimensionMatchGroup]) -> GuideFrame {
    GuideFrame {
        lines: alignments
            .iter()
            .filter(|g| g.members.len() > 1)
            .map(alignment_line)
            .collect(),
        markers: dimensions
            .iter()
            .filter(|g| g.members.len() > 1)
            .flat_map(dimension_markers)
            .collect(),
    }
}

/// Compute the guides for a moving box against its siblings.
///
/// `candidates` must not contain the moving box. Equal-dimension markers are
/// only produced while resizing.
pub fn compute_frame(
    action: DragAction,
    mover: &Bounds,
    candidates: &[Bounds],
    threshold: f64,
) -> GuideFrame {
    let alignments = detect_alignments(mover, candidates, threshold);
    let dimensions = match action {
        DragAction::Resize => detect_equal_dimensions(mover, candidates, threshold),
        DragAction::Move => Vec::new(),
    };
    build_frame(&alignments, &dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(left: f64, top: f64, right: f64, bottom: f64) -> Bounds {
        Bounds::from_rect(Rect::new(left, top, right, bottom))
    }

    #[test]
    fn test_top_guide_spans_both_boxes() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let candidate = boxed(40.0, 102.0, 100.0, 170.0);
        let frame = compute_frame(DragAction::Move, &mover, &[candidate], 4.0);

        let top = frame.line(AlignmentAxis::Top).expect("top guide");
        assert_eq!(top.orientation(), Orientation::Horizontal);
        assert!((top.position - 101.0).abs() <= 1.0);
        assert_eq!(top.start, 0.0);
        assert_eq!(top.end, 100.0);
    }

    #[test]
    fn test_vertical_guide_spans_tops_and_bottoms() {
        let mover = boxed(10.0, 300.0, 60.0, 340.0);
        let candidate = boxed(60.0, 20.0, 90.0, 50.0);
        let frame = compute_frame(DragAction::Move, &mover, &[candidate], 1.0);

        let right = frame.line(AlignmentAxis::Right).expect("right meets left");
        assert_eq!(right.orientation(), Orientation::Vertical);
        assert_eq!(right.position, 60.0);
        assert_eq!((right.start, right.end), (20.0, 340.0));
    }

    #[test]
    fn test_move_never_shows_dimension_markers() {
        let mover = boxed(0.0, 0.0, 50.0, 50.0);
        let same = boxed(300.0, 300.0, 350.0, 350.0);
        let frame = compute_frame(DragAction::Move, &mover, &[same], 4.0);
        assert!(frame.markers.is_empty());
    }

    #[test]
    fn test_width_markers_use_each_box() {
        let mover = Bounds::new(0.0, 0.0, 50.0, 20.0);
        let a = Bounds::new(300.0, 200.0, 50.0, 60.0);
        let b = Bounds::new(500.0, 500.0, 80.0, 90.0);
        let frame = compute_frame(DragAction::Resize, &mover, &[a, b], 4.0);

        let widths: Vec<_> = frame.markers_for(Dimension::Width).collect();
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0].position, 10.0);
        assert_eq!((widths[0].start, widths[0].end), (0.0, 50.0));
        assert_eq!(widths[1].position, 230.0);
        assert_eq!((widths[1].start, widths[1].end), (300.0, 350.0));
        assert!(widths.iter().all(|m| m.length() == 50.0));
        assert_eq!(frame.markers_for(Dimension::Height).count(), 0);
    }

    #[test]
    fn test_height_marker_is_vertical_through_center() {
        let mover = Bounds::new(0.0, 0.0, 20.0, 40.0);
        let a = Bounds::new(100.0, 500.0, 60.0, 40.0);
        let frame = compute_frame(DragAction::Resize, &mover, &[a], 1.0);
        let heights: Vec<_> = frame.markers_for(Dimension::Height).collect();
        assert_eq!(heights.len(), 2);
        assert_eq!(heights[1].orientation(), Orientation::Vertical);
        assert_eq!(heights[1].position, 130.0);
        assert_eq!((heights[1].start, heights[1].end), (500.0, 540.0));
    }

    #[test]
    fn test_painted_rect_is_centered() {
        let line = GuideLine {
            kind: GuideKind::Alignment(AlignmentAxis::Top),
            position: 100.0,
            start: 0.0,
            end: 50.0,
        };
        assert_eq!(line.painted_rect(2.0), Rect::new(0.0, 99.0, 50.0, 101.0));
        assert_eq!(line.line().p0, Point::new(0.0, 100.0));

        let vertical = GuideLine {
            kind: GuideKind::EqualDimension(Dimension::Height),
            position: 10.0,
            start: 5.0,
            end: 15.0,
        };
        assert_eq!(vertical.painted_rect(3.0), Rect::new(8.5, 5.0, 11.5, 15.0));
    }

    #[test]
    fn test_frame_is_deterministic() {
        let mover = boxed(0.0, 0.0, 50.0, 50.0);
        let candidates = [boxed(0.0, 100.0, 50.0, 150.0), boxed(100.0, 0.0, 160.0, 50.0)];
        let first = compute_frame(DragAction::Resize, &mover, &candidates, 4.0);
        let second = compute_frame(DragAction::Resize, &mover, &candidates, 4.0);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_frame_serializes() {
        let mover = boxed(0.0, 0.0, 50.0, 50.0);
        let frame = compute_frame(DragAction::Move, &mover, &[boxed(0.0, 80.0, 10.0, 90.0)], 1.0);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"Left\""));
        let back: GuideFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
