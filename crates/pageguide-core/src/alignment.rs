//! Detection of edge and center alignments between a moving box and its siblings.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;

/// Logical position on a box that can line up with another box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentAxis {
    Top,
    /// Vertical center.
    Middle,
    Bottom,
    Left,
    /// Horizontal center.
    Center,
    Right,
}

impl AlignmentAxis {
    /// All axes, horizontal family first.
    pub const ALL: [AlignmentAxis; 6] = [
        AlignmentAxis::Top,
        AlignmentAxis::Middle,
        AlignmentAxis::Bottom,
        AlignmentAxis::Left,
        AlignmentAxis::Center,
        AlignmentAxis::Right,
    ];

    /// Family this axis belongs to.
    pub fn family(self) -> AxisFamily {
        match self {
            AlignmentAxis::Top | AlignmentAxis::Middle | AlignmentAxis::Bottom => {
                AxisFamily::Horizontal
            }
            AlignmentAxis::Left | AlignmentAxis::Center | AlignmentAxis::Right => {
                AxisFamily::Vertical
            }
        }
    }

    /// Stable slot index in `ALL`.
    pub fn index(self) -> usize {
        match self {
            AlignmentAxis::Top => 0,
            AlignmentAxis::Middle => 1,
            AlignmentAxis::Bottom => 2,
            AlignmentAxis::Left => 3,
            AlignmentAxis::Center => 4,
            AlignmentAxis::Right => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlignmentAxis::Top => "top",
            AlignmentAxis::Middle => "middle",
            AlignmentAxis::Bottom => "bottom",
            AlignmentAxis::Left => "left",
            AlignmentAxis::Center => "center",
            AlignmentAxis::Right => "right",
        }
    }
}

/// Group of axes compared against each other.
///
/// Horizontal axes compare y-coordinates and produce horizontal lines;
/// vertical axes compare x-coordinates and produce vertical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisFamily {
    Horizontal,
    Vertical,
}

impl AxisFamily {
    pub fn axes(self) -> [AlignmentAxis; 3] {
        match self {
            AxisFamily::Horizontal => [
                AlignmentAxis::Top,
                AlignmentAxis::Middle,
                AlignmentAxis::Bottom,
            ],
            AxisFamily::Vertical => [
                AlignmentAxis::Left,
                AlignmentAxis::Center,
                AlignmentAxis::Right,
            ],
        }
    }
}

/// Boxes sharing a coordinate on one axis of the moving box.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentGroup {
    /// Axis of the moving box that matched.
    pub axis: AlignmentAxis,
    /// Shared coordinate the members line up on.
    pub coordinate: f64,
    /// The moving box's own coordinate on `axis`.
    pub mover_coordinate: f64,
    /// Moving box first, then every matching candidate.
    pub members: Vec<Bounds>,
}

impl AlignmentGroup {
    /// Correction that would put the moving box exactly on `coordinate`.
    pub fn offset(&self) -> f64 {
        self.coordinate - self.mover_coordinate
    }

    /// Extent of the group perpendicular to the guide line.
    ///
    /// `(min left, max right)` for horizontal guides,
    /// `(min top, max bottom)` for vertical ones.
    pub fn span(&self) -> (f64, f64) {
        let (start, end): (fn(&Bounds) -> f64, fn(&Bounds) -> f64) = match self.axis.family() {
            AxisFamily::Horizontal => (Bounds::left, Bounds::right),
            AxisFamily::Vertical => (Bounds::top, Bounds::bottom),
        };
        let min = self.members.iter().map(start).fold(f64::INFINITY, f64::min);
        let max = self.members.iter().map(end).fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

/// Find every axis of `mover` that lines up with at least one candidate.
///
/// `candidates` must not contain the moving box itself. For each axis the
/// closest candidate coordinate within `threshold` becomes the reference;
/// equally close matches resolve to the first one found. A candidate joins the
/// group when any same-family coordinate lies within `threshold` of the
/// mover's coordinate or of the reference. Groups always hold the mover plus
/// at least one candidate.
pub fn detect_alignments(
    mover: &Bounds,
    candidates: &[Bounds],
    threshold: f64,
) -> Vec<AlignmentGroup> {
    let threshold = threshold.max(0.0);
    let mut groups = Vec::new();
    if candidates.is_empty() {
        return groups;
    }

    for axis in AlignmentAxis::ALL {
        let family = axis.family();
        let mover_coordinate = mover.coordinate(axis);
        let Some(reference) = nearest_reference(mover_coordinate, family, candidates, threshold)
        else {
            continue;
        };

        let mut members = Vec::with_capacity(candidates.len() + 1);
        members.push(*mover);
        members.extend(
            candidates
                .iter()
                .filter(|c| {
                    touches(c, family, mover_coordinate, threshold)
                        || touches(c, family, reference, threshold)
                })
                .copied(),
        );

        if members.len() > 1 {
            groups.push(AlignmentGroup {
                axis,
                coordinate: reference,
                mover_coordinate,
                members,
            });
        }
    }

    groups
}

/// Closest same-family candidate coordinate within `threshold` of `coordinate`.
fn nearest_reference(
    coordinate: f64,
    family: AxisFamily,
    candidates: &[Bounds],
    threshold: f64,
) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for candidate in candidates {
        for axis in family.axes() {
            let value = candidate.coordinate(axis);
            let distance = (coordinate - value).abs();
            if distance > threshold {
                continue;
            }
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, value)),
            }
        }
    }
    best.map(|(_, value)| value)
}

fn touches(bounds: &Bounds, family: AxisFamily, reference: f64, threshold: f64) -> bool {
    family
        .axes()
        .iter()
        .any(|&axis| (bounds.coordinate(axis) - reference).abs() <= threshold)
}

/// Smallest correction per direction that would make the closest alignment exact.
///
/// `x` comes from the vertical family, `y` from the horizontal family; a
/// direction without a group gets `0.0`.
pub fn snap_offset(groups: &[AlignmentGroup]) -> Vec2 {
    let pick = |family: AxisFamily| {
        groups
            .iter()
            .filter(|g| g.axis.family() == family)
            .map(AlignmentGroup::offset)
            .fold(None, |best: Option<f64>, offset| match best {
                Some(b) if b.abs() <= offset.abs() => Some(b),
                _ => Some(offset),
            })
            .unwrap_or(0.0)
    };
    Vec2::new(pick(AxisFamily::Vertical), pick(AxisFamily::Horizontal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(left: f64, top: f64, right: f64, bottom: f64) -> Bounds {
        Bounds::from_rect(kurbo::Rect::new(left, top, right, bottom))
    }

    fn group(groups: &[AlignmentGroup], axis: AlignmentAxis) -> Option<&AlignmentGroup> {
        groups.iter().find(|g| g.axis == axis)
    }

    #[test]
    fn test_top_alignment_within_threshold() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let candidate = boxed(40.0, 102.0, 100.0, 170.0);
        let groups = detect_alignments(&mover, &[candidate], 4.0);

        let top = group(&groups, AlignmentAxis::Top).expect("top guide");
        assert_eq!(top.members.len(), 2);
        assert_eq!(top.coordinate, 102.0);
        assert_eq!(top.span(), (0.0, 100.0));
    }

    #[test]
    fn test_no_alignment_beyond_threshold() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let candidate = boxed(200.0, 105.0, 260.0, 300.0);
        let groups = detect_alignments(&mover, &[candidate], 4.0);
        assert!(group(&groups, AlignmentAxis::Top).is_none());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let candidate = boxed(200.0, 104.0, 260.0, 300.0);
        let groups = detect_alignments(&mover, &[candidate], 4.0);
        assert!(group(&groups, AlignmentAxis::Top).is_some());
    }

    #[test]
    fn test_empty_candidates() {
        let mover = boxed(0.0, 0.0, 10.0, 10.0);
        assert!(detect_alignments(&mover, &[], 4.0).is_empty());
    }

    #[test]
    fn test_cross_axis_match_top_to_bottom() {
        // Mover sits directly below the candidate.
        let mover = boxed(0.0, 50.0, 20.0, 80.0);
        let candidate = boxed(100.0, 0.0, 140.0, 50.0);
        let groups = detect_alignments(&mover, &[candidate], 1.0);

        let top = group(&groups, AlignmentAxis::Top).expect("top meets bottom");
        assert_eq!(top.coordinate, 50.0);
        assert!(group(&groups, AlignmentAxis::Bottom).is_none());
    }

    #[test]
    fn test_closest_match_wins() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        // First candidate is 3px away, second only 1px away.
        let far = boxed(200.0, 103.0, 250.0, 400.0);
        let near = boxed(300.0, 40.0, 350.0, 99.0);
        let groups = detect_alignments(&mover, &[far, near], 4.0);

        let top = group(&groups, AlignmentAxis::Top).unwrap();
        assert_eq!(top.coordinate, 99.0);
        // `far` is 4px from the reference, still inside the threshold.
        assert_eq!(top.members.len(), 3);
    }

    #[test]
    fn test_direct_match_joins_when_closer_reference_wins() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        // 4px above the mover but 7px from the winning reference.
        let above = boxed(300.0, 96.0, 450.0, 200.0);
        let below = boxed(100.0, 103.0, 200.0, 180.0);
        let groups = detect_alignments(&mover, &[above, below], 4.0);

        let top = group(&groups, AlignmentAxis::Top).unwrap();
        assert_eq!(top.coordinate, 103.0);
        assert_eq!(top.members, vec![mover, above, below]);
        assert_eq!(top.span(), (0.0, 450.0));
    }

    #[test]
    fn test_equal_distance_keeps_first_match() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let above = boxed(200.0, 98.0, 250.0, 400.0);
        let below = boxed(300.0, 30.0, 350.0, 102.0);
        let groups = detect_alignments(&mover, &[above, below], 2.0);
        assert_eq!(group(&groups, AlignmentAxis::Top).unwrap().coordinate, 98.0);
    }

    #[test]
    fn test_group_excludes_candidates_far_from_reference() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let exact = boxed(100.0, 100.0, 150.0, 200.0);
        let edge = boxed(200.0, 104.0, 250.0, 200.0);
        let groups = detect_alignments(&mover, &[exact, edge], 4.0);
        let top = group(&groups, AlignmentAxis::Top).unwrap();
        assert_eq!(top.coordinate, 100.0);
        assert_eq!(top.members.len(), 3);

        let groups = detect_alignments(&mover, &[exact, edge], 3.0);
        let top = group(&groups, AlignmentAxis::Top).unwrap();
        assert_eq!(top.members.len(), 2);
    }

    #[test]
    fn test_vertical_family_span() {
        let mover = boxed(100.0, 0.0, 150.0, 40.0);
        let candidate = boxed(100.0, 200.0, 180.0, 260.0);
        let groups = detect_alignments(&mover, &[candidate], 1.0);
        let left = group(&groups, AlignmentAxis::Left).unwrap();
        assert_eq!(left.coordinate, 100.0);
        assert_eq!(left.span(), (0.0, 260.0));
    }

    #[test]
    fn test_centered_boxes_align_on_center() {
        let mover = boxed(40.0, 0.0, 60.0, 10.0);
        let candidate = boxed(0.0, 50.0, 100.0, 80.0);
        let groups = detect_alignments(&mover, &[candidate], 1.0);
        assert!(group(&groups, AlignmentAxis::Center).is_some());
        assert!(group(&groups, AlignmentAxis::Left).is_none());
        assert!(group(&groups, AlignmentAxis::Right).is_none());
    }

    #[test]
    fn test_negative_threshold_acts_as_exact() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let exact = boxed(100.0, 100.0, 150.0, 200.0);
        let groups = detect_alignments(&mover, &[exact], -5.0);
        assert!(group(&groups, AlignmentAxis::Top).is_some());
    }

    #[test]
    fn test_snap_offset_picks_smallest_correction() {
        let mover = boxed(0.0, 100.0, 50.0, 130.0);
        let a = boxed(100.0, 103.0, 150.0, 131.0);
        let groups = detect_alignments(&mover, &[a], 4.0);
        let offset = snap_offset(&groups);
        // Bottom is 1px off, top is 3px off.
        assert_eq!(offset.y, 1.0);
        assert_eq!(offset.x, 0.0);
    }

    #[test]
    fn test_axis_index_matches_all() {
        for (i, axis) in AlignmentAxis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }
}
