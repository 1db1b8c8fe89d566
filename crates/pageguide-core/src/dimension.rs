//! Detection of siblings sharing the resized box's width or height.

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;

/// Dimension compared during resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::Width, Dimension::Height];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        }
    }
}

/// The resized box and every candidate matching one of its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMatchGroup {
    pub dimension: Dimension,
    /// Moving box first, then the matching candidates in candidate order.
    pub members: Vec<Bounds>,
}

/// Find candidates whose width (and, separately, height) matches the mover's.
///
/// At most one group per dimension. All candidates within `threshold` of the
/// mover's size join the same group, even if some of them would match each
/// other more tightly. A group is only produced when another box matches.
pub fn detect_equal_dimensions(
    mover: &Bounds,
    candidates: &[Bounds],
    threshold: f64,
) -> Vec<DimensionMatchGroup> {
    let threshold = threshold.max(0.0);

    Dimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            let size = mover.dimension(dimension);
            let matching: Vec<Bounds> = candidates
                .iter()
                .filter(|c| (c.dimension(dimension) - size).abs() <= threshold)
                .copied()
                .collect();
            if matching.is_empty() {
                return None;
            }
            let mut members = Vec::with_capacity(matching.len() + 1);
            members.push(*mover);
            members.extend(matching);
            Some(DimensionMatchGroup { dimension, members })
        })
        .collect()
}
