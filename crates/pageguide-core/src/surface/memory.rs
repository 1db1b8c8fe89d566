//! In-memory surface implementation.

use std::collections::BTreeMap;

use kurbo::Rect;

use super::{GuideSurface, LineStyle};

/// Handle to a primitive in a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveId(usize);

/// Everything the surface knows about one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveRecord {
    pub style: LineStyle,
    /// Last rectangle the primitive was placed at.
    pub rect: Option<Rect>,
    pub visible: bool,
    pub removed: bool,
}

/// In-memory surface for testing and headless replay.
///
/// Removed primitives are kept as history until [`MemorySurface::prune`].
#[derive(Debug, Default)]
pub struct MemorySurface {
    records: BTreeMap<PrimitiveId, PrimitiveRecord>,
    next_id: usize,
}

impl MemorySurface {
    /// Create a new empty memory surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained primitives in creation order, including removed ones.
    pub fn records(&self) -> impl Iterator<Item = &PrimitiveRecord> {
        self.records.values()
    }

    pub fn record(&self, id: PrimitiveId) -> Option<&PrimitiveRecord> {
        self.records.get(&id)
    }

    /// Primitives not yet removed.
    pub fn live_count(&self) -> usize {
        self.records.values().filter(|r| !r.removed).count()
    }

    /// Rectangles of primitives currently shown.
    pub fn visible_rects(&self) -> Vec<Rect> {
        self.records
            .values()
            .filter(|r| r.visible && !r.removed)
            .filter_map(|r| r.rect)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.records.values().filter(|r| r.visible && !r.removed).count()
    }

    /// Forget removed primitives. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| !r.removed);
        before - self.records.len()
    }

    fn get_mut(&mut self, id: &PrimitiveId) -> Option<&mut PrimitiveRecord> {
        self.records.get_mut(id).filter(|r| !r.removed)
    }
}

impl GuideSurface for MemorySurface {
    type Primitive = PrimitiveId;

    fn create(&mut self, style: &LineStyle) -> Option<PrimitiveId> {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.records.insert(
            id,
            PrimitiveRecord {
                style: style.clone(),
                rect: None,
                visible: false,
                removed: false,
            },
        );
        Some(id)
    }

    fn place(&mut self, primitive: &PrimitiveId, rect: Rect) {
        if let Some(record) = self.get_mut(primitive) {
            record.rect = Some(rect);
            record.visible = true;
        }
    }

    fn hide(&mut self, primitive: &PrimitiveId) {
        if let Some(record) = self.get_mut(primitive) {
            record.visible = false;
        }
    }

    fn remove(&mut self, primitive: PrimitiveId) {
        if let Some(record) = self.get_mut(&primitive) {
            record.visible = false;
            record.removed = true;
        }
    }
}
