//! Host surfaces that display guide primitives.

mod memory;

pub use memory::{MemorySurface, PrimitiveId, PrimitiveRecord};

use kurbo::Rect;

use crate::config::{GuideColor, GuideConfig};

/// Presentation of a guide primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: GuideColor,
    /// Line thickness in pixels.
    pub thickness: f64,
    /// Class name hosts may use to tag the primitive.
    pub class: String,
    pub z_index: i32,
}

impl LineStyle {
    /// Style of alignment lines.
    pub fn alignment(config: &GuideConfig) -> Self {
        Self {
            color: config.guide_color,
            thickness: config.guide_thickness,
            class: config.guide_class.clone(),
            z_index: config.z_index,
        }
    }

    /// Style of equal-dimension markers.
    pub fn dimension(config: &GuideConfig) -> Self {
        Self {
            color: config.dimension_color,
            thickness: config.dimension_thickness,
            class: config.dimension_class.clone(),
            z_index: config.z_index,
        }
    }
}

/// Trait for hosts that display guide primitives.
///
/// Primitives are purely visual. They never receive pointer events and the
/// host must not restyle them behind the session's back.
pub trait GuideSurface {
    /// Handle to a primitive living in the host.
    type Primitive;

    /// Create a hidden primitive. `None` if the host cannot make one right now.
    fn create(&mut self, style: &LineStyle) -> Option<Self::Primitive>;

    /// Move a primitive to cover `rect` and show it.
    fn place(&mut self, primitive: &Self::Primitive, rect: Rect);

    /// Hide a primitive without destroying it.
    fn hide(&mut self, primitive: &Self::Primitive);

    /// Destroy a primitive.
    fn remove(&mut self, primitive: Self::Primitive);
}
