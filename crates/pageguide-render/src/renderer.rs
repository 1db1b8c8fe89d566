//! Renderer trait abstraction.

use kurbo::Affine;
use peniko::Color;
use pageguide_core::config::GuideConfig;
use pageguide_core::guides::GuideFrame;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Guides to draw.
    pub frame: &'a GuideFrame,
    /// Colors and thicknesses.
    pub config: &'a GuideConfig,
    /// Page-to-surface transform.
    pub transform: Affine,
    /// Page zoom; guide thickness stays constant on screen.
    pub zoom: f64,
    /// Draw alignment lines.
    pub show_alignment: bool,
    /// Draw equal-dimension markers.
    pub show_dimensions: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(frame: &'a GuideFrame, config: &'a GuideConfig) -> Self {
        Self {
            frame,
            config,
            transform: Affine::IDENTITY,
            zoom: 1.0,
            show_alignment: true,
            show_dimensions: true,
        }
    }

    /// Set the page-to-surface transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the page zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
        self
    }

    /// Toggle equal-dimension markers.
    pub fn with_dimensions(mut self, show: bool) -> Self {
        self.show_dimensions = show;
        self
    }

    /// Toggle alignment lines.
    pub fn with_alignment(mut self, show: bool) -> Self {
        self.show_alignment = show;
        self
    }

    /// Alignment line thickness in page units.
    pub fn guide_thickness(&self) -> f64 {
        self.config.guide_thickness / self.zoom
    }

    /// Marker thickness in page units.
    pub fn dimension_thickness(&self) -> f64 {
        self.config.dimension_thickness / self.zoom
    }

    pub fn guide_color(&self) -> Color {
        self.config.guide_color.into()
    }

    pub fn dimension_color(&self) -> Color {
        self.config.dimension_color.into()
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per pointer move and replaces whatever the
    /// previous call drew.
    fn build_scene(&mut self, ctx: &RenderContext);
}
