//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer};
use kurbo::{Affine, Rect};
use peniko::{Color, Fill};
use pageguide_core::guides::GuideLine;
use vello::Scene;

/// Vello-based renderer for guide overlays.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new renderer with an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the built scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn fill_line(&mut self, line: &GuideLine, thickness: f64, color: Color, transform: Affine) {
        let rect: Rect = line.painted_rect(thickness);
        if rect.area() <= 0.0 {
            return;
        }
        self.scene.fill(Fill::NonZero, transform, color, None, &rect);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();

        if ctx.show_alignment {
            let thickness = ctx.guide_thickness();
            let color = ctx.guide_color();
            for line in &ctx.frame.lines {
                self.fill_line(line, thickness, color, ctx.transform);
            }
        }

        if ctx.show_dimensions {
            let thickness = ctx.dimension_thickness();
            let color = ctx.dimension_color();
            for marker in &ctx.frame.markers {
                self.fill_line(marker, thickness, color, ctx.transform);
            }
        }

        log::trace!(
            "Built guide scene: {} lines, {} markers",
            ctx.frame.lines.len(),
            ctx.frame.markers.len()
        );
    }
}
