//! PageGuide Render Library
//!
//! Renderer abstraction for alignment guides.
//! The default implementation paints guide frames into a Vello scene.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, Renderer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
