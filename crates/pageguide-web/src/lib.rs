//! PageGuide web adapter.
//!
//! Measures live DOM elements and draws guides as absolutely positioned divs.

pub mod css;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{CanvasGuideProvider, DomElement, DomSurface};
