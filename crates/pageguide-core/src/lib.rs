//! PageGuide Core Library
//!
//! Platform-agnostic alignment guide geometry for the page editor canvas.
//! Hosts supply element bounds, the engine answers with guide line descriptors.

pub mod alignment;
pub mod config;
pub mod dimension;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod guides;
pub mod session;
pub mod surface;

pub use alignment::{AlignmentAxis, AlignmentGroup, AxisFamily, detect_alignments, snap_offset};
pub use config::{ConfigError, ConfigResult, GuideColor, GuideConfig, DEFAULT_GRID_SIZE, DEFAULT_THRESHOLD};
pub use dimension::{Dimension, DimensionMatchGroup, detect_equal_dimensions};
pub use geometry::{Bounds, LayoutElement, PlacedElement, measure};
pub use gesture::{MoveGesture, ParseResizeCornerError, ResizeCorner, ResizeGesture};
pub use grid::{GridSnapper, SnapResult, snap_to_grid};
pub use guides::{GuideFrame, GuideKind, GuideLine, Orientation, compute_frame};
pub use session::{DragAction, GuideSession, ParseDragActionError};
pub use surface::{GuideSurface, LineStyle, MemorySurface, PrimitiveId, PrimitiveRecord};
