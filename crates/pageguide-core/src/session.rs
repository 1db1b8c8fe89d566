//! Drag session lifecycle: start, update on every pointer move, end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alignment::AlignmentAxis;
use crate::config::GuideConfig;
use crate::geometry::{Bounds, LayoutElement, measure};
use crate::guides::{GuideFrame, GuideKind, compute_frame};
use crate::surface::{GuideSurface, LineStyle};

/// Kind of gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAction {
    #[default]
    Move,
    /// Resizing also shows equal-dimension markers.
    Resize,
}

impl DragAction {
    pub fn name(self) -> &'static str {
        match self {
            DragAction::Move => "move",
            DragAction::Resize => "resize",
        }
    }
}

impl fmt::Display for DragAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`DragAction`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown drag action: {0:?} (expected \"move\" or \"resize\")")]
pub struct ParseDragActionError(pub String);

impl FromStr for DragAction {
    type Err = ParseDragActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "move" => Ok(DragAction::Move),
            "resize" => Ok(DragAction::Resize),
            other => Err(ParseDragActionError(other.to_string())),
        }
    }
}

/// Shows alignment guides while one element is dragged or resized.
///
/// The session owns every primitive it creates on the surface. Candidate and
/// moving elements are only ever measured, never modified.
pub struct GuideSession<E, S: GuideSurface> {
    config: GuideConfig,
    surface: S,
    action: DragAction,
    active: bool,
    candidates: Vec<E>,
    /// One pooled alignment line per axis, indexed by `AlignmentAxis::index`.
    pool: [Option<S::Primitive>; 6],
    /// Equal-dimension markers of the current frame.
    markers: Vec<S::Primitive>,
    frame: GuideFrame,
}

impl<E, S> GuideSession<E, S>
where
    E: LayoutElement + PartialEq,
    S: GuideSurface,
{
    /// Create an idle session drawing on `surface`.
    pub fn new(config: GuideConfig, surface: S) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Guide config is invalid, guides may misbehave: {}", e);
        }
        Self {
            config,
            surface,
            action: DragAction::Move,
            active: false,
            candidates: Vec::new(),
            pool: Default::default(),
            markers: Vec::new(),
            frame: GuideFrame::new(),
        }
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Host-side access to the surface, e.g. to point it at another document.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn action(&self) -> DragAction {
        self.action
    }

    /// Guides shown by the last `during_drag`.
    pub fn frame(&self) -> &GuideFrame {
        &self.frame
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Begin a gesture against `candidates`.
    ///
    /// A session already in progress is ended first.
    pub fn start_drag<I>(&mut self, action: DragAction, candidates: I)
    where
        I: IntoIterator<Item = E>,
    {
        if self.active {
            log::debug!("Superseding active {} session", self.action);
            self.end_drag();
        }

        self.action = action;
        self.candidates = candidates.into_iter().collect();
        self.active = true;

        let style = LineStyle::alignment(&self.config);
        for slot in self.pool.iter_mut() {
            *slot = self.surface.create(&style);
        }
        self.hide_all();

        log::debug!(
            "Started {} session with {} candidates",
            action,
            self.candidates.len()
        );
    }

    /// `start_drag` for an action named by the host (`"move"` or `"resize"`).
    ///
    /// An unknown name starts nothing and ends any session in progress.
    pub fn start_named_drag<I>(
        &mut self,
        action: &str,
        candidates: I,
    ) -> Result<(), ParseDragActionError>
    where
        I: IntoIterator<Item = E>,
    {
        match action.parse() {
            Ok(action) => {
                self.start_drag(action, candidates);
                Ok(())
            }
            Err(e) => {
                self.end_drag();
                Err(e)
            }
        }
    }

    /// Update guides for the moving element's current position.
    ///
    /// Guides of the previous call are always cleared first. Returns an empty
    /// frame when idle, when `moving` is absent or has no measurable box, or
    /// when there is nothing to align against.
    pub fn during_drag(&mut self, moving: Option<&E>) -> &GuideFrame {
        self.hide_all();

        let Some(moving) = moving else {
            return &self.frame;
        };
        if !self.active || self.candidates.is_empty() {
            return &self.frame;
        }
        let Some(mover) = measure(moving) else {
            log::trace!("Moving element has no measurable box");
            return &self.frame;
        };

        let others: Vec<Bounds> = self
            .candidates
            .iter()
            .filter(|c| *c != moving)
            .filter_map(|c| measure(c))
            .collect();

        self.frame = compute_frame(self.action, &mover, &others, self.config.threshold);
        self.show_frame();

        log::trace!(
            "Frame: {} alignment lines, {} markers",
            self.frame.lines.len(),
            self.frame.markers.len()
        );
        &self.frame
    }

    /// Finish the gesture, removing every primitive. Safe to call when idle.
    pub fn end_drag(&mut self) {
        self.hide_all();
        for slot in self.pool.iter_mut() {
            if let Some(primitive) = slot.take() {
                self.surface.remove(primitive);
            }
        }
        self.candidates.clear();
        if self.active {
            log::debug!("Ended {} session", self.action);
        }
        self.active = false;
    }

    /// Tear the session down for good and hand the surface back.
    pub fn dispose(mut self) -> S {
        self.end_drag();
        self.surface
    }

    /// Hide pooled lines and drop the previous frame's markers.
    fn hide_all(&mut self) {
        for primitive in self.pool.iter().flatten() {
            self.surface.hide(primitive);
        }
        for marker in self.markers.drain(..) {
            self.surface.remove(marker);
        }
        self.frame.clear();
    }

    fn show_frame(&mut self) {
        for line in &self.frame.lines {
            let GuideKind::Alignment(axis) = line.kind else {
                continue;
            };
            if let Some(primitive) = &self.pool[axis.index()] {
                self.surface
                    .place(primitive, line.painted_rect(self.config.guide_thickness));
            }
        }

        let style = LineStyle::dimension(&self.config);
        for marker in &self.frame.markers {
            if let Some(primitive) = self.surface.create(&style) {
                self.surface
                    .place(&primitive, marker.painted_rect(self.config.dimension_thickness));
                self.markers.push(primitive);
            }
        }
    }

    /// Pooled primitive for an axis, if the session is active.
    pub fn pooled(&self, axis: AlignmentAxis) -> Option<&S::Primitive> {
        self.pool[axis.index()].as_ref()
    }
}
