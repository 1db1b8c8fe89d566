//! Gesture replay for page guides.
//!
//! A scenario is a recorded drag: the candidate boxes on the page plus the
//! mover's box at every pointer move. Replaying it through a [`GuideSession`]
//! over a [`MemorySurface`] shows exactly which guides the editor would draw.

use std::fs;
use std::path::{Path, PathBuf};

use kurbo::{Point, Rect, Size, Vec2};
use pageguide_core::{
    Bounds, ConfigError, DragAction, GridSnapper, GuideConfig, GuideFrame, GuideSession,
    MemorySurface, MoveGesture, PlacedElement, ResizeCorner, ResizeGesture, detect_alignments,
    measure, snap_offset,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trace tool errors.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

pub type TraceResult<T> = Result<T, TraceError>;

/// A box on the page, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub id: u64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementSpec {
    pub fn placed(&self) -> PlacedElement {
        PlacedElement::new(
            self.id,
            Bounds::new(self.left, self.top, self.width, self.height),
        )
    }
}

/// A recorded gesture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: Option<GuideConfig>,
    #[serde(default)]
    pub action: DragAction,
    /// Boxes passed to `start_drag`, the mover usually among them.
    pub elements: Vec<ElementSpec>,
    /// Mover box at each pointer move.
    #[serde(default)]
    pub frames: Vec<ElementSpec>,
    /// Pointer positions replayed after `frames`, turned into boxes by the
    /// move or resize gesture with grid snapping.
    #[serde(default)]
    pub pointer: Option<PointerTrack>,
    /// Place freely, as if Ctrl were held for the whole track.
    #[serde(default)]
    pub bypass_grid: bool,
}

/// Pointer positions driving one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerTrack {
    /// Element grabbed at `grab` and dragged through `points`.
    Move {
        element: u64,
        grab: Point,
        points: Vec<Point>,
    },
    /// Corner handle dragged through `points`.
    Resize {
        element: u64,
        corner: ResizeCorner,
        #[serde(default)]
        keep_aspect: bool,
        #[serde(default)]
        min_size: Option<Size>,
        points: Vec<Point>,
    },
}

impl PointerTrack {
    pub fn element(&self) -> u64 {
        match self {
            PointerTrack::Move { element, .. } | PointerTrack::Resize { element, .. } => *element,
        }
    }

    /// Mover box after each pointer position. Empty when the element is not
    /// among `elements`.
    pub fn boxes(
        &self,
        elements: &[PlacedElement],
        snapper: &GridSnapper,
        bypass: bool,
    ) -> Vec<PlacedElement> {
        let Some(start) = elements.iter().find(|e| e.id == self.element()) else {
            log::warn!("Pointer track names unknown element {}", self.element());
            return Vec::new();
        };
        let original = start.bounds.rect();
        let placed = |rect: Rect| PlacedElement::new(start.id, Bounds::from_rect(rect));

        match self {
            PointerTrack::Move { grab, points, .. } => {
                let gesture = MoveGesture::grab(*grab, original);
                points
                    .iter()
                    .map(|&p| placed(original.with_origin(gesture.position(p, snapper, bypass))))
                    .collect()
            }
            PointerTrack::Resize {
                corner,
                keep_aspect,
                min_size,
                points,
                ..
            } => {
                let mut gesture = ResizeGesture::new(original, *corner);
                if let Some(min_size) = min_size {
                    gesture = gesture.with_min_size(*min_size);
                }
                if *keep_aspect {
                    gesture = gesture.preserving_aspect();
                }
                let handle = corner.point(original);
                points
                    .iter()
                    .map(|&p| placed(gesture.resize(p - handle, snapper, bypass)))
                    .collect()
            }
        }
    }
}

/// What one pointer move produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub mover: u64,
    /// Mover box used for this frame.
    pub bounds: Bounds,
    pub guides: GuideFrame,
    /// Primitives visible on the surface after the move.
    pub visible: usize,
    /// Correction that would make the nearest alignments exact.
    pub snap: Vec2,
}

/// Result of a whole replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    pub action: DragAction,
    pub frames: Vec<FrameReport>,
    /// Primitives still attached after `end_drag`; zero unless something leaked.
    pub live_after_end: usize,
}

/// Read a scenario file. An embedded config is validated like a config file.
pub fn load_scenario(path: &Path) -> TraceResult<Scenario> {
    let json = read(path)?;
    let scenario: Scenario = serde_json::from_str(&json)?;
    if let Some(config) = &scenario.config {
        config.validate()?;
    }
    Ok(scenario)
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> TraceResult<GuideConfig> {
    let json = read(path)?;
    Ok(GuideConfig::from_json(&json)?)
}

fn read(path: &Path) -> TraceResult<String> {
    fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Replay `scenario`. `config` overrides the scenario's own config.
pub fn run_scenario(scenario: &Scenario, config: Option<GuideConfig>) -> TraceReport {
    let config = config
        .or_else(|| scenario.config.clone())
        .unwrap_or_default();
    let threshold = config.threshold;
    let snapper = GridSnapper::from_config(&config);
    let candidates: Vec<PlacedElement> =
        scenario.elements.iter().map(ElementSpec::placed).collect();

    let mut steps: Vec<PlacedElement> = scenario.frames.iter().map(ElementSpec::placed).collect();
    if let Some(track) = &scenario.pointer {
        steps.extend(track.boxes(&candidates, &snapper, scenario.bypass_grid));
    }

    let mut session = GuideSession::new(config, MemorySurface::new());
    session.start_drag(scenario.action, candidates.iter().copied());

    let mut frames = Vec::with_capacity(steps.len());
    for (index, mover) in steps.iter().enumerate() {
        let guides = session.during_drag(Some(mover)).clone();
        let snap = snap_for(mover, &candidates, threshold);
        frames.push(FrameReport {
            index,
            mover: mover.id,
            bounds: mover.bounds,
            guides,
            visible: session.surface().visible_count(),
            snap,
        });
        // Markers of the previous move are removed by now.
        session.surface_mut().prune();
    }

    session.end_drag();
    let live_after_end = session.surface().live_count();
    log::debug!(
        "Replayed {} frames, {} primitives left",
        frames.len(),
        live_after_end
    );

    TraceReport {
        action: scenario.action,
        frames,
        live_after_end,
    }
}

fn snap_for(mover: &PlacedElement, candidates: &[PlacedElement], threshold: f64) -> Vec2 {
    let Some(bounds) = measure(mover) else {
        return Vec2::ZERO;
    };
    let others: Vec<Bounds> = candidates
        .iter()
        .filter(|c| *c != mover)
        .filter_map(|c| measure(c))
        .collect();
    snap_offset(&detect_alignments(&bounds, &others, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageguide_core::{AlignmentAxis, Dimension};
    use std::io::Write;

    fn spec(id: u64, left: f64, top: f64, width: f64, height: f64) -> ElementSpec {
        ElementSpec {
            id,
            left,
            top,
            width,
            height,
        }
    }

    fn scenario(action: DragAction) -> Scenario {
        Scenario {
            config: None,
            action,
            elements: vec![spec(1, 0.0, 0.0, 50.0, 50.0), spec(2, 100.0, 2.0, 50.0, 20.0)],
            frames: vec![spec(1, 0.0, 0.0, 50.0, 50.0), spec(1, 0.0, 300.0, 50.0, 50.0)],
            pointer: None,
            bypass_grid: false,
        }
    }

    fn tracked(action: DragAction, track: PointerTrack) -> Scenario {
        Scenario {
            frames: Vec::new(),
            pointer: Some(track),
            ..scenario(action)
        }
    }

    #[test]
    fn test_replay_reports_each_frame() {
        let report = run_scenario(&scenario(DragAction::Move), None);
        assert_eq!(report.frames.len(), 2);

        let first = &report.frames[0];
        assert_eq!(first.mover, 1);
        let top = first.guides.line(AlignmentAxis::Top).unwrap();
        assert_eq!(top.position, 2.0);
        assert_eq!(first.visible, first.guides.len());
        assert_eq!(first.snap, Vec2::new(0.0, 2.0));

        let second = &report.frames[1];
        assert!(second.guides.is_empty());
        assert_eq!(second.visible, 0);
        assert_eq!(second.snap, Vec2::ZERO);

        assert_eq!(report.live_after_end, 0);
    }

    #[test]
    fn test_resize_adds_markers() {
        let report = run_scenario(&scenario(DragAction::Resize), None);
        let first = &report.frames[0];
        assert_eq!(first.guides.markers_for(Dimension::Width).count(), 2);
        assert_eq!(report.live_after_end, 0);
    }

    #[test]
    fn test_move_track_snaps_to_grid() {
        let track = PointerTrack::Move {
            element: 1,
            grab: Point::new(10.0, 10.0),
            points: vec![Point::new(13.0, 14.0)],
        };
        let report = run_scenario(&tracked(DragAction::Move, track.clone()), None);
        assert_eq!(report.frames.len(), 1);
        assert_eq!(report.frames[0].bounds, Bounds::new(0.0, 0.0, 50.0, 50.0));
        assert!(report.frames[0].guides.line(AlignmentAxis::Top).is_some());

        let free = Scenario {
            bypass_grid: true,
            ..tracked(DragAction::Move, track)
        };
        let report = run_scenario(&free, None);
        assert_eq!(report.frames[0].bounds, Bounds::new(3.0, 4.0, 50.0, 50.0));
    }

    #[test]
    fn test_resize_track_matches_neighbor_size() {
        let track = PointerTrack::Resize {
            element: 1,
            corner: ResizeCorner::SouthEast,
            keep_aspect: false,
            min_size: None,
            points: vec![Point::new(47.0, 22.0)],
        };
        let report = run_scenario(&tracked(DragAction::Resize, track), None);
        let frame = &report.frames[0];
        assert_eq!(frame.bounds, Bounds::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(frame.guides.markers_for(Dimension::Height).count(), 2);
        assert_eq!(report.live_after_end, 0);
    }

    #[test]
    fn test_track_for_unknown_element_is_empty() {
        let track = PointerTrack::Move {
            element: 9,
            grab: Point::ZERO,
            points: vec![Point::new(1.0, 1.0)],
        };
        let report = run_scenario(&tracked(DragAction::Move, track), None);
        assert!(report.frames.is_empty());
    }

    #[test]
    fn test_parse_pointer_track() {
        let json = r#"{
            "action": "resize",
            "elements": [{"id": 1, "left": 0, "top": 0, "width": 10, "height": 10}],
            "pointer": {"kind": "resize", "element": 1, "corner": "nw",
                        "points": [{"x": 2, "y": 3}]}
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        let Some(PointerTrack::Resize { corner, points, .. }) = scenario.pointer else {
            panic!("expected a resize track");
        };
        assert_eq!(corner, ResizeCorner::NorthWest);
        assert_eq!(points, vec![Point::new(2.0, 3.0)]);
        assert!(scenario.frames.is_empty());
    }

    #[test]
    fn test_config_override() {
        let config = GuideConfig::default().with_threshold(1.0);
        let report = run_scenario(&scenario(DragAction::Move), Some(config));
        assert!(report.frames[0].guides.line(AlignmentAxis::Top).is_none());
    }

    #[test]
    fn test_load_scenario() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "action": "resize",
                "elements": [{{"id": 1, "left": 0, "top": 0, "width": 10, "height": 10}}],
                "frames": []
            }}"#
        )
        .unwrap();

        let scenario = load_scenario(file.path()).unwrap();
        assert_eq!(scenario.action, DragAction::Resize);
        assert_eq!(scenario.elements.len(), 1);
        assert!(scenario.config.is_none());
    }

    #[test]
    fn test_load_scenario_rejects_invalid_embedded_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "config": {{"threshold": -1}},
                "elements": [],
                "frames": []
            }}"#
        )
        .unwrap();

        let result = load_scenario(file.path());
        assert!(matches!(result, Err(TraceError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scenario(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(TraceError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"threshold": -1}}"#).unwrap();
        let result = load_config(file.path());
        assert!(matches!(result, Err(TraceError::Config(_))));
    }
}
