//! Grid snapping for dragged positions.

use kurbo::Point;

use crate::config::GuideConfig;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if !usable_grid(grid_size) {
        return SnapResult::none(point);
    }
    SnapResult {
        point: Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size)),
        snapped_x: true,
        snapped_y: true,
    }
}

fn snap_value(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

fn usable_grid(grid_size: f64) -> bool {
    grid_size.is_finite() && grid_size > 0.0
}

/// Snaps positions of dragged elements to the canvas grid.
///
/// Holding the bypass modifier (Ctrl in the editor) places elements freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnapper {
    pub grid_size: f64,
    pub enabled: bool,
}

impl Default for GridSnapper {
    fn default() -> Self {
        Self::from_config(&GuideConfig::default())
    }
}

impl GridSnapper {
    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_size,
            enabled: usable_grid(grid_size),
        }
    }

    pub fn from_config(config: &GuideConfig) -> Self {
        Self::new(config.grid_size)
    }

    /// A snapper that never moves anything.
    pub fn disabled() -> Self {
        Self {
            grid_size: 0.0,
            enabled: false,
        }
    }

    fn active(&self, bypass: bool) -> bool {
        self.enabled && !bypass && usable_grid(self.grid_size)
    }

    pub fn snapped_x(&self, x: f64, bypass: bool) -> f64 {
        if self.active(bypass) {
            snap_value(x, self.grid_size)
        } else {
            x
        }
    }

    pub fn snapped_y(&self, y: f64, bypass: bool) -> f64 {
        if self.active(bypass) {
            snap_value(y, self.grid_size)
        } else {
            y
        }
    }

    /// Snap a position unless `bypass` is held.
    pub fn position(&self, point: Point, bypass: bool) -> SnapResult {
        if self.active(bypass) {
            snap_to_grid(point, self.grid_size)
        } else {
            SnapResult::none(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.snapped_x);
        assert!(result.snapped_y);
    }

    #[test]
    fn test_snap_to_grid_round_up() {
        let result = snap_to_grid(Point::new(31.0, 51.0), 20.0);
        assert_eq!(result.point, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_invalid_grid_does_not_snap() {
        let p = Point::new(13.0, 7.0);
        assert!(!snap_to_grid(p, 0.0).is_snapped());
        assert!(!snap_to_grid(p, f64::NAN).is_snapped());
        assert!(!GridSnapper::new(-5.0).enabled);
    }

    #[test]
    fn test_bypass_modifier() {
        let snapper = GridSnapper::new(10.0);
        let p = Point::new(13.0, 17.0);
        assert_eq!(snapper.position(p, false).point, Point::new(10.0, 20.0));
        let free = snapper.position(p, true);
        assert_eq!(free.point, p);
        assert!(!free.is_snapped());
    }

    #[test]
    fn test_axis_helpers() {
        let snapper = GridSnapper::new(10.0);
        assert_eq!(snapper.snapped_x(14.9, false), 10.0);
        assert_eq!(snapper.snapped_y(15.0, false), 20.0);
        assert_eq!(snapper.snapped_x(14.9, true), 14.9);
        assert_eq!(GridSnapper::disabled().snapped_y(3.0, false), 3.0);
    }
}
