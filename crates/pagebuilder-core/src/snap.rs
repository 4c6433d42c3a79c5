//! Snap functionality for aligning coordinates to the canvas grid.

use kurbo::{Point, Size, Vec2};

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 20.0;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate moved while snapping.
    pub snapped_x: bool,
    /// Whether the Y coordinate moved while snapping.
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

    /// Check if any coordinate was adjusted.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a single coordinate to the nearest multiple of `grid_size`.
///
/// Halfway values round away from zero, so negative inputs snap
/// symmetrically to positive ones. No bounds checking is performed.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap both coordinates of a point to the grid.
pub fn snap_point(point: Point, grid_size: f64) -> SnapResult {
    if grid_size <= 0.0 {
        return SnapResult::none(point);
    }
    let x = snap_to_grid(point.x, grid_size);
    let y = snap_to_grid(point.y, grid_size);

    SnapResult {
        point: Point::new(x, y),
        snapped_x: x != point.x,
        snapped_y: y != point.y,
    }
}

/// Snap a position reached by moving `origin` by the cumulative `delta`.
pub fn snap_offset(origin: Point, delta: Vec2, grid_size: f64) -> Point {
    snap_point(origin + delta, grid_size).point
}

/// Snap a size to the grid, never collapsing below one grid cell.
pub fn snap_size(size: Size, grid_size: f64) -> Size {
    if grid_size <= 0.0 {
        return size;
    }
    Size::new(
        snap_to_grid(size.width, grid_size).max(grid_size),
        snap_to_grid(size.height, grid_size).max(grid_size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(23.0, 20.0), 20.0);
        assert_eq!(snap_to_grid(47.0, 20.0), 40.0);
    }

    #[test]
    fn test_snap_to_grid_exact() {
        assert_eq!(snap_to_grid(40.0, 20.0), 40.0);
        assert_eq!(snap_to_grid(0.0, 20.0), 0.0);
    }

    #[test]
    fn test_snap_to_grid_halfway_rounds_away_from_zero() {
        assert_eq!(snap_to_grid(10.0, 20.0), 20.0);
        assert_eq!(snap_to_grid(-10.0, 20.0), -20.0);
        assert_eq!(snap_to_grid(50.0, 20.0), 60.0);
    }

    #[test]
    fn test_snap_to_grid_negative_is_symmetric() {
        for v in [3.0, 9.9, 10.0, 31.0, 55.5, 119.0] {
            assert_eq!(snap_to_grid(-v, 20.0), -snap_to_grid(v, 20.0));
        }
    }

    #[test]
    fn test_snap_to_grid_properties() {
        for g in [1.0, 4.0, 10.0, 20.0, 32.0] {
            let mut v = -250.0;
            while v <= 250.0 {
                let s = snap_to_grid(v, g);
                assert_eq!(s % g, 0.0, "{v} snapped to {s} with grid {g}");
                assert!((s - v).abs() <= g / 2.0, "{v} snapped too far to {s}");
                v += 0.75;
            }
        }
    }

    #[test]
    fn test_snap_point() {
        let result = snap_point(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.is_snapped());

        let result = snap_point(Point::new(40.0, 60.0), 20.0);
        assert_eq!(result.point, Point::new(40.0, 60.0));
        assert!(!result.is_snapped());
    }

    #[test]
    fn test_snap_point_zero_grid_is_identity() {
        let result = snap_point(Point::new(23.0, 47.0), 0.0);
        assert_eq!(result, SnapResult::none(Point::new(23.0, 47.0)));
    }

    #[test]
    fn test_snap_offset() {
        let p = snap_offset(Point::new(200.0, 0.0), Vec2::new(-143.0, 8.0), 20.0);
        assert_eq!(p, Point::new(60.0, 0.0));
    }

    #[test]
    fn test_snap_size_minimum_cell() {
        assert_eq!(snap_size(Size::new(3.0, 71.0), 20.0), Size::new(20.0, 80.0));
        assert_eq!(snap_size(Size::new(-40.0, 0.0), 20.0), Size::new(20.0, 20.0));
    }
}
