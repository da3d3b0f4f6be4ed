//! Drop zone detection for tab dragging.

use berth_core::math::Vec2;

use crate::types::{DockSide, LayoutRect, NodeId};

/// Classify `point` against `rect` as one of the five drop sides.
///
/// The rect is cut along both diagonals, scaled by its aspect ratio, into
/// four triangles for the edge sides. The middle of the rect (inside the
/// inner two thirds on both axes, as seen from each triangle) is `Center`.
/// A rect without area always yields `Center`.
pub fn detect_drop_side(rect: LayoutRect, point: Vec2) -> DockSide {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return DockSide::Center;
    }

    let offset_x = point.x - rect.x;
    let offset_y = point.y - rect.y;
    let grid_x = rect.width / 3.0;
    let grid_y = rect.height / 3.0;
    let k = rect.width / rect.height;

    if offset_x >= offset_y * k {
        if offset_x <= grid_x * 2.0 && offset_y >= grid_y {
            DockSide::Center
        } else if rect.width - offset_x >= offset_y * k {
            DockSide::North
        } else {
            DockSide::East
        }
    } else if offset_x >= grid_x && offset_y <= grid_y * 2.0 {
        DockSide::Center
    } else if rect.width - offset_x >= offset_y * k {
        DockSide::West
    } else {
        DockSide::South
    }
}

/// Drop zone detector for finding where tabs can be dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropZoneDetector;

impl DropZoneDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect which side of `bounds` the cursor is over.
    ///
    /// Returns None if the cursor is outside the bounds or the bounds have no area.
    pub fn detect(&self, cursor: Vec2, bounds: LayoutRect) -> Option<DockSide> {
        if bounds.width <= 0.0 || bounds.height <= 0.0 || !bounds.contains(cursor) {
            return None;
        }
        Some(detect_drop_side(bounds, cursor))
    }

    /// The part of `target` a drop on `side` would occupy.
    pub fn preview_bounds(&self, side: DockSide, target: LayoutRect) -> LayoutRect {
        let half_w = target.width / 2.0;
        let half_h = target.height / 2.0;
        match side {
            DockSide::Center => target,
            DockSide::West => LayoutRect::new(target.x, target.y, half_w, target.height),
            DockSide::East => LayoutRect::new(target.x + half_w, target.y, half_w, target.height),
            DockSide::North => LayoutRect::new(target.x, target.y, target.width, half_h),
            DockSide::South => LayoutRect::new(target.x, target.y + half_h, target.width, half_h),
        }
    }
}

/// A node and the side of it a dragged tab would be dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub node: NodeId,
    pub side: DockSide,
}

impl DropTarget {
    pub fn new(node: NodeId, side: DockSide) -> Self {
        Self { node, side }
    }

    /// Check if this is an edge drop (requires split).
    pub fn is_edge_drop(&self) -> bool {
        self.side.is_edge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> LayoutRect {
        LayoutRect::new(0.0, 0.0, 300.0, 300.0)
    }

    #[test]
    fn test_detect_each_side_of_square() {
        let rect = square();
        assert_eq!(detect_drop_side(rect, Vec2::new(150.0, 150.0)), DockSide::Center);
        assert_eq!(detect_drop_side(rect, Vec2::new(150.0, 10.0)), DockSide::North);
        assert_eq!(detect_drop_side(rect, Vec2::new(290.0, 150.0)), DockSide::East);
        assert_eq!(detect_drop_side(rect, Vec2::new(10.0, 150.0)), DockSide::West);
        assert_eq!(detect_drop_side(rect, Vec2::new(150.0, 290.0)), DockSide::South);
    }

    #[test]
    fn test_detect_respects_offset_and_aspect() {
        let rect = LayoutRect::new(100.0, 50.0, 400.0, 200.0);
        assert_eq!(detect_drop_side(rect, Vec2::new(300.0, 150.0)), DockSide::Center);
        assert_eq!(detect_drop_side(rect, Vec2::new(120.0, 150.0)), DockSide::West);
        assert_eq!(detect_drop_side(rect, Vec2::new(480.0, 150.0)), DockSide::East);
        assert_eq!(detect_drop_side(rect, Vec2::new(300.0, 60.0)), DockSide::North);
        assert_eq!(detect_drop_side(rect, Vec2::new(300.0, 240.0)), DockSide::South);
    }

    #[test]
    fn test_zero_area_is_center() {
        let rect = LayoutRect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(detect_drop_side(rect, Vec2::new(0.0, 50.0)), DockSide::Center);
        assert_eq!(DropZoneDetector::new().detect(Vec2::new(0.0, 50.0), rect), None);
    }

    #[test]
    fn test_detect_outside_bounds() {
        let detector = DropZoneDetector::new();
        assert_eq!(detector.detect(Vec2::new(400.0, 10.0), square()), None);
        assert_eq!(detector.detect(Vec2::new(150.0, 150.0), square()), Some(DockSide::Center));
    }

    #[test]
    fn test_preview_bounds() {
        let detector = DropZoneDetector::new();
        let target = LayoutRect::new(10.0, 20.0, 200.0, 100.0);

        assert_eq!(detector.preview_bounds(DockSide::Center, target), target);
        assert_eq!(
            detector.preview_bounds(DockSide::East, target),
            LayoutRect::new(110.0, 20.0, 100.0, 100.0)
        );
        assert_eq!(
            detector.preview_bounds(DockSide::South, target),
            LayoutRect::new(10.0, 70.0, 200.0, 50.0)
        );
    }
}
