//! Shared value types for the dock tree.

use std::fmt;
use std::str::FromStr;

use berth_core::alloc::sparse_set::IndexSlot;
use berth_core::math::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a node in a [`DockTree`](crate::DockTree).
///
/// Handles are generational: once a node is pruned its handle never resolves
/// again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) IndexSlot);

/// Axis along which a container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Children side by side, left to right.
    Horizontal,
    /// Children stacked, top to bottom.
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// The component of `v` along this axis.
    pub fn axis(self, v: Vec2) -> f32 {
        match self {
            Orientation::Horizontal => v.x,
            Orientation::Vertical => v.y,
        }
    }
}

/// Where a panel lands relative to a target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockSide {
    /// Join the target's tabs.
    #[default]
    Center,
    North,
    South,
    East,
    West,
}

impl DockSide {
    /// The container orientation a drop on this side requires.
    pub fn split_orientation(self) -> Option<Orientation> {
        match self {
            DockSide::Center => None,
            DockSide::North | DockSide::South => Some(Orientation::Vertical),
            DockSide::East | DockSide::West => Some(Orientation::Horizontal),
        }
    }

    /// Whether the new sibling goes before the target (North/West).
    pub fn is_before(self) -> bool {
        matches!(self, DockSide::North | DockSide::West)
    }

    pub fn is_edge(self) -> bool {
        !matches!(self, DockSide::Center)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DockSide::Center => "center",
            DockSide::North => "north",
            DockSide::South => "south",
            DockSide::East => "east",
            DockSide::West => "west",
        }
    }
}

impl fmt::Display for DockSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; anything unrecognised parses as [`DockSide::Center`].
impl FromStr for DockSide {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "east" => DockSide::East,
            "west" => DockSide::West,
            "south" => DockSide::South,
            "north" => DockSide::North,
            _ => DockSide::Center,
        })
    }
}

/// Absolute rectangle in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Start coordinate along `axis`.
    pub fn start(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Length along `axis`.
    pub fn extent(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}
