//! Splitters between sibling nodes and the drag that resizes them.

use berth_core::math::Vec2;
use tracing::debug;

use crate::operations::{DockError, DockResult};
use crate::tree::DockTree;
use crate::types::{NodeId, Orientation};

/// Identity of a splitter, stable while its container keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitterId(pub u64);

/// The draggable boundary between two adjacent children of a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Splitter {
    pub(crate) id: SplitterId,
    pub(crate) orientation: Orientation,
    pub(crate) position: f32,
    pub(crate) parent: NodeId,
}

impl Splitter {
    pub(crate) fn new(id: SplitterId, orientation: Orientation, parent: NodeId) -> Self {
        Self {
            id,
            orientation,
            position: 0.0,
            parent,
        }
    }

    pub fn id(&self) -> SplitterId {
        self.id
    }

    /// Axis the splitter moves along; always its container's orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Orientation of the visible bar. A horizontal container has vertical bars.
    pub fn bar_orientation(&self) -> Orientation {
        self.orientation.perpendicular()
    }

    /// Offset from the container's start along the split axis.
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

/// An in-progress splitter drag.
///
/// Everything the drag needs is captured on press; every move recomputes the
/// two flex weights from that start state, so repeated moves never drift.
///
/// ```
/// # use std::sync::Arc;
/// # use berth_core::math::Vec2;
/// # use berth_dock::*;
/// let mut registry = PanelRegistry::new();
/// registry.register(PanelDescriptor::new("a", "A"));
/// registry.register(PanelDescriptor::new("b", "B"));
/// let mut tree = DockTree::new(Arc::new(registry));
/// tree.compute_layout(LayoutRect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
///
/// let left = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
/// tree.dock("b", left, DockSide::East, None).unwrap();
///
/// let root = tree.root();
/// let splitter = tree.splitter_at(root, 0).unwrap().id();
/// let mut drag = SplitterDrag::begin(&tree, root, splitter, Vec2::new(100.0, 50.0)).unwrap();
/// drag.update(&mut tree, Vec2::new(150.0, 50.0)).unwrap();
/// let position = drag.finish(&mut tree).unwrap();
/// assert_eq!(position, 150.0);
/// ```
#[derive(Debug, Clone)]
pub struct SplitterDrag {
    container: NodeId,
    splitter: SplitterId,
    orientation: Orientation,
    node1: NodeId,
    node2: NodeId,
    press: f32,
    start_position: f32,
    drag_min: f32,
    drag_max: f32,
    min_border: f32,
    total_span: f32,
    total_flex: f32,
    drag_position: f32,
}

impl SplitterDrag {
    /// Capture the splitter's neighbours and the bounds their minimum sizes
    /// allow.
    pub fn begin(tree: &DockTree, container: NodeId, splitter: SplitterId, pointer: Vec2) -> DockResult<Self> {
        let index = tree
            .index_of_splitter(container, splitter)
            .ok_or(DockError::InvalidSplitter)?;
        let parent = tree.get(container)?;
        let orientation = parent.orientation.unwrap_or(Orientation::Horizontal);
        let (Some(&node1), Some(&node2)) = (parent.children.get(index), parent.children.get(index + 1)) else {
            return Err(DockError::InvalidSplitter);
        };
        let position = parent.splitters[index].position;

        let first = tree.get(node1)?;
        let second = tree.get(node2)?;
        let extent1 = first.layout.extent(orientation);
        let extent2 = second.layout.extent(orientation);
        let (min1, min2) = match orientation {
            Orientation::Horizontal => (tree.min_width(node1)?, tree.min_width(node2)?),
            Orientation::Vertical => (tree.min_height(node1)?, tree.min_height(node2)?),
        };

        debug!("splitter {:?} drag started at {}", splitter, position);

        Ok(Self {
            container,
            splitter,
            orientation,
            node1,
            node2,
            press: orientation.axis(pointer),
            start_position: position,
            drag_min: position - extent1 + min1,
            drag_max: position + extent2 - min2,
            min_border: position - extent1,
            total_span: extent1 + extent2,
            total_flex: first.flex + second.flex,
            drag_position: position,
        })
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn splitter(&self) -> SplitterId {
        self.splitter
    }

    /// Axis the drag follows. Pointer motion across it is ignored.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Lowest and highest positions the splitter may reach.
    pub fn bounds(&self) -> (f32, f32) {
        (self.drag_min, self.drag_max)
    }

    /// Last clamped position.
    pub fn position(&self) -> f32 {
        self.drag_position
    }

    /// Follow the pointer, redistributing the captured flex between the two
    /// neighbours. Returns the clamped position.
    pub fn update(&mut self, tree: &mut DockTree, pointer: Vec2) -> DockResult<f32> {
        let delta = self.orientation.axis(pointer) - self.press;
        let position = (self.start_position + delta).max(self.drag_min).min(self.drag_max);
        self.drag_position = position;

        if self.total_span > f32::EPSILON {
            let percent = (position - self.min_border) / self.total_span;
            let flex1 = self.total_flex * percent;
            let flex2 = self.total_flex - flex1;
            tree.get(self.node2)?;
            tree.get_mut(self.node1)?.flex = flex1;
            tree.get_mut(self.node2)?.flex = flex2;
        }

        Ok(position)
    }

    /// Store the last clamped position on the splitter and end the drag.
    pub fn finish(self, tree: &mut DockTree) -> DockResult<f32> {
        let index = tree
            .index_of_splitter(self.container, self.splitter)
            .ok_or(DockError::InvalidSplitter)?;
        let parent = tree.get_mut(self.container)?;
        parent.splitters[index].position = self.drag_position;
        debug!("splitter {:?} drag finished at {}", self.splitter, self.drag_position);

        if let Some(viewport) = tree.viewport {
            tree.compute_layout(viewport)?;
        }
        Ok(self.drag_position)
    }
}
