//! Flexbox projection of the dock tree.
//!
//! Containers become flex rows or columns, every child grows by its flex
//! weight from a zero basis, and every node carries its minimum size. The
//! resulting rects are the measured sizes that relayout and splitter drags
//! read.

use berth_core::math::Vec2;
use berth_core::profiling::profile_function;
use taffy::TaffyTree;
use taffy::geometry::Size;
use taffy::style::{AvailableSpace, Dimension, Display, FlexDirection, Style};
use tracing::trace;

use crate::operations::{DockError, DockResult};
use crate::splitter::SplitterId;
use crate::tree::DockTree;
use crate::types::{LayoutRect, NodeId, Orientation};

fn layout_error(err: taffy::TaffyError) -> DockError {
    DockError::Layout(err.to_string())
}

impl DockTree {
    /// The viewport of the last layout pass.
    pub fn viewport(&self) -> Option<LayoutRect> {
        self.viewport
    }

    /// Lay the tree out inside `viewport` and relayout every splitter.
    ///
    /// The viewport is remembered; structural operations re-run the pass
    /// automatically afterwards.
    pub fn compute_layout(&mut self, viewport: LayoutRect) -> DockResult<()> {
        profile_function!();
        self.viewport = Some(viewport);

        let mut taffy: TaffyTree<()> = TaffyTree::new();
        let mut mapping = Vec::with_capacity(self.nodes.len());
        let root = self.build_node(&mut taffy, self.root, &mut mapping)?;

        let mut root_style = taffy.style(root).map_err(layout_error)?.clone();
        root_style.size = Size {
            width: Dimension::Length(viewport.width),
            height: Dimension::Length(viewport.height),
        };
        taffy.set_style(root, root_style).map_err(layout_error)?;

        taffy
            .compute_layout(
                root,
                Size {
                    width: AvailableSpace::Definite(viewport.width),
                    height: AvailableSpace::Definite(viewport.height),
                },
            )
            .map_err(layout_error)?;

        // Parents precede children in `mapping`, so offsets accumulate top-down.
        for (id, taffy_node) in mapping {
            let layout = taffy.layout(taffy_node).map_err(layout_error)?;
            let origin = self
                .node(id)
                .and_then(|n| n.parent)
                .and_then(|p| self.node(p))
                .map_or(viewport.position(), |p| p.layout.position());

            if let Some(node) = self.nodes.get_mut(id.0) {
                node.layout = LayoutRect {
                    x: origin.x + layout.location.x,
                    y: origin.y + layout.location.y,
                    width: layout.size.width,
                    height: layout.size.height,
                };
            }
        }

        trace!("layout computed for {}x{}", viewport.width, viewport.height);
        self.relayout(self.root)
    }

    fn build_node(
        &self,
        taffy: &mut TaffyTree<()>,
        id: NodeId,
        mapping: &mut Vec<(NodeId, taffy::NodeId)>,
    ) -> DockResult<taffy::NodeId> {
        let node = self.get(id)?;
        let style = Style {
            display: Display::Flex,
            flex_direction: match node.orientation {
                Some(Orientation::Vertical) => FlexDirection::Column,
                _ => FlexDirection::Row,
            },
            flex_grow: node.flex,
            flex_shrink: 1.0,
            flex_basis: Dimension::Length(0.0),
            min_size: Size {
                width: Dimension::Length(self.min_width(id)?),
                height: Dimension::Length(self.min_height(id)?),
            },
            ..Default::default()
        };

        let taffy_node = taffy.new_leaf(style).map_err(layout_error)?;
        mapping.push((id, taffy_node));

        let mut children = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            children.push(self.build_node(taffy, child, mapping)?);
        }
        taffy
            .set_children(taffy_node, &children)
            .map_err(layout_error)?;

        Ok(taffy_node)
    }

    /// Re-run the projection if a viewport is known, then relayout from `from`.
    pub(crate) fn refresh_layout(&mut self, from: NodeId) -> DockResult<()> {
        match self.viewport {
            Some(viewport) => self.compute_layout(viewport),
            None => self.relayout(from),
        }
    }

    /// The deepest non-root leaf under `point`.
    pub fn leaf_at(&self, point: Vec2) -> Option<NodeId> {
        self.leaves()
            .into_iter()
            .find(|&id| self.node(id).is_some_and(|n| n.layout.contains(point)))
    }

    /// The splitter whose grab area contains `point`.
    ///
    /// The grab area is the bar (`splitter_size` wide) widened by
    /// `splitter_tolerance` on each side.
    pub fn hit_test_splitter(&self, point: Vec2) -> Option<(NodeId, SplitterId)> {
        let half = self.style.splitter_size / 2.0 + self.style.splitter_tolerance;
        self.walk().into_iter().find_map(|id| {
            let node = self.node(id)?;
            let rect = node.layout;
            if !rect.contains(point) {
                return None;
            }
            node.splitters.iter().find_map(|splitter| {
                let axis = splitter.orientation;
                let at = rect.start(axis) + splitter.position;
                let along = axis.axis(point);
                ((along - at).abs() <= half).then_some((id, splitter.id))
            })
        })
    }
}
