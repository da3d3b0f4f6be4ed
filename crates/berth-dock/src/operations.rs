//! Dock operations for modifying the docking layout.
//!
//! Every operation validates its inputs before the first structural write, so
//! a failed call leaves the tree exactly as it was.

use berth_core::profiling::profile_function;
use tracing::debug;

use crate::content::PanelInstance;
use crate::events::DockEvent;
use crate::tabs::TabHandle;
use crate::tree::{DockPlacement, DockTree};
use crate::types::{DockSide, NodeId, Orientation};

/// Error types for dock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// No panel with this id is registered.
    PanelNotFound(String),
    /// Node not found in tree.
    NodeNotFound(NodeId),
    /// The operation needs a leaf but got a container.
    NotALeaf(NodeId),
    /// Tab index out of bounds.
    InvalidTabIndex,
    /// A tab drag is already in progress.
    DragInProgress,
    /// No tab drag is in progress.
    NoActiveDrag,
    /// Splitter does not belong to the container.
    InvalidSplitter,
    /// The requested change would break the tree shape.
    InvalidStructure(&'static str),
    /// The flexbox projection failed.
    Layout(String),
    /// A manifest or style document could not be parsed.
    Config(String),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::PanelNotFound(id) => write!(f, "Panel '{}' is not registered", id),
            DockError::NodeNotFound(id) => write!(f, "Node {:?} not found", id),
            DockError::NotALeaf(id) => write!(f, "Node {:?} is a container, not a leaf", id),
            DockError::InvalidTabIndex => write!(f, "Tab index out of bounds"),
            DockError::DragInProgress => write!(f, "A tab drag is already in progress"),
            DockError::NoActiveDrag => write!(f, "No tab drag in progress"),
            DockError::InvalidSplitter => write!(f, "Splitter not found in container"),
            DockError::InvalidStructure(reason) => write!(f, "Invalid tree structure: {}", reason),
            DockError::Layout(msg) => write!(f, "Layout failed: {}", msg),
            DockError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;

/// A tab and its panel, lifted out of a leaf so they can be docked elsewhere
/// without recreating the panel content.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedPanel {
    pub tab: TabHandle,
    pub panel: PanelInstance,
}

/// A node discarded by pruning and the node that took its place.
type Replacement = (NodeId, NodeId);

struct TakenTab {
    detached: DetachedPanel,
    /// The leaf has no tabs left.
    vacated: bool,
    /// Index that became active because the removed tab was active.
    reactivated: Option<usize>,
}

impl DockTree {
    /// Dock a panel at `side` of `target`.
    ///
    /// `Center` appends the panel to the target leaf's tabs and activates it.
    /// An edge side inserts a new leaf next to the target, splitting the
    /// target's flex evenly, and docks the panel there. If `reused` is given
    /// its tab and panel instance are moved in instead of creating new ones.
    ///
    /// Fails with [`DockError::PanelNotFound`] for an unregistered panel, with
    /// the tree untouched.
    pub fn dock(
        &mut self,
        panel_id: &str,
        target: NodeId,
        side: DockSide,
        reused: Option<DetachedPanel>,
    ) -> DockResult<DockPlacement> {
        profile_function!();
        self.validate_dock(panel_id, target, side)?;
        let placement = self.dock_unchecked(panel_id, target, side, reused)?;
        self.refresh_layout(self.root)?;
        Ok(placement)
    }

    fn validate_dock(&self, panel_id: &str, target: NodeId, side: DockSide) -> DockResult<()> {
        if self.registry.get_panel_info(panel_id).is_none() {
            return Err(DockError::PanelNotFound(panel_id.to_string()));
        }
        let node = self.get(target)?;
        if side == DockSide::Center && !node.is_root() && node.is_container() {
            return Err(DockError::NotALeaf(target));
        }
        Ok(())
    }

    fn dock_unchecked(
        &mut self,
        panel_id: &str,
        target: NodeId,
        side: DockSide,
        reused: Option<DetachedPanel>,
    ) -> DockResult<DockPlacement> {
        let Some(axis) = side.split_orientation().filter(|_| target != self.root) else {
            return self.dock_center(panel_id, target, reused);
        };

        let parent = self
            .get(target)?
            .parent
            .ok_or(DockError::InvalidStructure("non-root node without a parent"))?;

        let container = {
            let parent_node = self.get(parent)?;
            if parent_node.children.len() > 1 && parent_node.orientation != Some(axis) {
                self.wrap(target, axis)?
            } else {
                let parent_node = self.get_mut(parent)?;
                parent_node.orientation = Some(axis);
                for splitter in &mut parent_node.splitters {
                    splitter.orientation = axis;
                }
                parent
            }
        };

        let index = self
            .index_of_child(container, target)
            .ok_or(DockError::NodeNotFound(target))?;
        let flex = self.get(target)?.flex / 2.0;
        let sibling = self.alloc_node(flex);
        let at = if side.is_before() { index } else { index + 1 };
        self.attach_child(container, sibling, Some(at))?;
        self.get_mut(target)?.flex = flex;

        debug!(
            "split {:?} {} for panel {}, new leaf {:?}",
            target, side, panel_id, sibling
        );

        self.dock_center(panel_id, sibling, reused)
    }

    /// Replace `target` in its parent with a new container holding only
    /// `target`. The wrapper takes over the target's flex.
    fn wrap(&mut self, target: NodeId, axis: Orientation) -> DockResult<NodeId> {
        let parent = self
            .get(target)?
            .parent
            .ok_or(DockError::InvalidStructure("cannot wrap the root"))?;
        let index = self
            .index_of_child(parent, target)
            .ok_or(DockError::NodeNotFound(target))?;
        let flex = self.get(target)?.flex;
        let default_flex = self.style.default_flex;

        let wrapper = self.alloc_node(flex);
        {
            let wrapper_node = self.get_mut(wrapper)?;
            wrapper_node.orientation = Some(axis);
            wrapper_node.children.push(target);
            wrapper_node.parent = Some(parent);
        }
        self.get_mut(parent)?.children[index] = wrapper;
        let target_node = self.get_mut(target)?;
        target_node.parent = Some(wrapper);
        target_node.flex = default_flex;

        debug!("wrapped {:?} in {:?} ({:?})", target, wrapper, axis);
        Ok(wrapper)
    }

    /// Dock a new leaf along one edge of the root, taking half of it.
    ///
    /// Children laid out across `axis` are first moved into a container of
    /// their own, which becomes the root's only child.
    fn dock_root_edge(
        &mut self,
        panel_id: &str,
        side: DockSide,
        axis: Orientation,
        reused: Option<DetachedPanel>,
    ) -> DockResult<DockPlacement> {
        let root = self.root;
        let root_node = self.get(root)?;
        if root_node.children.is_empty() {
            return self.dock_center(panel_id, root, reused);
        }
        if root_node.children.len() > 1 && root_node.orientation != Some(axis) {
            self.wrap_children(root)?;
        }

        let root_node = self.get_mut(root)?;
        root_node.orientation = Some(axis);
        for splitter in &mut root_node.splitters {
            splitter.orientation = axis;
        }
        let children = root_node.children.clone();
        let mut flex = 0.0;
        for child in children {
            flex += self.get(child)?.flex;
        }

        let sibling = self.alloc_node(flex);
        let at = if side.is_before() { Some(0) } else { None };
        self.attach_child(root, sibling, at)?;
        debug!(
            "split root {} for panel {}, new leaf {:?}",
            side, panel_id, sibling
        );

        self.dock_center(panel_id, sibling, reused)
    }

    /// Move every child of `parent` into a new container that becomes
    /// `parent`'s only child.
    fn wrap_children(&mut self, parent: NodeId) -> DockResult<NodeId> {
        let wrapper = self.alloc_node(self.style.default_flex);
        let parent_node = self.get_mut(parent)?;
        let orientation = parent_node.orientation;
        let children = std::mem::take(&mut parent_node.children);
        let mut splitters = std::mem::take(&mut parent_node.splitters);
        for splitter in &mut splitters {
            splitter.parent = wrapper;
        }

        for &child in &children {
            self.get_mut(child)?.parent = Some(wrapper);
        }
        let wrapper_node = self.get_mut(wrapper)?;
        wrapper_node.orientation = orientation;
        wrapper_node.children = children;
        wrapper_node.splitters = splitters;
        wrapper_node.parent = Some(parent);
        self.get_mut(parent)?.children.push(wrapper);

        debug!("wrapped children of {:?} in {:?}", parent, wrapper);
        Ok(wrapper)
    }

    fn dock_center(
        &mut self,
        panel_id: &str,
        target: NodeId,
        reused: Option<DetachedPanel>,
    ) -> DockResult<DockPlacement> {
        if target == self.root {
            let root = self.get(self.root)?;
            // A lone empty leaf is what an emptied layout leaves behind; reuse it.
            if let &[only] = root.children.as_slice()
                && self.get(only)?.is_leaf()
                && self.get(only)?.tabs.is_empty()
            {
                return self.dock_center(panel_id, only, reused);
            }
            if let Some(&last) = root.children.last() {
                let side = match root.orientation {
                    Some(Orientation::Vertical) => DockSide::South,
                    _ => DockSide::East,
                };
                return self.dock_unchecked(panel_id, last, side, reused);
            }
            let leaf = self.new_child(self.root, None)?;
            return self.dock_center(panel_id, leaf, reused);
        }

        let descriptor = self
            .registry
            .get_panel_info(panel_id)
            .cloned()
            .ok_or_else(|| DockError::PanelNotFound(panel_id.to_string()))?;

        let (tab, panel) = match reused {
            Some(detached) => (detached.tab, detached.panel),
            None => {
                let panel = self.new_instance(&descriptor);
                (TabHandle::from_descriptor(&descriptor, panel.id), panel)
            }
        };
        let instance = panel.id;
        let index = self.append_panel(target, tab, panel)?;

        debug!("docked panel {} into {:?} at tab {}", panel_id, target, index);
        Ok(DockPlacement {
            node: target,
            index,
            instance,
        })
    }

    /// Close the tab at `index` of `node`.
    ///
    /// An out-of-range index is a no-op. A leaf left without tabs is pruned
    /// from the tree unless it is the root's only child.
    pub fn undock(&mut self, node: NodeId, index: usize) -> DockResult<Option<DetachedPanel>> {
        profile_function!();
        let leaf = self.get(node)?;
        if leaf.is_container() {
            return Err(DockError::NotALeaf(node));
        }
        if index >= leaf.tabs.len() {
            return Ok(None);
        }

        let taken = self.take_tab(node, index)?;
        let detached = taken.detached;
        self.emit(DockEvent::PanelClosed {
            node,
            panel_id: detached.tab.panel_id.clone(),
            instance: detached.panel.id,
        });
        if let Some(active) = taken.reactivated {
            self.emit_activated(node, active);
        }
        debug!("undocked panel {} from {:?}", detached.tab.panel_id, node);

        let top = if taken.vacated {
            self.prune(node)?.0
        } else {
            node
        };
        self.refresh_layout(top)?;
        Ok(Some(detached))
    }

    /// Move the tab at `index` of `source` to `side` of `target`.
    ///
    /// Dropping a tab onto the center of its own leaf does nothing, as does
    /// splitting a leaf against itself when the tab is its only one. Returns
    /// `None` when nothing moved.
    pub fn move_tab(
        &mut self,
        source: NodeId,
        index: usize,
        target: NodeId,
        side: DockSide,
    ) -> DockResult<Option<DockPlacement>> {
        profile_function!();
        let leaf = self.get(source)?;
        if leaf.is_container() {
            return Err(DockError::NotALeaf(source));
        }
        let tab_count = leaf.tabs.len();
        let panel_id = leaf
            .tabs
            .get(index)
            .map(|tab| tab.panel_id.clone())
            .ok_or(DockError::InvalidTabIndex)?;
        self.validate_dock(&panel_id, target, side)?;

        if target == source && (side == DockSide::Center || tab_count == 1) {
            return Ok(None);
        }

        let taken = self.take_tab(source, index)?;
        if let Some(active) = taken.reactivated {
            self.emit_activated(source, active);
        }
        let detached = taken.detached;
        let requested = target;
        let mut target = target;
        if taken.vacated {
            let (_, replacements) = self.prune(source)?;
            for (discarded, survivor) in replacements {
                if target == discarded {
                    target = survivor;
                }
            }
        }

        debug!(
            "moving panel {} from {:?} to {} of {:?}",
            panel_id, source, side, target
        );
        // The target was spliced into the root: keep the requested axis
        // against the whole root instead of falling back to a center dock.
        let placement = match side.split_orientation() {
            Some(axis) if target == self.root && requested != self.root => {
                self.dock_root_edge(&panel_id, side, axis, Some(detached))?
            }
            _ => self.dock_unchecked(&panel_id, target, side, Some(detached))?,
        };
        self.refresh_layout(self.root)?;
        Ok(Some(placement))
    }

    /// Move the tab at `index` of `source` into the tab bar of `target`,
    /// inserting it before position `at` (clamped) and making it active.
    ///
    /// Within one leaf this reorders the tab. A source leaf left without tabs
    /// is pruned like any other move.
    pub fn move_tab_to(
        &mut self,
        source: NodeId,
        index: usize,
        target: NodeId,
        at: usize,
    ) -> DockResult<DockPlacement> {
        profile_function!();
        let leaf = self.get(source)?;
        if leaf.is_container() {
            return Err(DockError::NotALeaf(source));
        }
        let tab = leaf.tabs.get(index).ok_or(DockError::InvalidTabIndex)?;
        let instance = tab.instance;
        let panel_id = tab.panel_id.clone();
        if target == self.root || self.get(target)?.is_container() {
            return Err(DockError::NotALeaf(target));
        }

        if target == source {
            let to = at.min(leaf.tabs.len() - 1);
            self.reorder_tab(source, index, to)?;
            self.activate_tab(source, to)?;
            return Ok(DockPlacement {
                node: source,
                index: to,
                instance,
            });
        }

        let taken = self.take_tab(source, index)?;
        if let Some(active) = taken.reactivated {
            self.emit_activated(source, active);
        }
        // Pruning only discards containers and the vacated source, so a
        // different leaf target survives it.
        if taken.vacated {
            self.prune(source)?;
        }

        let DetachedPanel { tab, panel } = taken.detached;
        let index = self.insert_panel(target, at, tab, panel)?;
        debug!(
            "moved panel {} from {:?} into {:?} at tab {}",
            panel_id, source, target, index
        );
        self.refresh_layout(self.root)?;
        Ok(DockPlacement {
            node: target,
            index,
            instance,
        })
    }

    /// Lift a tab and its panel out of a leaf, keeping both strips in step.
    fn take_tab(&mut self, node: NodeId, index: usize) -> DockResult<TakenTab> {
        let leaf = self.leaf_mut(node)?;
        let tab = leaf.tabs.remove(index).ok_or(DockError::InvalidTabIndex)?;
        let panel = leaf.panels.remove(index).ok_or(DockError::InvalidTabIndex)?;
        let vacated = leaf.tabs.is_empty();
        let reactivated = if tab.was_active { leaf.tabs.active() } else { None };

        Ok(TakenTab {
            detached: DetachedPanel {
                tab: tab.item,
                panel: panel.item,
            },
            vacated,
            reactivated,
        })
    }

    /// Remove an emptied leaf and collapse the levels it leaves redundant.
    ///
    /// Returns the nearest surviving ancestor and the discarded nodes with
    /// the nodes that now occupy their place.
    fn prune(&mut self, leaf: NodeId) -> DockResult<(NodeId, Vec<Replacement>)> {
        let parent = self
            .get(leaf)?
            .parent
            .ok_or(DockError::InvalidStructure("cannot prune the root"))?;
        let mut replacements = Vec::new();

        let siblings = self.get(parent)?.children.clone();
        if parent == self.root && siblings.len() == 1 {
            return Ok((parent, replacements));
        }

        let index = siblings
            .iter()
            .position(|&c| c == leaf)
            .ok_or(DockError::NodeNotFound(leaf))?;
        let neighbour = siblings
            .get(index + 1)
            .or_else(|| index.checked_sub(1).and_then(|i| siblings.get(i)))
            .copied();

        let flex = self.get(leaf)?.flex;
        if let Some(neighbour) = neighbour {
            self.get_mut(neighbour)?.flex += flex;
            replacements.push((leaf, neighbour));
        }
        self.detach_child(parent, leaf)?;
        self.discard_subtree(leaf);
        debug!("pruned {:?} from {:?}", leaf, parent);

        let parent_node = self.get(parent)?;
        if parent_node.children.is_empty() && parent != self.root {
            let (top, mut more) = self.prune(parent)?;
            replacements.append(&mut more);
            return Ok((top, replacements));
        }
        if parent_node.children.len() != 1 {
            return Ok((parent, replacements));
        }

        let only = parent_node.children[0];
        if self.get(only)?.is_container() {
            self.splice(parent, only)?;
            replacements.push((only, parent));
            Ok((parent, replacements))
        } else if parent != self.root {
            let grandparent = self.promote(parent, only)?;
            replacements.push((parent, only));
            Ok((grandparent, replacements))
        } else {
            Ok((parent, replacements))
        }
    }

    /// Move the children and splitters of `child`, the only child of `parent`,
    /// up into `parent` and discard `child`.
    fn splice(&mut self, parent: NodeId, child: NodeId) -> DockResult<()> {
        let child_node = self.get_mut(child)?;
        let orientation = child_node.orientation;
        let grandchildren = std::mem::take(&mut child_node.children);
        let mut splitters = std::mem::take(&mut child_node.splitters);
        for splitter in &mut splitters {
            splitter.parent = parent;
        }

        for &grandchild in &grandchildren {
            self.get_mut(grandchild)?.parent = Some(parent);
        }
        let parent_node = self.get_mut(parent)?;
        parent_node.children = grandchildren;
        parent_node.splitters = splitters;
        parent_node.orientation = orientation;

        self.nodes.remove(child.0);
        debug!("spliced {:?} into {:?}", child, parent);
        Ok(())
    }

    /// Put `child`, the only child of `parent`, in `parent`'s slot of the
    /// grandparent with `parent`'s flex, and discard `parent`.
    fn promote(&mut self, parent: NodeId, child: NodeId) -> DockResult<NodeId> {
        let parent_node = self.get(parent)?;
        let grandparent = parent_node
            .parent
            .ok_or(DockError::InvalidStructure("cannot promote past the root"))?;
        let flex = parent_node.flex;
        let index = self
            .index_of_child(grandparent, parent)
            .ok_or(DockError::NodeNotFound(parent))?;

        self.get_mut(grandparent)?.children[index] = child;
        let child_node = self.get_mut(child)?;
        child_node.parent = Some(grandparent);
        child_node.flex = flex;

        self.nodes.remove(parent.0);
        debug!("promoted {:?} into {:?}", child, grandparent);
        Ok(grandparent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PanelDescriptor, PanelRegistry};
    use std::sync::Arc;

    fn tree() -> DockTree {
        let mut registry = PanelRegistry::new();
        for id in ["a", "b", "c", "d"] {
            registry.register(PanelDescriptor::new(id, id.to_uppercase()));
        }
        DockTree::new(Arc::new(registry))
    }

    #[test]
    fn test_transfer_tab_error_cases() {
        let mut tree = tree();
        let root = tree.root();
        let leaf = tree.dock("a", root, DockSide::Center, None).unwrap().node;

        assert_eq!(
            tree.move_tab(leaf, 5, root, DockSide::Center),
            Err(DockError::InvalidTabIndex)
        );
        assert_eq!(
            tree.dock("zzz", leaf, DockSide::East, None),
            Err(DockError::PanelNotFound("zzz".to_string()))
        );
    }

    #[test]
    fn test_center_on_container_is_rejected() {
        let mut tree = tree();
        let a = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        tree.dock("c", b, DockSide::South, None).unwrap();
        let wrapper = tree.node(b).unwrap().parent().unwrap();

        let before = tree.snapshot();
        assert_eq!(
            tree.dock("d", wrapper, DockSide::Center, None),
            Err(DockError::NotALeaf(wrapper))
        );
        assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn test_wrap_on_orientation_mismatch() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        let c = tree.dock("c", b, DockSide::North, None).unwrap().node;

        let wrapper = tree.node(b).unwrap().parent().unwrap();
        assert_ne!(wrapper, root);
        let wrapper_node = tree.node(wrapper).unwrap();
        assert_eq!(wrapper_node.orientation(), Some(Orientation::Vertical));
        assert_eq!(wrapper_node.children(), &[c, b]);
        assert_eq!(wrapper_node.flex(), 0.5);
        assert_eq!(tree.node(b).unwrap().flex(), 0.5);
        assert_eq!(tree.node(c).unwrap().flex(), 0.5);
        assert_eq!(tree.index_of_child(root, wrapper), Some(1));
        assert_eq!(tree.splitter_count(wrapper), 1);
    }

    #[test]
    fn test_matching_orientation_reuses_parent() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        let c = tree.dock("c", b, DockSide::West, None).unwrap().node;

        assert_eq!(tree.node(root).unwrap().children(), &[a, c, b]);
        assert_eq!(tree.splitter_count(root), 2);
        assert_eq!(tree.node(c).unwrap().flex(), 0.25);
    }

    #[test]
    fn test_center_on_root_with_children_splits_last() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", root, DockSide::Center, None).unwrap().node;

        assert_ne!(a, b);
        assert_eq!(tree.node(root).unwrap().children(), &[a, b]);
        assert_eq!(tree.splitter_count(root), 1);
    }

    #[test]
    fn test_undock_active_reactivates_left_neighbour() {
        let mut tree = tree();
        let leaf = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        tree.dock("b", leaf, DockSide::Center, None).unwrap();
        tree.dock("c", leaf, DockSide::Center, None).unwrap();
        tree.drain_events();

        tree.undock(leaf, 2).unwrap();
        let node = tree.node(leaf).unwrap();
        assert_eq!(node.tabs().active(), Some(1));
        assert_eq!(node.panels().active(), Some(1));

        let events = tree.drain_events();
        assert!(matches!(&events[0], DockEvent::PanelClosed { panel_id, .. } if panel_id == "c"));
        assert!(matches!(&events[1], DockEvent::PanelActivated { panel_id, .. } if panel_id == "b"));
    }

    #[test]
    fn test_undock_left_of_active_is_quiet() {
        let mut tree = tree();
        let leaf = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        tree.dock("b", leaf, DockSide::Center, None).unwrap();
        tree.dock("c", leaf, DockSide::Center, None).unwrap();
        tree.drain_events();

        tree.undock(leaf, 0).unwrap();
        let node = tree.node(leaf).unwrap();
        assert_eq!(node.tabs().active(), Some(1));
        assert_eq!(node.tabs().active_item().unwrap().panel_id, "c");

        let events = tree.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DockEvent::PanelClosed { .. }));
    }

    #[test]
    fn test_undock_invalid_index_is_noop() {
        let mut tree = tree();
        let leaf = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        let before = tree.snapshot();
        assert_eq!(tree.undock(leaf, 3), Ok(None));
        assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn test_sole_leaf_of_root_stays_empty() {
        let mut tree = tree();
        let root = tree.root();
        let leaf = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        tree.undock(leaf, 0).unwrap();

        assert!(tree.contains(leaf));
        assert_eq!(tree.child_count(root), 1);
        let node = tree.node(leaf).unwrap();
        assert!(!node.tabs().is_visible());
        assert!(!node.panels().is_visible());
    }

    #[test]
    fn test_prune_splices_single_container_child() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        let c = tree.dock("c", b, DockSide::South, None).unwrap().node;

        tree.undock(a, 0).unwrap();
        let root_node = tree.node(root).unwrap();
        assert_eq!(root_node.orientation(), Some(Orientation::Vertical));
        assert_eq!(root_node.children(), &[b, c]);
        assert_eq!(tree.splitter_count(root), 1);
        assert_eq!(tree.splitter_at(root, 0).unwrap().parent(), root);
        assert_eq!(tree.node(b).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_prune_promotes_single_leaf_child() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        let c = tree.dock("c", b, DockSide::South, None).unwrap().node;
        let wrapper = tree.node(b).unwrap().parent().unwrap();

        tree.undock(c, 0).unwrap();
        assert!(!tree.contains(wrapper));
        assert_eq!(tree.node(root).unwrap().children(), &[a, b]);
        assert_eq!(tree.node(b).unwrap().parent(), Some(root));
        assert_eq!(tree.node(b).unwrap().flex(), 0.5);
    }

    #[test]
    fn test_move_tab_to_own_center_is_noop() {
        let mut tree = tree();
        let leaf = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        tree.dock("b", leaf, DockSide::Center, None).unwrap();
        let before = tree.snapshot();

        assert_eq!(tree.move_tab(leaf, 0, leaf, DockSide::Center), Ok(None));
        assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn test_move_only_tab_against_itself_is_noop() {
        let mut tree = tree();
        let leaf = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        assert_eq!(tree.move_tab(leaf, 0, leaf, DockSide::East), Ok(None));
    }

    #[test]
    fn test_move_tab_splits_own_leaf() {
        let mut tree = tree();
        let root = tree.root();
        let leaf = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let instance = tree.dock("b", leaf, DockSide::Center, None).unwrap().instance;

        let placement = tree.move_tab(leaf, 1, leaf, DockSide::South).unwrap().unwrap();
        assert_eq!(placement.instance, instance);
        assert_eq!(tree.node(root).unwrap().orientation(), Some(Orientation::Vertical));
        assert_eq!(tree.node(root).unwrap().children(), &[leaf, placement.node]);
        assert_eq!(tree.node(leaf).unwrap().tabs().len(), 1);
    }

    #[test]
    fn test_move_remaps_promoted_target() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.dock("a", root, DockSide::Center, None).unwrap().node;
        let b = tree.dock("b", a, DockSide::East, None).unwrap().node;
        let c = tree.dock("c", b, DockSide::South, None).unwrap().node;
        let wrapper = tree.node(b).unwrap().parent().unwrap();

        // Vacating c collapses the wrapper; the drop lands on b, which took its slot.
        let placement = tree.move_tab(c, 0, wrapper, DockSide::East).unwrap().unwrap();
        assert!(!tree.contains(wrapper));
        assert_eq!(tree.node(root).unwrap().children(), &[a, b, placement.node]);
    }

    fn two_leaves(tree: &mut DockTree) -> (NodeId, NodeId) {
        let left = tree.dock("a", tree.root(), DockSide::Center, None).unwrap().node;
        tree.dock("b", left, DockSide::Center, None).unwrap();
        let right = tree.dock("c", left, DockSide::East, None).unwrap().node;
        tree.dock("d", right, DockSide::Center, None).unwrap();
        tree.drain_events();
        (left, right)
    }

    #[test]
    fn test_move_tab_to_inserts_at_position() {
        let mut tree = tree();
        let (left, right) = two_leaves(&mut tree);
        let instance = tree.node(left).unwrap().tabs().get(0).unwrap().instance;

        let placement = tree.move_tab_to(left, 0, right, 1).unwrap();
        assert_eq!(placement.node, right);
        assert_eq!(placement.index, 1);
        assert_eq!(placement.instance, instance);

        let node = tree.node(right).unwrap();
        assert_eq!(node.tabs().titles(), vec!["C", "A", "D"]);
        assert_eq!(node.tabs().active(), Some(1));
        assert_eq!(node.panels().active(), Some(1));
        assert_eq!(node.panels().get(1).unwrap().id, instance);

        // "a" sat left of the active "b", so the source shifts quietly.
        let source = tree.node(left).unwrap();
        assert_eq!(source.tabs().active_item().unwrap().panel_id, "b");
        let events = tree.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], DockEvent::PanelActivated { panel_id, .. } if panel_id == "a"));
    }

    #[test]
    fn test_move_tab_to_prunes_vacated_source() {
        let mut tree = tree();
        let root = tree.root();
        let (left, right) = two_leaves(&mut tree);
        tree.undock(left, 1).unwrap();

        let placement = tree.move_tab_to(left, 0, right, 0).unwrap();
        assert!(!tree.contains(left));
        assert_eq!(tree.node(root).unwrap().children(), &[right]);
        assert_eq!(tree.splitter_count(root), 0);
        assert_eq!(placement.index, 0);
        assert_eq!(tree.node(right).unwrap().tabs().titles(), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_move_tab_to_same_leaf_reorders() {
        let mut tree = tree();
        let (left, _) = two_leaves(&mut tree);

        let placement = tree.move_tab_to(left, 0, left, 9).unwrap();
        assert_eq!(placement.index, 1);
        let node = tree.node(left).unwrap();
        assert_eq!(node.tabs().titles(), vec!["B", "A"]);
        assert_eq!(node.tabs().active_item().unwrap().panel_id, "a");
        assert_eq!(node.panels().active_item().unwrap().panel_id, "a");
    }

    #[test]
    fn test_move_tab_to_rejects_containers() {
        let mut tree = tree();
        let root = tree.root();
        let (left, _) = two_leaves(&mut tree);
        let before = tree.snapshot();

        assert_eq!(tree.move_tab_to(left, 0, root, 0), Err(DockError::NotALeaf(root)));
        assert_eq!(tree.move_tab_to(left, 5, left, 0), Err(DockError::InvalidTabIndex));
        assert_eq!(tree.snapshot(), before);
    }
}
