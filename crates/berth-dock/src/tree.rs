//! The dock node tree.
//!
//! Nodes live in a generational arena owned by [`DockTree`]. A node is either a
//! leaf hosting a tab strip and a content surface, or a container holding an
//! ordered list of children separated by splitters. The root always has id
//! `"root"`, is never removed, and never hosts tabs.

use std::sync::Arc;

use berth_core::alloc::sparse_set::SparseSet;
use berth_core::profiling::profile_function;
use tracing::trace;

use crate::content::{ContentSurface, PanelContent, PanelInstance, PanelInstanceId};
use crate::context::DockingStyle;
use crate::events::DockEvent;
use crate::operations::{DockError, DockResult};
use crate::registry::{PanelDescriptor, PanelRegistry};
use crate::splitter::{Splitter, SplitterId};
use crate::tabs::{TabHandle, TabStrip};
use crate::types::{LayoutRect, NodeId, Orientation};

/// Id of the root node.
pub const ROOT_ID: &str = "root";

/// A node of the dock tree.
#[derive(Debug, Clone)]
pub struct DockNode {
    pub(crate) id: String,
    pub(crate) orientation: Option<Orientation>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) splitters: Vec<Splitter>,
    pub(crate) tabs: TabStrip,
    pub(crate) panels: ContentSurface,
    pub(crate) flex: f32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) layout: LayoutRect,
}

impl DockNode {
    fn new(id: String, flex: f32) -> Self {
        Self {
            id,
            orientation: None,
            children: Vec::new(),
            splitters: Vec::new(),
            tabs: TabStrip::new(),
            panels: ContentSurface::new(),
            flex,
            parent: None,
            layout: LayoutRect::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Split axis. Only meaningful for containers.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn splitters(&self) -> &[Splitter] {
        &self.splitters
    }

    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    pub fn panels(&self) -> &ContentSurface {
        &self.panels
    }

    /// Share of the parent's extent relative to siblings.
    pub fn flex(&self) -> f32 {
        self.flex
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Absolute rect from the last layout pass.
    pub fn layout(&self) -> LayoutRect {
        self.layout
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }
}

/// Plain recursive copy of a subtree, for comparisons and debug dumps.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    pub id: String,
    pub orientation: Option<Orientation>,
    pub flex: f32,
    pub splitters: usize,
    /// Panel ids of the tabs, in order.
    pub tabs: Vec<String>,
    pub active_tab: Option<usize>,
    pub active_panel: Option<usize>,
    pub children: Vec<NodeSnapshot>,
}

/// Where a docked panel ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockPlacement {
    pub node: NodeId,
    pub index: usize,
    pub instance: PanelInstanceId,
}

/// The dock tree and everything needed to mutate it.
pub struct DockTree {
    pub(crate) nodes: SparseSet<DockNode>,
    pub(crate) root: NodeId,
    pub(crate) registry: Arc<PanelRegistry>,
    pub(crate) style: DockingStyle,
    pub(crate) viewport: Option<LayoutRect>,
    events: Vec<DockEvent>,
    next_splitter: u64,
    next_instance: u64,
}

impl DockTree {
    pub fn new(registry: Arc<PanelRegistry>) -> Self {
        Self::with_style(registry, DockingStyle::default())
    }

    pub fn with_style(registry: Arc<PanelRegistry>, style: DockingStyle) -> Self {
        let mut nodes = SparseSet::new();
        let root = NodeId(nodes.push(DockNode::new(ROOT_ID.to_string(), style.default_flex)));
        Self {
            nodes,
            root,
            registry,
            style,
            viewport: None,
            events: Vec::new(),
            next_splitter: 0,
            next_instance: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn registry(&self) -> &Arc<PanelRegistry> {
        &self.registry
    }

    pub fn style(&self) -> &DockingStyle {
        &self.style
    }

    pub fn node(&self, id: NodeId) -> Option<&DockNode> {
        self.nodes.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> DockResult<&DockNode> {
        self.node(id).ok_or(DockError::NodeNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> DockResult<&mut DockNode> {
        self.nodes.get_mut(id.0).ok_or(DockError::NodeNotFound(id))
    }

    /// Look a node up by its string id.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.id == id)
            .map(|(slot, _)| NodeId(slot))
    }

    /// All nodes reachable from the root, parents before children.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Leaves in left-to-right, top-to-bottom order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|&id| id != self.root && self.node(id).is_some_and(DockNode::is_leaf))
            .collect()
    }

    // ------------------------------------------------------------------
    // Structural access
    // ------------------------------------------------------------------

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.children.len())
    }

    pub fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.node(node).and_then(|n| n.children.get(index).copied())
    }

    pub fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.node(parent)
            .and_then(|n| n.children.iter().position(|&c| c == child))
    }

    /// Create an empty leaf and insert it at `index` (appended if `None`).
    pub fn new_child(&mut self, parent: NodeId, index: Option<usize>) -> DockResult<NodeId> {
        self.ensure_can_hold_children(parent)?;
        let child = self.alloc_node(self.style.default_flex);
        self.attach_child(parent, child, index)?;
        Ok(child)
    }

    /// Insert `child` under `parent`, moving it out of its current parent.
    ///
    /// Low-level: keeps splitter counts consistent but does not prune the old
    /// parent.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> DockResult<()> {
        self.ensure_can_hold_children(parent)?;
        let old_parent = self.get(child)?.parent;
        if child == self.root {
            return Err(DockError::InvalidStructure("the root cannot be reparented"));
        }
        if self.is_ancestor(child, parent) {
            return Err(DockError::InvalidStructure("cannot insert a node into its own subtree"));
        }

        if let Some(old_parent) = old_parent {
            self.detach_child(old_parent, child)?;
        }
        self.attach_child(parent, child, index)
    }

    /// Remove `child` from `parent` and drop its whole subtree.
    ///
    /// Low-level: does not prune or collapse `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DockResult<()> {
        self.detach_child(parent, child)?;
        self.discard_subtree(child);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Splitter bookkeeping
    // ------------------------------------------------------------------

    /// Mint a splitter for `container`, oriented along its split axis.
    pub fn new_splitter(&mut self, container: NodeId) -> DockResult<Splitter> {
        let orientation = self
            .get(container)?
            .orientation
            .unwrap_or(Orientation::Horizontal);
        let id = SplitterId(self.next_splitter);
        self.next_splitter += 1;
        Ok(Splitter::new(id, orientation, container))
    }

    pub fn splitter_count(&self, container: NodeId) -> usize {
        self.node(container).map_or(0, |n| n.splitters.len())
    }

    pub fn splitter_at(&self, container: NodeId, index: usize) -> Option<&Splitter> {
        self.node(container).and_then(|n| n.splitters.get(index))
    }

    pub fn index_of_splitter(&self, container: NodeId, splitter: SplitterId) -> Option<usize> {
        self.node(container)
            .and_then(|n| n.splitters.iter().position(|s| s.id == splitter))
    }

    // ------------------------------------------------------------------
    // Derived sizes
    // ------------------------------------------------------------------

    pub fn min_width(&self, node: NodeId) -> DockResult<f32> {
        self.min_extent(node, Orientation::Horizontal)
    }

    pub fn min_height(&self, node: NodeId) -> DockResult<f32> {
        self.min_extent(node, Orientation::Vertical)
    }

    fn min_extent(&self, node: NodeId, axis: Orientation) -> DockResult<f32> {
        let n = self.get(node)?;

        if n.is_container() {
            let mut min = 0.0f32;
            for &child in &n.children {
                min = min.max(self.min_extent(child, axis)?);
            }
            return Ok(min);
        }

        if n.tabs.is_empty() {
            return Ok(self.style.empty_min_size);
        }

        let panel_min = n
            .tabs
            .iter()
            .filter_map(|tab| self.registry.get_panel_info(&tab.panel_id))
            .filter_map(|descriptor| match axis {
                Orientation::Horizontal => descriptor.min_width,
                Orientation::Vertical => descriptor.min_height,
            })
            .fold(0.0f32, f32::max);

        Ok(match axis {
            Orientation::Horizontal => panel_min,
            Orientation::Vertical => panel_min + self.style.tab_bar_height,
        })
    }

    // ------------------------------------------------------------------
    // Relayout
    // ------------------------------------------------------------------

    /// Recompute splitter positions in the subtree of `node` from the measured
    /// child sizes.
    ///
    /// Each splitter sits at the running sum of the preceding children's
    /// extents, relative to the container's start. Flex weights and tree shape
    /// are left untouched.
    pub fn relayout(&mut self, node: NodeId) -> DockResult<()> {
        profile_function!();
        self.get(node)?;

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(current) = self.node(id) else { continue };
            if current.is_leaf() {
                continue;
            }
            let orientation = current.orientation.unwrap_or(Orientation::Horizontal);
            let children = current.children.clone();
            let extents: Vec<f32> = children
                .iter()
                .map(|&c| self.node(c).map_or(0.0, |c| c.layout.extent(orientation)))
                .collect();

            if let Some(current) = self.nodes.get_mut(id.0) {
                let mut position = 0.0;
                for (splitter, extent) in current.splitters.iter_mut().zip(extents) {
                    position += extent;
                    splitter.position = position;
                    splitter.orientation = orientation;
                }
                trace!("relayout {}: {} splitters", current.id, current.splitters.len());
            }
            stack.extend(children);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tabs and panels
    // ------------------------------------------------------------------

    /// Make the tab at `index` active in both the tab strip and the content
    /// surface.
    pub fn activate_tab(&mut self, node: NodeId, index: usize) -> DockResult<()> {
        let leaf = self.leaf_mut(node)?;
        if index >= leaf.tabs.len() {
            return Err(DockError::InvalidTabIndex);
        }
        if leaf.tabs.active() == Some(index) {
            return Ok(());
        }

        leaf.tabs.activate(index);
        leaf.panels.activate(index);
        self.emit_activated(node, index);
        Ok(())
    }

    /// Move a tab within its strip. The active panel stays active.
    pub fn reorder_tab(&mut self, node: NodeId, from: usize, to: usize) -> DockResult<()> {
        let leaf = self.leaf_mut(node)?;
        if from >= leaf.tabs.len() || to >= leaf.tabs.len() {
            return Err(DockError::InvalidTabIndex);
        }
        leaf.tabs.reorder(from, to);
        leaf.panels.reorder(from, to);
        Ok(())
    }

    /// Locate a panel instance.
    pub fn find_panel(&self, instance: PanelInstanceId) -> Option<(NodeId, usize)> {
        self.nodes.iter().find_map(|(slot, node)| {
            node.panels
                .iter()
                .position(|panel| panel.id == instance)
                .map(|index| (NodeId(slot), index))
        })
    }

    pub fn panel_instance(&self, instance: PanelInstanceId) -> Option<&PanelInstance> {
        self.nodes
            .iter()
            .find_map(|(_, node)| node.panels.instance(instance))
    }

    /// Replace what a panel displays. Returns false if the instance is gone.
    pub fn set_panel_content(&mut self, instance: PanelInstanceId, content: PanelContent) -> bool {
        let Some((node, _)) = self.find_panel(instance) else {
            return false;
        };
        self.nodes
            .get_mut(node.0)
            .and_then(|n| n.panels.instance_mut(instance))
            .map(|panel| panel.content = content)
            .is_some()
    }

    pub fn drain_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }

    /// Copy of the whole tree.
    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(self.root)
    }

    fn snapshot_of(&self, id: NodeId) -> NodeSnapshot {
        let Some(node) = self.node(id) else {
            return NodeSnapshot {
                id: String::new(),
                orientation: None,
                flex: 0.0,
                splitters: 0,
                tabs: Vec::new(),
                active_tab: None,
                active_panel: None,
                children: Vec::new(),
            };
        };
        NodeSnapshot {
            id: node.id.clone(),
            orientation: node.orientation,
            flex: node.flex,
            splitters: node.splitters.len(),
            tabs: node.tabs.iter().map(|t| t.panel_id.clone()).collect(),
            active_tab: node.tabs.active(),
            active_panel: node.panels.active(),
            children: node.children.iter().map(|&c| self.snapshot_of(c)).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Crate internals
    // ------------------------------------------------------------------

    pub(crate) fn alloc_node(&mut self, flex: f32) -> NodeId {
        let id = uuid::Uuid::new_v4().to_string();
        NodeId(self.nodes.push(DockNode::new(id, flex)))
    }

    pub(crate) fn leaf_mut(&mut self, node: NodeId) -> DockResult<&mut DockNode> {
        let n = self.get_mut(node)?;
        if n.is_container() {
            return Err(DockError::NotALeaf(node));
        }
        Ok(n)
    }

    fn ensure_can_hold_children(&self, parent: NodeId) -> DockResult<()> {
        if !self.get(parent)?.tabs.is_empty() {
            return Err(DockError::InvalidStructure("a node hosting tabs cannot take children"));
        }
        Ok(())
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub(crate) fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Insert a detached node, adding the splitter the new gap needs.
    pub(crate) fn attach_child(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> DockResult<()> {
        self.get(child)?;
        if self.get(parent)?.orientation.is_none() {
            self.get_mut(parent)?.orientation = Some(Orientation::Horizontal);
        }
        let needs_splitter = !self.get(parent)?.children.is_empty();
        let splitter = if needs_splitter {
            Some(self.new_splitter(parent)?)
        } else {
            None
        };

        let parent_node = self.get_mut(parent)?;
        let len = parent_node.children.len();
        let index = index.unwrap_or(len).min(len);
        parent_node.children.insert(index, child);
        if let Some(splitter) = splitter {
            let at = index.saturating_sub(1).min(parent_node.splitters.len());
            parent_node.splitters.insert(at, splitter);
        }

        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink `child` from `parent` together with one adjacent splitter.
    /// The child stays in the arena. Returns its former index.
    pub(crate) fn detach_child(&mut self, parent: NodeId, child: NodeId) -> DockResult<usize> {
        let parent_node = self.get_mut(parent)?;
        let index = parent_node
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DockError::NodeNotFound(child))?;

        parent_node.children.remove(index);
        if !parent_node.splitters.is_empty() {
            parent_node.splitters.remove(index.saturating_sub(1));
        }
        if parent_node.children.is_empty() {
            parent_node.orientation = None;
        }

        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = None;
        }
        Ok(index)
    }

    pub(crate) fn discard_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(id.0) {
                stack.extend(removed.children);
            }
        }
    }

    pub(crate) fn new_instance(&mut self, descriptor: &PanelDescriptor) -> PanelInstance {
        let id = PanelInstanceId(self.next_instance);
        self.next_instance += 1;
        PanelInstance {
            id,
            panel_id: descriptor.id.clone(),
            content: match &descriptor.template {
                Some(template) if !template.is_empty() => PanelContent::Pending {
                    template: template.clone(),
                },
                _ => PanelContent::Empty,
            },
        }
    }

    /// Append a tab and its panel to a leaf and make them active.
    pub(crate) fn append_panel(&mut self, node: NodeId, tab: TabHandle, panel: PanelInstance) -> DockResult<usize> {
        let leaf = self.leaf_mut(node)?;
        let index = leaf.tabs.push(tab);
        leaf.panels.push(panel);
        self.show_inserted(node, index)
    }

    /// Insert a tab and its panel at `at` (clamped) and make them active.
    pub(crate) fn insert_panel(
        &mut self,
        node: NodeId,
        at: usize,
        tab: TabHandle,
        panel: PanelInstance,
    ) -> DockResult<usize> {
        let leaf = self.leaf_mut(node)?;
        let index = leaf.tabs.insert(at, tab);
        leaf.panels.insert(at, panel);
        self.show_inserted(node, index)
    }

    fn show_inserted(&mut self, node: NodeId, index: usize) -> DockResult<usize> {
        let leaf = self.leaf_mut(node)?;
        leaf.tabs.activate(index);
        leaf.panels.activate(index);
        self.emit_activated(node, index);
        Ok(index)
    }

    pub(crate) fn emit_activated(&mut self, node: NodeId, index: usize) {
        let Some(tab) = self.node(node).and_then(|n| n.tabs.get(index)) else {
            return;
        };
        self.events.push(DockEvent::PanelActivated {
            node,
            panel_id: tab.panel_id.clone(),
            instance: tab.instance,
        });
    }

    pub(crate) fn emit(&mut self, event: DockEvent) {
        self.events.push(event);
    }
}

impl std::fmt::Debug for DockTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .finish()
    }
}
