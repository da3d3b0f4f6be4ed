//! The host-facing docking workspace.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use async_executor::{LocalExecutor, Task};
use berth_assets::{AssetResult, BytesReader, ResourceCache};
use berth_core::math::Vec2;
use berth_dock::{
    DetachedPanel, DockError, DockEvent, DockPlacement, DockResult, DockSide, DockTree,
    DockingStyle, DragManager, DragSession, DraggedTab, LayoutRect, NodeId, PanelContent,
    PanelInstanceId, PanelRegistry, SplitterDrag, SplitterId,
};
use tracing::{debug, trace, warn};

/// A template load that finished and waits to be applied to its panel.
struct LoadedTemplate {
    instance: PanelInstanceId,
    template: String,
    result: AssetResult<Arc<str>>,
}

type Completions = Rc<RefCell<Vec<LoadedTemplate>>>;

/// A dock tree together with everything a host needs to drive it.
///
/// The workspace owns the tree, loads panel templates through a
/// [`ResourceCache`], and holds the single tab drag and splitter drag of the
/// window. Everything runs on the UI thread: template loads are spawned on a
/// local executor and only touch the tree inside [`DockWorkspace::pump_loads`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use berth::prelude::*;
///
/// let mut registry = PanelRegistry::new();
/// registry.register(PanelDescriptor::new("console", "Console").template("console.html"));
///
/// let mut reader = MemoryReader::new();
/// reader.insert("console.html", b"<pre></pre>".to_vec());
///
/// let mut workspace = DockWorkspace::new(Arc::new(registry), reader);
/// let placement = workspace.dock("console", workspace.root(), DockSide::Center).unwrap();
///
/// workspace.pump_loads();
/// let panel = workspace.tree().panel_instance(placement.instance).unwrap();
/// assert!(matches!(&panel.content, PanelContent::Ready(html) if html.as_ref() == "<pre></pre>"));
/// ```
pub struct DockWorkspace {
    tree: DockTree,
    resources: ResourceCache,
    executor: LocalExecutor<'static>,
    loads: Vec<Task<()>>,
    completed: Completions,
    drags: DragManager,
    splitter_drag: Option<SplitterDrag>,
}

impl DockWorkspace {
    pub fn new(registry: Arc<PanelRegistry>, reader: impl BytesReader + 'static) -> Self {
        Self::with_resources(registry, DockingStyle::default(), ResourceCache::new(reader))
    }

    /// Build a workspace around an existing cache, sharing its entries.
    pub fn with_resources(
        registry: Arc<PanelRegistry>,
        style: DockingStyle,
        resources: ResourceCache,
    ) -> Self {
        Self {
            tree: DockTree::with_style(registry, style),
            resources,
            executor: LocalExecutor::new(),
            loads: Vec::new(),
            completed: Rc::new(RefCell::new(Vec::new())),
            drags: DragManager::new(),
            splitter_drag: None,
        }
    }

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Dock a new instance of `panel_id` and start loading its template.
    pub fn dock(&mut self, panel_id: &str, target: NodeId, side: DockSide) -> DockResult<DockPlacement> {
        let placement = self.tree.dock(panel_id, target, side, None)?;
        self.load_content(placement.instance);
        Ok(placement)
    }

    /// Close a tab. Out-of-range indices are ignored.
    pub fn undock(&mut self, node: NodeId, index: usize) -> DockResult<Option<DetachedPanel>> {
        self.tree.undock(node, index)
    }

    /// Move a tab, keeping its panel content.
    pub fn move_tab(
        &mut self,
        source: NodeId,
        index: usize,
        target: NodeId,
        side: DockSide,
    ) -> DockResult<Option<DockPlacement>> {
        self.tree.move_tab(source, index, target, side)
    }

    /// Move a tab into `target`'s tab bar before position `at`.
    pub fn move_tab_to(
        &mut self,
        source: NodeId,
        index: usize,
        target: NodeId,
        at: usize,
    ) -> DockResult<DockPlacement> {
        self.tree.move_tab_to(source, index, target, at)
    }

    pub fn activate_tab(&mut self, node: NodeId, index: usize) -> DockResult<()> {
        self.tree.activate_tab(node, index)
    }

    pub fn reorder_tab(&mut self, node: NodeId, from: usize, to: usize) -> DockResult<()> {
        self.tree.reorder_tab(node, from, to)
    }

    /// Recompute splitter positions from the current measured sizes.
    pub fn relayout(&mut self) -> DockResult<()> {
        self.tree.relayout(self.tree.root())
    }

    /// Lay the tree out in a new viewport.
    pub fn resize(&mut self, viewport: LayoutRect) -> DockResult<()> {
        self.tree.compute_layout(viewport)
    }

    pub fn drain_events(&mut self) -> Vec<DockEvent> {
        self.tree.drain_events()
    }

    // ------------------------------------------------------------------
    // Template loading
    // ------------------------------------------------------------------

    fn load_content(&mut self, instance: PanelInstanceId) {
        let Some(template) = self
            .tree
            .panel_instance(instance)
            .and_then(|panel| panel.content.template())
            .map(str::to_string)
        else {
            return;
        };

        if let Some(text) = self.resources.get_resource(&template) {
            trace!("template {} cached for {}", template, instance);
            self.tree.set_panel_content(instance, PanelContent::Ready(text));
            return;
        }

        debug!("loading template {} for {}", template, instance);
        let import = self.resources.import_resource(&template);
        let completed = Rc::clone(&self.completed);
        let task = self.executor.spawn(async move {
            let result = import.await;
            completed.borrow_mut().push(LoadedTemplate {
                instance,
                template,
                result,
            });
        });
        self.loads.push(task);
    }

    /// Number of template loads still running.
    pub fn pending_loads(&self) -> usize {
        self.loads.len()
    }

    /// Run ready template loads and apply every finished one to its panel.
    /// Returns how many panels changed.
    pub fn pump_loads(&mut self) -> usize {
        while self.executor.try_tick() {}
        self.loads.retain(|task| !task.is_finished());
        self.apply_completed()
    }

    /// Block until every pending template load has finished, then apply them.
    pub fn finish_loads(&mut self) -> usize {
        let loads = std::mem::take(&mut self.loads);
        futures_lite::future::block_on(self.executor.run(async move {
            for task in loads {
                task.await;
            }
        }));
        self.apply_completed()
    }

    fn apply_completed(&mut self) -> usize {
        let finished = std::mem::take(&mut *self.completed.borrow_mut());
        let mut applied = 0;
        for loaded in finished {
            let content = match loaded.result {
                Ok(text) => PanelContent::Ready(text),
                Err(err) => {
                    warn!(
                        "panel {} keeps an empty slot, template {} failed: {}",
                        loaded.instance, loaded.template, err
                    );
                    PanelContent::Failed {
                        template: loaded.template,
                        message: err.to_string(),
                    }
                }
            };
            if self.tree.set_panel_content(loaded.instance, content) {
                applied += 1;
            } else {
                trace!("panel {} closed before its template arrived", loaded.instance);
            }
        }
        applied
    }

    // ------------------------------------------------------------------
    // Tab drags
    // ------------------------------------------------------------------

    /// Pick up the tab at `index` of `node`.
    pub fn begin_tab_drag(&mut self, node: NodeId, index: usize) -> DockResult<()> {
        let leaf = self.tree.node(node).ok_or(DockError::NodeNotFound(node))?;
        let tab = leaf.tabs().get(index).ok_or(DockError::InvalidTabIndex)?;
        let dragged = DraggedTab {
            node,
            index,
            panel_id: tab.panel_id.clone(),
            instance: tab.instance,
        };
        self.drags.start(dragged)?;
        Ok(())
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drags.session()
    }

    /// The pointer entered `node` during a drag. The root is never a target.
    pub fn drag_enter(&mut self, node: NodeId) {
        if node == self.tree.root() {
            return;
        }
        if let Some(session) = self.drags.session_mut() {
            session.enter(node);
        }
    }

    pub fn drag_leave(&mut self, node: NodeId) {
        if let Some(session) = self.drags.session_mut() {
            session.leave(node);
        }
    }

    /// Update the drop side from the pointer over the hovered node.
    /// Returns true if the drop indicator needs redrawing.
    pub fn drag_over(&mut self, point: Vec2) -> bool {
        let Some(session) = self.drags.session_mut() else {
            return false;
        };
        let Some(rect) = session
            .hover_node()
            .and_then(|node| self.tree.node(node))
            .map(|node| node.layout())
        else {
            return false;
        };
        session.hover(rect, point)
    }

    /// Pointer-driven hovering: hit-test the leaf under `point`, switch the
    /// hover target when it changes, and update the drop side.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let leaf = self.tree.leaf_at(point);
        let Some(session) = self.drags.session_mut() else {
            return false;
        };
        let hovered = session.hover_node();
        if hovered != leaf {
            if let Some(old) = hovered {
                session.leave(old);
            }
            if let Some(new) = leaf {
                session.enter(new);
            }
        }
        self.drag_over(point)
    }

    /// Drop the dragged tab on the current target. Dropping outside any
    /// target ends the drag without moving anything.
    pub fn drop_tab(&mut self) -> DockResult<Option<DockPlacement>> {
        let session = self.drags.finish()?;
        let Some(target) = session.drop_target() else {
            debug!("tab {} dropped outside any target", session.dragged().panel_id);
            return Ok(None);
        };
        // The host may have closed or reordered tabs since the pickup.
        let dragged = session.dragged();
        let Some((node, index)) = self.tree.find_panel(dragged.instance) else {
            debug!("tab {} was closed during its drag", dragged.panel_id);
            return Ok(None);
        };
        self.tree.move_tab(node, index, target.node, target.side)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.drags.cancel().is_some()
    }

    // ------------------------------------------------------------------
    // Splitter drags
    // ------------------------------------------------------------------

    /// Start dragging the splitter under `point`, if any.
    pub fn press_splitter(&mut self, point: Vec2) -> DockResult<bool> {
        let Some((container, splitter)) = self.tree.hit_test_splitter(point) else {
            return Ok(false);
        };
        self.press_splitter_at(container, splitter, point)?;
        Ok(true)
    }

    pub fn press_splitter_at(&mut self, container: NodeId, splitter: SplitterId, point: Vec2) -> DockResult<()> {
        if self.splitter_drag.is_some() {
            return Err(DockError::DragInProgress);
        }
        self.splitter_drag = Some(SplitterDrag::begin(&self.tree, container, splitter, point)?);
        Ok(())
    }

    pub fn splitter_drag(&self) -> Option<&SplitterDrag> {
        self.splitter_drag.as_ref()
    }

    /// Follow the pointer with the pressed splitter. Returns the clamped
    /// position, or None if no splitter is pressed.
    pub fn move_splitter(&mut self, point: Vec2) -> DockResult<Option<f32>> {
        match self.splitter_drag.as_mut() {
            Some(drag) => drag.update(&mut self.tree, point).map(Some),
            None => Ok(None),
        }
    }

    /// Release the pressed splitter and lay the tree out again.
    pub fn release_splitter(&mut self) -> DockResult<Option<f32>> {
        match self.splitter_drag.take() {
            Some(drag) => drag.finish(&mut self.tree).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for DockWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockWorkspace")
            .field("tree", &self.tree)
            .field("resources", &self.resources)
            .field("pending_loads", &self.loads.len())
            .field("dragging", &self.drags.is_dragging())
            .field("splitter_drag", &self.splitter_drag.is_some())
            .finish()
    }
}
