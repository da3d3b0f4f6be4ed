//! Tab drag sessions.
//!
//! A [`DragSession`] follows one dragged tab from pickup to drop. Hosts feed
//! it enter/leave notifications for the nodes under the pointer and pointer
//! positions while hovering; the session keeps the current drop target. The
//! [`DragManager`] owns at most one session at a time.

use berth_core::math::Vec2;
use tracing::{debug, trace};

use crate::content::PanelInstanceId;
use crate::drop_zone::{DropTarget, detect_drop_side};
use crate::operations::{DockError, DockResult};
use crate::types::{DockSide, LayoutRect, NodeId};

/// The tab picked up by a drag.
///
/// `node` and `index` record where the drag started; the tab is found again
/// through `instance` when it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedTab {
    pub node: NodeId,
    pub index: usize,
    pub panel_id: String,
    pub instance: PanelInstanceId,
}

/// State of one in-progress tab drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    dragged: DraggedTab,
    hover_node: Option<NodeId>,
    drop_side: Option<DockSide>,
    /// Nested enter/leave balance for the hovered node.
    hover_depth: i32,
}

impl DragSession {
    pub fn new(dragged: DraggedTab) -> Self {
        Self {
            dragged,
            hover_node: None,
            drop_side: None,
            hover_depth: 0,
        }
    }

    pub fn dragged(&self) -> &DraggedTab {
        &self.dragged
    }

    pub fn hover_node(&self) -> Option<NodeId> {
        self.hover_node
    }

    /// Side last computed for the hovered node, if any.
    pub fn drop_side(&self) -> Option<DockSide> {
        self.drop_side
    }

    pub fn hover_depth(&self) -> i32 {
        self.hover_depth
    }

    /// The pointer entered `node` or one of its nested regions.
    pub fn enter(&mut self, node: NodeId) {
        if self.hover_node != Some(node) {
            self.hover_node = Some(node);
            self.drop_side = None;
            self.hover_depth = 0;
        }
        self.hover_depth += 1;
    }

    /// The pointer left `node` or one of its nested regions.
    ///
    /// The hover target is only cleared once every enter has been matched by
    /// a leave. Leaves for a node that is not hovered are ignored.
    pub fn leave(&mut self, node: NodeId) {
        if self.hover_node != Some(node) {
            return;
        }
        self.hover_depth -= 1;
        if self.hover_depth <= 0 {
            self.clear_hover();
        }
    }

    /// Recompute the drop side from the pointer over the hovered node's rect.
    ///
    /// Returns true if the side changed, meaning the drop indicator needs
    /// redrawing.
    pub fn hover(&mut self, rect: LayoutRect, point: Vec2) -> bool {
        if self.hover_node.is_none() {
            return false;
        }
        let side = detect_drop_side(rect, point);
        if self.drop_side == Some(side) {
            return false;
        }
        trace!("drop side {:?} -> {}", self.drop_side, side);
        self.drop_side = Some(side);
        true
    }

    /// Where the tab would land if dropped now.
    pub fn drop_target(&self) -> Option<DropTarget> {
        Some(DropTarget::new(self.hover_node?, self.drop_side?))
    }

    fn clear_hover(&mut self) {
        self.hover_node = None;
        self.drop_side = None;
        self.hover_depth = 0;
    }
}

/// Owns the single active tab drag.
#[derive(Debug, Default)]
pub struct DragManager {
    session: Option<DragSession>,
}

impl DragManager {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Start dragging a tab. Fails if another drag is still running.
    pub fn start(&mut self, dragged: DraggedTab) -> DockResult<&mut DragSession> {
        if self.session.is_some() {
            return Err(DockError::DragInProgress);
        }
        debug!("tab drag started: {} from {:?}", dragged.panel_id, dragged.node);
        Ok(self.session.insert(DragSession::new(dragged)))
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        self.session.as_mut()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Drop the session without moving anything.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            debug!("tab drag cancelled: {}", session.dragged.panel_id);
        }
        session
    }

    /// End the session for a drop and return it.
    pub fn finish(&mut self) -> DockResult<DragSession> {
        self.session.take().ok_or(DockError::NoActiveDrag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::alloc::sparse_set::SparseSet;

    fn nodes() -> (NodeId, NodeId) {
        let mut set = SparseSet::new();
        (NodeId(set.push(())), NodeId(set.push(())))
    }

    fn session(source: NodeId) -> DragSession {
        DragSession::new(DraggedTab {
            node: source,
            index: 0,
            panel_id: "console".to_string(),
            instance: PanelInstanceId(0),
        })
    }

    #[test]
    fn test_nested_enter_leave_keeps_hover() {
        let (a, _) = nodes();
        let mut session = session(a);

        session.enter(a);
        session.enter(a);
        session.leave(a);
        assert_eq!(session.hover_node(), Some(a));
        assert_eq!(session.hover_depth(), 1);

        session.leave(a);
        assert_eq!(session.hover_node(), None);
        assert!(session.drop_target().is_none());
    }

    #[test]
    fn test_entering_another_node_resets_counter() {
        let (a, b) = nodes();
        let mut session = session(a);

        session.enter(a);
        session.enter(a);
        session.enter(b);
        assert_eq!(session.hover_node(), Some(b));
        assert_eq!(session.hover_depth(), 1);

        // A late leave from the old node does not clear the new one.
        session.leave(a);
        assert_eq!(session.hover_node(), Some(b));
    }

    #[test]
    fn test_hover_reports_only_changes() {
        let (a, _) = nodes();
        let mut session = session(a);
        let rect = LayoutRect::new(0.0, 0.0, 300.0, 300.0);

        assert!(!session.hover(rect, Vec2::new(150.0, 150.0)));
        session.enter(a);
        assert!(session.hover(rect, Vec2::new(150.0, 150.0)));
        assert!(!session.hover(rect, Vec2::new(160.0, 140.0)));
        assert!(session.hover(rect, Vec2::new(290.0, 150.0)));
        assert_eq!(session.drop_target(), Some(DropTarget::new(a, DockSide::East)));
    }

    #[test]
    fn test_manager_allows_one_session() {
        let (a, _) = nodes();
        let mut manager = DragManager::new();
        let dragged = session(a).dragged().clone();

        manager.start(dragged.clone()).unwrap();
        assert!(matches!(manager.start(dragged), Err(DockError::DragInProgress)));
        assert!(manager.is_dragging());

        manager.finish().unwrap();
        assert!(matches!(manager.finish(), Err(DockError::NoActiveDrag)));
        assert!(manager.cancel().is_none());
    }
}
