//! Lifecycle notifications queued for the host.

use crate::content::PanelInstanceId;
use crate::types::NodeId;

/// Panel lifecycle event, drained with [`DockTree::drain_events`](crate::DockTree::drain_events).
///
/// Quiet active-index adjustments (a neighbour closing, a tab inserted before
/// the active one) never produce events.
#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    /// A panel became the active one in its leaf.
    PanelActivated {
        node: NodeId,
        panel_id: String,
        instance: PanelInstanceId,
    },
    /// A panel was closed and dropped from the layout.
    PanelClosed {
        node: NodeId,
        panel_id: String,
        instance: PanelInstanceId,
    },
}

impl DockEvent {
    pub fn panel_id(&self) -> &str {
        match self {
            DockEvent::PanelActivated { panel_id, .. } | DockEvent::PanelClosed { panel_id, .. } => {
                panel_id
            }
        }
    }

    pub fn instance(&self) -> PanelInstanceId {
        match self {
            DockEvent::PanelActivated { instance, .. } | DockEvent::PanelClosed { instance, .. } => {
                *instance
            }
        }
    }
}
