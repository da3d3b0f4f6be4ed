//! Common imports for hosts embedding Berth.

pub use crate::workspace::DockWorkspace;

pub use berth_assets::{
    AssetError, AssetResult, BytesReader, FileReader, LoadState, MemoryReader, ResourceCache,
};
pub use berth_core::math::Vec2;
pub use berth_dock::{
    DetachedPanel, DockError, DockEvent, DockNode, DockPlacement, DockResult, DockSide, DockTree,
    DockingStyle, DropTarget, LayoutRect, NodeId, Orientation, PanelContent, PanelDescriptor,
    PanelInstanceId, PanelRegistry, SplitterDrag,
};
