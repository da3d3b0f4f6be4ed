//! Docking-tree engine for tabbed, splittable panel layouts.
//!
//! The engine keeps panels in a tree of [`DockNode`]s:
//! - **Leaves** hold a [`TabStrip`] and a [`ContentSurface`] that always agree
//!   on length, order and active entry
//! - **Containers** hold two or more children along one [`Orientation`],
//!   separated by [`Splitter`]s
//! - **Operations** ([`DockTree::dock`], [`DockTree::undock`],
//!   [`DockTree::move_tab`]) keep the tree collapsed and its splitters
//!   consistent after every change
//! - **Drags** are explicit values: [`SplitterDrag`] for resizing and
//!   [`DragSession`] for moving tabs
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use berth_dock::*;
//!
//! let mut registry = PanelRegistry::new();
//! registry.register(PanelDescriptor::new("console", "Console"));
//! registry.register(PanelDescriptor::new("inspector", "Inspector"));
//!
//! let mut tree = DockTree::new(Arc::new(registry));
//! let console = tree.dock("console", tree.root(), DockSide::Center, None).unwrap();
//! let inspector = tree.dock("inspector", console.node, DockSide::East, None).unwrap();
//!
//! let root = tree.node(tree.root()).unwrap();
//! assert_eq!(root.children(), &[console.node, inspector.node]);
//! assert_eq!(root.orientation(), Some(Orientation::Horizontal));
//! assert_eq!(tree.splitter_count(tree.root()), 1);
//! ```

pub mod content;
pub mod context;
pub mod drag;
pub mod drop_zone;
pub mod events;
pub mod layout;
pub mod operations;
pub mod registry;
pub mod splitter;
pub mod strip;
pub mod tabs;
pub mod tree;
pub mod types;

// Re-export main types
pub use content::{ContentSurface, PanelContent, PanelInstance, PanelInstanceId};
pub use context::{
    DEFAULT_EMPTY_MIN_SIZE, DEFAULT_SPLITTER_SIZE, DEFAULT_TAB_BAR_HEIGHT, DockingStyle,
};
pub use drag::{DragManager, DragSession, DraggedTab};
pub use drop_zone::{DropTarget, DropZoneDetector, detect_drop_side};
pub use events::DockEvent;
pub use operations::{DetachedPanel, DockError, DockResult};
pub use registry::{DockSection, PanelDescriptor, PanelEntry, PanelManifest, PanelRegistry};
pub use splitter::{Splitter, SplitterDrag, SplitterId};
pub use strip::{Removed, Strip};
pub use tabs::{TabHandle, TabStrip};
pub use tree::{DockNode, DockPlacement, DockTree, NodeSnapshot, ROOT_ID};
pub use types::{DockSide, LayoutRect, NodeId, Orientation};
