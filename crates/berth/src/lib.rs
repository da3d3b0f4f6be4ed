//! Berth - IDE-style dockable panel layouts
//!
//! Berth arranges named panels into a resizable, tabbed tiling layout that
//! users rearrange by dragging tabs and splitters:
//!
//! - **Panel Registry**: panels declared in code or in package manifests
//! - **Docking Tree**: split containers and tabbed leaves, kept collapsed and
//!   consistent after every change
//! - **Drag and Drop**: drop-side detection and tab moves between leaves
//! - **Splitters**: proportional resizing clamped by panel minimum sizes
//! - **Templates**: panel content loaded asynchronously through a resource cache
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use berth::prelude::*;
//!
//! berth::core::logging::init();
//!
//! let mut registry = PanelRegistry::new();
//! registry.register(PanelDescriptor::new("explorer", "Explorer"));
//! registry.register(PanelDescriptor::new("editor", "Editor"));
//!
//! let mut workspace = DockWorkspace::new(Arc::new(registry), MemoryReader::new());
//! workspace.resize(LayoutRect::new(0.0, 0.0, 1280.0, 720.0)).unwrap();
//!
//! let explorer = workspace.dock("explorer", workspace.root(), DockSide::Center).unwrap();
//! let editor = workspace.dock("editor", explorer.node, DockSide::East).unwrap();
//!
//! // Drag the editor tab onto the bottom of the explorer.
//! workspace.begin_tab_drag(editor.node, 0).unwrap();
//! workspace.drag_to(Vec2::new(320.0, 700.0));
//! let moved = workspace.drop_tab().unwrap().unwrap();
//!
//! let column = workspace.tree().node(moved.node).unwrap().parent().unwrap();
//! assert_eq!(workspace.tree().node(column).unwrap().orientation(), Some(Orientation::Vertical));
//! ```

pub mod prelude;
pub mod workspace;

pub use berth_assets as assets;
pub use berth_core as core;
pub use berth_core::math;
pub use berth_dock as dock;

pub use workspace::DockWorkspace;
