//! Test utilities for the Berth docking engine.
//!
//! - [`sample_registry`] - a registry of typical IDE panels
//! - [`assert_tree_invariants`] - structural checks to run after every mutation
//! - [`MockReader`] - an in-memory [`BytesReader`](berth_assets::BytesReader)
//!   that records reads and can be told to fail
//!
//! # Example
//!
//! ```rust
//! use berth_dock::{DockSide, DockTree};
//! use berth_test_utils::{assert_tree_invariants, sample_registry};
//!
//! let mut tree = DockTree::new(sample_registry());
//! let console = tree.dock("console", tree.root(), DockSide::Center, None).unwrap();
//! tree.dock("inspector", console.node, DockSide::East, None).unwrap();
//! assert_tree_invariants(&tree);
//! ```

pub mod fixtures;
pub mod invariants;
pub mod mock_reader;

pub use fixtures::{SAMPLE_MANIFEST, sample_registry};
pub use invariants::{assert_tree_invariants, tree_invariant_violations};
pub use mock_reader::MockReader;
