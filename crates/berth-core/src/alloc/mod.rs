//! Allocation and collection types for Berth.
//!
//! - Re-exports of hash collections using AHash
//! - [`SparseSet`](sparse_set::SparseSet), the generational arena that owns dock nodes

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
