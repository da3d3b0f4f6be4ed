//! Berth Core
//!
//! Shared utilities for the Berth docking layout engine: hash collections,
//! the generational arena backing the dock tree, logging, profiling and math.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
