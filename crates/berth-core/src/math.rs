//! Vector math re-exported from [`glam`].
//!
//! Pointer positions and drag deltas in the docking engine are [`Vec2`]s.
//!
//! ```
//! use berth_core::math::Vec2;
//!
//! let press = Vec2::new(100.0, 40.0);
//! let current = Vec2::new(130.0, 42.0);
//! assert_eq!((current - press).x, 30.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};
