//! Domain model shared by every core module.
//!
//! # Responsibility
//! - Define the value types passed between week math, allocation, rendering
//!   and the state codec.
//!
//! # Invariants
//! - All types are plain values recomputed from inputs; only `Category::id`
//!   carries identity.

pub mod category;
pub mod input;
pub mod metrics;
