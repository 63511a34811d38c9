//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure core modules and storage into host-facing use-cases.
//! - Keep FFI/CLI layers decoupled from storage and rendering details.

pub mod grid_service;
pub mod state_service;
