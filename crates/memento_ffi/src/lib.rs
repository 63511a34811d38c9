//! Flutter-facing bindings for `memento_core`.

pub mod api;
