//! Flutter-facing bindings for PizzaSplit core.
//!
//! Everything exported lives in `api`; Dart bindings are generated from it.

pub mod api;
