//! Repository layer: storage contracts and their SQLite-backed implementations.
//!
//! # Responsibility
//! - Isolate SQL and document encoding from use-case services.
//!
//! # Invariants
//! - Repositories never validate business rules; services do.
//! - Reads report malformed stored data as `RepoError::InvalidData`.

pub mod kv_repo;
pub mod menu_repo;
