//! Core use-case services.
//!
//! # Responsibility
//! - `menu_service`: catalog edits with persistence.
//! - `order_service`: order lines, totals and bill split.
//!
//! # Invariants
//! - Services take the caller's snapshot and return new values; they keep no
//!   hidden catalog or order state.

pub mod menu_service;
pub mod order_service;
