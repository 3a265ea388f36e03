//! Domain model for the pizza menu and bill split.
//!
//! # Responsibility
//! - Define catalog, order and money types used by core business logic.
//! - Keep input validation next to the types it protects.
//!
//! # Invariants
//! - Monetary amounts are `Decimal`, rounded to 2 places where produced.
//! - Catalog ids are stable for the lifetime of an entry.

pub mod money;
pub mod order;
pub mod pizza;
pub mod rules;
pub mod validation;
