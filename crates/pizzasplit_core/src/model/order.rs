//! Order line and bill models.
//!
//! # Invariants
//! - `OrderItem::pizza` is a value copy taken when the line was created; later
//!   catalog edits never change an existing line.
//! - `Order` is derived data and is never persisted.

use crate::model::pizza::PizzaType;
use rust_decimal::Decimal;

/// One order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Snapshot of the catalog entry at creation time.
    pub pizza: PizzaType,
    /// Number of pizzas, in `1..=max_quantity`.
    pub quantity: u32,
    /// `round2(pizza.price * quantity)`.
    pub subtotal: Decimal,
}

/// A computed bill with its per-person split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Lines in insertion order.
    pub items: Vec<OrderItem>,
    /// `round2` of the summed subtotals.
    pub total: Decimal,
    pub people_count: u32,
    /// `round2(total / people_count)`. Multiplying back may not equal `total`.
    pub cost_per_person: Decimal,
}
