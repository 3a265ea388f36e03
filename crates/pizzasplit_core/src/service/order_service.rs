//! Order building and bill-split calculation.
//!
//! # Responsibility
//! - Turn catalog entries and quantities into priced order lines.
//! - Compute totals and the per-person split with staged rounding.
//! - Render bills as human-readable text.
//!
//! # Invariants
//! - Rounding happens at each stage (subtotal, total, per-person), never once
//!   at the end; `cost_per_person * people_count` may differ from `total`.
//! - Unavailable pizzas never produce an order line.

use crate::error::ErrorKind;
use crate::model::money::{format_currency, round2};
use crate::model::order::{Order, OrderItem};
use crate::model::pizza::{PizzaId, PizzaType};
use crate::model::rules::VALIDATION_RULES;
use crate::model::validation::{self, ValidationError};
use log::info;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for order building and bill splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    Validation(ValidationError),
    /// The named pizza is marked unavailable.
    Unavailable(String),
    /// Bill split requested with no order lines.
    EmptyOrder,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::EmptyOrder => ErrorKind::EmptyOrder,
        }
    }
}

impl Display for OrderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(name) => write!(f, "pizza '{name}' is not available"),
            Self::EmptyOrder => write!(f, "order must contain at least one item"),
        }
    }
}

impl Error for OrderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for OrderError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Validates an order-line quantity against the default rules.
pub fn validate_quantity(quantity: i64) -> Result<u32, ValidationError> {
    validation::validate_quantity(quantity, &VALIDATION_RULES)
}

/// Validates a people count against the default rules.
pub fn validate_people_count(people: i64) -> Result<u32, ValidationError> {
    validation::validate_people_count(people, &VALIDATION_RULES)
}

/// Prices one order line from a catalog entry.
///
/// Availability is checked first, so an unavailable pizza is rejected for any
/// quantity.
///
/// # Errors
/// - `Unavailable` when the pizza is marked unavailable.
/// - `Validation` when the quantity is outside `1..=1000` or the subtotal
///   overflows.
pub fn create_order_item(pizza: &PizzaType, quantity: i64) -> Result<OrderItem, OrderError> {
    if !pizza.available {
        return Err(OrderError::Unavailable(pizza.name.clone()));
    }
    let quantity = validate_quantity(quantity)?;
    let subtotal = pizza
        .price
        .checked_mul(Decimal::from(quantity))
        .map(round2)
        .ok_or(ValidationError::AmountTooLarge)?;

    Ok(OrderItem {
        pizza: pizza.clone(),
        quantity,
        subtotal,
    })
}

/// Totals the order and splits it between `people_count` people.
///
/// # Errors
/// - `Validation` when `people_count` is outside `1..=1000` (checked first).
/// - `EmptyOrder` when `items` is empty.
/// - `Validation` when the summed subtotals overflow.
pub fn calculate_order(items: &[OrderItem], people_count: i64) -> Result<Order, OrderError> {
    let people_count = validate_people_count(people_count)?;
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }

    let total = items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.subtotal))
        .map(round2)
        .ok_or(ValidationError::AmountTooLarge)?;
    let cost_per_person = round2(total / Decimal::from(people_count));

    info!(
        "event=order_split module=order status=ok items={} people={}",
        items.len(),
        people_count
    );

    Ok(Order {
        items: items.to_vec(),
        total,
        people_count,
        cost_per_person,
    })
}

/// One-line bill text, e.g.
/// `Order: 2x Margherita (€20.00). Total: €20.00 for 2 people = €10.00 per person.`
pub fn summarize(order: &Order) -> String {
    let lines = order
        .items
        .iter()
        .map(|item| {
            format!(
                "{}x {} ({})",
                item.quantity,
                item.pizza.name,
                format_currency(item.subtotal)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Order: {lines}. Total: {} for {} people = {} per person.",
        format_currency(order.total),
        order.people_count,
        format_currency(order.cost_per_person)
    )
}

/// Order lines being assembled before the bill is split.
///
/// Adding a pizza that is already in the draft re-prices its line with the
/// summed quantity instead of appending a second line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a draft from already-priced lines.
    pub fn from_items(items: Vec<OrderItem>) -> Self {
        Self { items }
    }

    /// Adds `quantity` of `pizza`, merging with an existing line.
    ///
    /// On error the draft is unchanged.
    pub fn add(&mut self, pizza: &PizzaType, quantity: i64) -> Result<&OrderItem, OrderError> {
        match self.position(pizza.id) {
            Some(index) => {
                let merged = i64::from(self.items[index].quantity).saturating_add(quantity);
                self.items[index] = create_order_item(pizza, merged)?;
                Ok(&self.items[index])
            }
            None => {
                let item = create_order_item(pizza, quantity)?;
                self.items.push(item);
                Ok(&self.items[self.items.len() - 1])
            }
        }
    }

    /// Drops the line for `pizza_id`. Returns whether a line was removed.
    pub fn remove(&mut self, pizza_id: PizzaId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.pizza.id != pizza_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Splits the current lines between `people_count` people.
    pub fn split(&self, people_count: i64) -> Result<Order, OrderError> {
        calculate_order(&self.items, people_count)
    }

    fn position(&self, pizza_id: PizzaId) -> Option<usize> {
        self.items.iter().position(|item| item.pizza.id == pizza_id)
    }
}
