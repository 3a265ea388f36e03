//! Pizza catalog entry model.
//!
//! # Responsibility
//! - Define the canonical catalog record persisted by the menu store.
//! - Provide the fixed default catalog used when storage is empty or corrupt.
//!
//! # Invariants
//! - `id` is assigned once by the catalog and never changes.
//! - `price` always carries at most 2 decimal places.
//! - Names are unique within a catalog, compared case-insensitively.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Stable catalog identifier, starting at 1.
pub type PizzaId = u32;

/// One catalog entry.
///
/// Serialized as `{id, name, price, available}` with `price` as a JSON number
/// to stay compatible with previously stored menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaType {
    pub id: PizzaId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub available: bool,
}

impl PizzaType {
    /// Creates an available catalog entry.
    ///
    /// Does not validate `name` or `price`; catalog writes go through
    /// `MenuService`, which does.
    pub fn new(id: PizzaId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            available: true,
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Returns the built-in six-pizza menu.
pub fn default_menu() -> Vec<PizzaType> {
    vec![
        PizzaType::new(1, "Margherita", dec!(10.00)),
        PizzaType::new(2, "Pepperoni", dec!(12.50)),
        PizzaType::new(3, "Hawaiian", dec!(13.00)),
        PizzaType::new(4, "Quattro Stagioni", dec!(14.50)),
        PizzaType::new(5, "Vegetarian", dec!(11.50)),
        PizzaType::new(6, "Meat Lovers", dec!(16.00)),
    ]
}
