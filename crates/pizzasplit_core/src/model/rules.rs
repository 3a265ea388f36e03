//! Validation limits shared by menu and order use-cases.
//!
//! # Responsibility
//! - Hold every numeric bound that input validation checks against.
//!
//! # Invariants
//! - Price bounds are expressed in cents so the constant stays exact.
//! - `min_price_cents <= max_price_cents`.

use rust_decimal::Decimal;

/// Tunable bounds for menu and order validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Maximum pizza name length in characters, after trimming.
    pub max_name_length: usize,
    /// Maximum number of entries a catalog may hold.
    pub max_pizza_types: usize,
    /// Lowest accepted price, in cents.
    pub min_price_cents: i64,
    /// Highest accepted price, in cents.
    pub max_price_cents: i64,
    /// Highest quantity of one order line.
    pub max_quantity: u32,
    /// Highest number of people a bill can be split between.
    pub max_people: u32,
}

/// Default rules used by the application.
pub const VALIDATION_RULES: ValidationRules = ValidationRules {
    max_name_length: 50,
    max_pizza_types: 20,
    min_price_cents: 1,
    max_price_cents: 99_999,
    max_quantity: 1000,
    max_people: 1000,
};

impl ValidationRules {
    /// Lowest accepted price as a 2-decimal amount.
    pub fn min_price(&self) -> Decimal {
        Decimal::new(self.min_price_cents, 2)
    }

    /// Highest accepted price as a 2-decimal amount.
    pub fn max_price(&self) -> Decimal {
        Decimal::new(self.max_price_cents, 2)
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        VALIDATION_RULES
    }
}
