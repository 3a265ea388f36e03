//! Input validation for menu and order fields.
//!
//! # Responsibility
//! - Turn raw UI inputs (strings, floats, integers) into checked domain values.
//! - Report every rejection as a `ValidationError` variant.
//!
//! # Invariants
//! - Names are trimmed before any check and returned trimmed.
//! - Accepted prices are returned already rounded to 2 decimals.

use crate::model::money::{decimal_from_f64, round2};
use crate::model::rules::ValidationRules;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PIZZA_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\s\-'&.]+$").expect("valid pizza name regex"));

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Name exceeds the configured character limit.
    NameTooLong { max: usize },
    /// Name contains characters outside the allowed set.
    InvalidNameCharacters,
    /// Price is NaN or infinite.
    PriceNotFinite,
    /// Price lies outside the configured bounds.
    PriceOutOfRange { min: Decimal, max: Decimal },
    /// Quantity is zero or negative.
    InvalidQuantity(i64),
    /// Quantity exceeds the configured limit.
    QuantityTooLarge { max: u32 },
    /// People count is zero or negative.
    InvalidPeopleCount(i64),
    /// People count exceeds the configured limit.
    TooManyPeople { max: u32 },
    /// A subtotal or total does not fit in a `Decimal`.
    AmountTooLarge,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pizza name cannot be empty"),
            Self::NameTooLong { max } => write!(f, "pizza name too long (max {max} chars)"),
            Self::InvalidNameCharacters => write!(f, "pizza name contains invalid characters"),
            Self::PriceNotFinite => write!(f, "price must be a valid number"),
            Self::PriceOutOfRange { min, max } => {
                write!(f, "price must be between €{min} and €{max}")
            }
            Self::InvalidQuantity(value) => {
                write!(f, "quantity must be a positive integer, got {value}")
            }
            Self::QuantityTooLarge { max } => write!(f, "quantity too large (max {max})"),
            Self::InvalidPeopleCount(value) => {
                write!(f, "number of people must be a positive integer, got {value}")
            }
            Self::TooManyPeople { max } => write!(f, "too many people (max {max})"),
            Self::AmountTooLarge => write!(f, "order amount too large"),
        }
    }
}

impl Error for ValidationError {}

/// Validates a pizza name and returns it trimmed.
pub fn validate_name(name: &str, rules: &ValidationRules) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > rules.max_name_length {
        return Err(ValidationError::NameTooLong {
            max: rules.max_name_length,
        });
    }
    if !PIZZA_NAME_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidNameCharacters);
    }
    Ok(trimmed.to_string())
}

/// Validates a raw price and returns it rounded to 2 decimals.
///
/// The range check runs on the unrounded input, so `0.004` is rejected even
/// though it would round to `0.00`.
pub fn validate_price(price: f64, rules: &ValidationRules) -> Result<Decimal, ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::PriceNotFinite);
    }
    let (min, max) = (rules.min_price(), rules.max_price());
    let value = decimal_from_f64(price)
        .filter(|value| *value >= min && *value <= max)
        .ok_or(ValidationError::PriceOutOfRange { min, max })?;
    Ok(round2(value))
}

/// Validates one order-line quantity.
pub fn validate_quantity(quantity: i64, rules: &ValidationRules) -> Result<u32, ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity(quantity));
    }
    match u32::try_from(quantity) {
        Ok(value) if value <= rules.max_quantity => Ok(value),
        _ => Err(ValidationError::QuantityTooLarge {
            max: rules.max_quantity,
        }),
    }
}

/// Validates the number of people sharing a bill.
pub fn validate_people_count(
    people: i64,
    rules: &ValidationRules,
) -> Result<u32, ValidationError> {
    if people < 1 {
        return Err(ValidationError::InvalidPeopleCount(people));
    }
    match u32::try_from(people) {
        Ok(value) if value <= rules.max_people => Ok(value),
        _ => Err(ValidationError::TooManyPeople {
            max: rules.max_people,
        }),
    }
}
