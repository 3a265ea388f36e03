//! Error-kind taxonomy shared by every use-case error.

/// Coarse classification of a use-case failure.
///
/// Every failure is local and recoverable; callers map the kind to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed name, price, quantity or people-count input.
    Validation,
    /// Name collides with an existing catalog entry.
    Duplicate,
    /// Catalog already holds the maximum number of entries.
    Capacity,
    /// Unknown catalog id.
    NotFound,
    /// Ordering a pizza marked unavailable.
    Unavailable,
    /// Splitting a bill with no items.
    EmptyOrder,
    /// Storage write failed.
    Persistence,
}

impl ErrorKind {
    /// Stable snake_case code for cross-language callers.
    pub fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Duplicate => "duplicate",
            Self::Capacity => "capacity",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
            Self::EmptyOrder => "empty_order",
            Self::Persistence => "persistence",
        }
    }
}
