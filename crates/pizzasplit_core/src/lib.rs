//! Core domain logic for PizzaSplit.
//! This crate is the single source of truth for menu and bill invariants.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use error::ErrorKind;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::money::{format_currency, round2, CURRENCY_SYMBOL};
pub use model::order::{Order, OrderItem};
pub use model::pizza::{default_menu, PizzaId, PizzaType};
pub use model::rules::{ValidationRules, VALIDATION_RULES};
pub use model::validation::ValidationError;
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use repo::menu_repo::{KvMenuRepository, MenuRepository, CATALOG_KEY};
pub use service::menu_service::{find_by_id, find_by_name, MenuError, MenuResult, MenuService};
pub use service::order_service::{
    calculate_order, create_order_item, summarize, validate_people_count, validate_quantity,
    OrderDraft, OrderError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
