//! Menu catalog use-case service.
//!
//! # Responsibility
//! - Validate and apply catalog edits (add, remove, toggle availability).
//! - Persist every resulting catalog before returning it.
//! - Load the stored catalog, falling back to the default menu.
//!
//! # Invariants
//! - Operations never mutate the input snapshot; they return a new one.
//! - A failed write returns `MenuError::Persistence` and no new snapshot, so
//!   the caller's catalog stays equal to what was last durably stored.
//! - Loading never fails outward.
//! - New ids are `max(existing ids) + 1`, or 1 for an empty catalog.

use crate::error::ErrorKind;
use crate::model::pizza::{default_menu, PizzaId, PizzaType};
use crate::model::rules::{ValidationRules, VALIDATION_RULES};
use crate::model::validation::{validate_name, validate_price, ValidationError};
use crate::repo::kv_repo::RepoError;
use crate::repo::menu_repo::MenuRepository;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MenuResult<T> = Result<T, MenuError>;

/// Service error for catalog edits.
#[derive(Debug)]
pub enum MenuError {
    Validation(ValidationError),
    /// A pizza with this name (case-insensitive) already exists.
    Duplicate(String),
    /// Catalog already holds `max` entries.
    Capacity { max: usize },
    /// The highest stored id is `PizzaId::MAX`; no next id exists.
    IdsExhausted,
    NotFound(PizzaId),
    /// Catalog write failed; the edit was not applied.
    Persistence(RepoError),
}

impl MenuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::Capacity { .. } | Self::IdsExhausted => ErrorKind::Capacity,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl Display for MenuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(name) => write!(f, "pizza type '{name}' already exists"),
            Self::Capacity { max } => {
                write!(f, "maximum number of pizza types ({max}) reached")
            }
            Self::IdsExhausted => write!(f, "no pizza ids left to assign"),
            Self::NotFound(id) => write!(f, "pizza not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to save menu: {err}"),
        }
    }
}

impl Error for MenuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for MenuError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Catalog service over a menu repository.
pub struct MenuService<R: MenuRepository> {
    repo: R,
    rules: ValidationRules,
}

impl<R: MenuRepository> MenuService<R> {
    /// Creates a service with the default validation rules.
    pub fn new(repo: R) -> Self {
        Self::with_rules(repo, VALIDATION_RULES)
    }

    pub fn with_rules(repo: R, rules: ValidationRules) -> Self {
        Self { repo, rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Loads the stored catalog.
    ///
    /// Falls back to `default_menu()` when nothing is stored, the store cannot
    /// be read, or the stored document is malformed, and writes the default
    /// back. A failure of that write is logged only.
    pub fn load(&self) -> Vec<PizzaType> {
        match self.repo.load_catalog() {
            Ok(Some(catalog)) => {
                info!(
                    "event=menu_load module=menu status=ok source=store entries={}",
                    catalog.len()
                );
                return catalog;
            }
            Ok(None) => {
                info!("event=menu_load module=menu status=ok source=default reason=absent");
            }
            Err(err) => {
                warn!(
                    "event=menu_load module=menu status=fallback source=default error={}",
                    err
                );
            }
        }

        let catalog = default_menu();
        if let Err(err) = self.repo.save_catalog(&catalog) {
            error!(
                "event=menu_save module=menu status=error error_code=default_save_failed error={}",
                err
            );
        }
        catalog
    }

    /// Adds a new available pizza.
    ///
    /// # Errors
    /// Checked in this order: name, price, capacity, duplicate name, next id,
    /// write.
    pub fn add_pizza(
        &self,
        catalog: &[PizzaType],
        name: &str,
        price: f64,
    ) -> MenuResult<Vec<PizzaType>> {
        let name = validate_name(name, &self.rules)?;
        let price = validate_price(price, &self.rules)?;

        if catalog.len() >= self.rules.max_pizza_types {
            return Err(MenuError::Capacity {
                max: self.rules.max_pizza_types,
            });
        }
        if catalog.iter().any(|pizza| pizza.has_name(&name)) {
            return Err(MenuError::Duplicate(name));
        }

        let id = catalog
            .iter()
            .map(|pizza| pizza.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(MenuError::IdsExhausted)?;
        let mut next = catalog.to_vec();
        next.push(PizzaType::new(id, name, price));

        self.persist("menu_add", next)
    }

    /// Removes the entry with `id`.
    pub fn remove_pizza(&self, catalog: &[PizzaType], id: PizzaId) -> MenuResult<Vec<PizzaType>> {
        if find_by_id(catalog, id).is_none() {
            return Err(MenuError::NotFound(id));
        }

        let next = catalog
            .iter()
            .filter(|pizza| pizza.id != id)
            .cloned()
            .collect();
        self.persist("menu_remove", next)
    }

    /// Flips `available` on the entry with `id`.
    ///
    /// An unknown id leaves the list unchanged but is still written back.
    pub fn toggle_availability(
        &self,
        catalog: &[PizzaType],
        id: PizzaId,
    ) -> MenuResult<Vec<PizzaType>> {
        let next = catalog
            .iter()
            .map(|pizza| {
                let mut pizza = pizza.clone();
                if pizza.id == id {
                    pizza.available = !pizza.available;
                }
                pizza
            })
            .collect();
        self.persist("menu_toggle", next)
    }

    fn persist(&self, event: &str, next: Vec<PizzaType>) -> MenuResult<Vec<PizzaType>> {
        match self.repo.save_catalog(&next) {
            Ok(()) => {
                info!("event={event} module=menu status=ok entries={}", next.len());
                Ok(next)
            }
            Err(err) => {
                error!(
                    "event={event} module=menu status=error error_code=menu_save_failed error={err}"
                );
                Err(MenuError::Persistence(err))
            }
        }
    }
}

/// Looks up a catalog entry by id.
pub fn find_by_id(catalog: &[PizzaType], id: PizzaId) -> Option<&PizzaType> {
    catalog.iter().find(|pizza| pizza.id == id)
}

/// Looks up a catalog entry by trimmed, case-insensitive name.
pub fn find_by_name<'a>(catalog: &'a [PizzaType], name: &str) -> Option<&'a PizzaType> {
    catalog.iter().find(|pizza| pizza.has_name(name))
}
