//! Catalog persistence over a key-value store.
//!
//! # Responsibility
//! - Encode the whole catalog as one JSON array under `CATALOG_KEY`.
//! - Decode stored catalogs with a per-entry shape check.
//!
//! # Invariants
//! - A stored document is accepted only when it is an array and every entry
//!   has an integer `id`, string `name`, numeric `price` and boolean
//!   `available`. One bad entry rejects the whole document.
//! - An empty array is a valid, empty catalog.

use crate::model::money::decimal_from_f64;
use crate::model::pizza::{PizzaId, PizzaType};
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use serde_json::{Map, Value};

/// Fixed storage key of the catalog document.
pub const CATALOG_KEY: &str = "pizza-menu";

/// Repository interface for whole-catalog reads and writes.
pub trait MenuRepository {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load_catalog(&self) -> RepoResult<Option<Vec<PizzaType>>>;
    fn save_catalog(&self, catalog: &[PizzaType]) -> RepoResult<()>;
}

/// `MenuRepository` that stores the catalog document in a `KeyValueStore`.
pub struct KvMenuRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvMenuRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> MenuRepository for KvMenuRepository<S> {
    fn load_catalog(&self) -> RepoResult<Option<Vec<PizzaType>>> {
        match self.store.get_value(CATALOG_KEY)? {
            Some(raw) => decode_catalog(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save_catalog(&self, catalog: &[PizzaType]) -> RepoResult<()> {
        let raw = encode_catalog(catalog)?;
        self.store.put_value(CATALOG_KEY, &raw)
    }
}

/// Serializes a catalog to its stored JSON form.
pub fn encode_catalog(catalog: &[PizzaType]) -> RepoResult<String> {
    serde_json::to_string(catalog).map_err(RepoError::Serialize)
}

/// Parses a stored catalog document.
///
/// # Errors
/// - `InvalidData` when the text is not JSON, not an array, or any entry fails
///   the shape check.
pub fn decode_catalog(raw: &str) -> RepoResult<Vec<PizzaType>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("catalog is not valid JSON: {err}")))?;
    let Value::Array(entries) = value else {
        return Err(RepoError::InvalidData(
            "catalog document is not an array".to_string(),
        ));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> RepoResult<PizzaType> {
    let object = entry
        .as_object()
        .ok_or_else(|| invalid_entry(index, "entry is not an object"))?;

    let id = field(object, "id")
        .as_u64()
        .and_then(|raw| PizzaId::try_from(raw).ok())
        .ok_or_else(|| invalid_entry(index, "`id` is not a non-negative integer"))?;
    let name = field(object, "name")
        .as_str()
        .ok_or_else(|| invalid_entry(index, "`name` is not a string"))?;
    let price = field(object, "price")
        .as_f64()
        .and_then(decimal_from_f64)
        .ok_or_else(|| invalid_entry(index, "`price` is not a number"))?;
    let available = field(object, "available")
        .as_bool()
        .ok_or_else(|| invalid_entry(index, "`available` is not a boolean"))?;

    Ok(PizzaType {
        id,
        name: name.to_string(),
        price,
        available,
    })
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> &'a Value {
    object.get(key).unwrap_or(&Value::Null)
}

fn invalid_entry(index: usize, reason: &str) -> RepoError {
    RepoError::InvalidData(format!("catalog entry {index}: {reason}"))
}
