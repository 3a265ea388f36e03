//! FFI use-case API for the Flutter UI shell.
//!
//! # Responsibility
//! - Expose menu management, order building and bill split to Dart via FRB.
//! - Translate core errors into envelopes with a message and stable code.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - The shell owns the order lines; every call receives them and returns the
//!   updated list, so no order state lives on the Rust side.
//! - Order lines carry the price snapshot taken when they were added; only
//!   `order_add` reads the stored menu.

use log::warn;
use pizzasplit_core::db::open_db;
use pizzasplit_core::{
    core_version as core_version_inner, create_order_item, find_by_id, format_currency,
    init_logging as init_logging_inner, ping as ping_inner, summarize, ErrorKind,
    KvMenuRepository, MenuError, MenuService, OrderDraft, OrderError, OrderItem, PizzaType,
    SqliteKeyValueStore,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "pizzasplit.sqlite3";
const DB_PATH_ENV: &str = "PIZZASPLIT_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// # FFI contract
/// - First non-empty path wins; repeating the same path is a no-op.
/// - Returns an empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_storage(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "storage already initialized at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Catalog entry as rendered by the menu view.
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaView {
    pub id: u32,
    pub name: String,
    pub price: f64,
    /// Preformatted price, e.g. `€12.50`.
    pub price_label: String,
    pub available: bool,
}

/// Response envelope for menu calls.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuResponse {
    pub ok: bool,
    /// Stable error code (`validation`, `duplicate`, ...); `None` on success.
    pub error_code: Option<String>,
    /// Human-readable message for the UI.
    pub message: String,
    /// Current catalog; unchanged from storage when the call failed.
    pub menu: Vec<PizzaView>,
}

/// Order line held by the shell between calls.
///
/// Carries the pizza snapshot taken when the line was added, so later menu
/// edits do not re-price it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub pizza_id: u32,
    pub name: String,
    /// Unit price as decimal text, e.g. `12.50`.
    pub unit_price: String,
    pub quantity: u32,
    /// Preformatted subtotal; recomputed on every call, ignored on input.
    pub subtotal_label: String,
}

/// Response envelope for order-building calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    /// Lines to keep; equal to the input lines when the call failed.
    pub lines: Vec<OrderLine>,
}

/// Response envelope for bill split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResponse {
    pub ok: bool,
    pub error_code: Option<String>,
    pub message: String,
    pub total_label: String,
    pub cost_per_person_label: String,
    pub summary: String,
}

/// Loads the menu, seeding the default one when storage is empty or corrupt.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_load() -> MenuResponse {
    menu_load_at(&resolve_db_path())
}

/// Adds a pizza to the menu.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_add(name: String, price: f64) -> MenuResponse {
    menu_add_at(&resolve_db_path(), &name, price)
}

/// Removes a pizza from the menu.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_remove(id: u32) -> MenuResponse {
    menu_remove_at(&resolve_db_path(), id)
}

/// Flips availability of a pizza.
#[flutter_rust_bridge::frb(sync)]
pub fn menu_toggle(id: u32) -> MenuResponse {
    menu_toggle_at(&resolve_db_path(), id)
}

/// Adds `quantity` of a menu pizza to the shell's order lines.
///
/// A pizza already in the order has its quantity increased instead of
/// getting a second line.
#[flutter_rust_bridge::frb(sync)]
pub fn order_add(lines: Vec<OrderLine>, pizza_id: u32, quantity: i64) -> OrderResponse {
    order_add_at(&resolve_db_path(), lines, pizza_id, quantity)
}

/// Removes a pizza from the shell's order lines.
#[flutter_rust_bridge::frb(sync)]
pub fn order_remove(lines: Vec<OrderLine>, pizza_id: u32) -> OrderResponse {
    match restore_draft(&lines) {
        Ok(mut draft) => {
            draft.remove(pizza_id);
            OrderResponse::success("Item removed from order.", draft.items())
        }
        Err(failure) => OrderResponse::failure(failure, lines),
    }
}

/// Splits the bill for the given lines between `people_count` people.
#[flutter_rust_bridge::frb(sync)]
pub fn order_split(lines: Vec<OrderLine>, people_count: i64) -> SplitResponse {
    let result = restore_draft(&lines)
        .and_then(|draft| draft.split(people_count).map_err(Failure::from));
    match result {
        Ok(order) => SplitResponse {
            ok: true,
            error_code: None,
            message: format!(
                "Split between {} people: {} each.",
                order.people_count,
                format_currency(order.cost_per_person)
            ),
            total_label: format_currency(order.total),
            cost_per_person_label: format_currency(order.cost_per_person),
            summary: summarize(&order),
        },
        Err(failure) => SplitResponse::failure(failure),
    }
}

fn menu_load_at(db_path: &Path) -> MenuResponse {
    match with_menu_service(db_path, |service| Ok(service.load())) {
        Ok(menu) => MenuResponse::success(format!("Loaded {} pizza(s).", menu.len()), &menu),
        Err(failure) => MenuResponse::failure(failure, &[]),
    }
}

fn menu_add_at(db_path: &Path, name: &str, price: f64) -> MenuResponse {
    menu_edit(db_path, |service, menu| {
        let next = service.add_pizza(menu, name, price)?;
        Ok((format!("Added {} to menu.", name.trim()), next))
    })
}

fn menu_remove_at(db_path: &Path, id: u32) -> MenuResponse {
    menu_edit(db_path, |service, menu| {
        let name = find_by_id(menu, id).map(|pizza| pizza.name.clone());
        let next = service.remove_pizza(menu, id)?;
        let name = name.unwrap_or_default();
        Ok((format!("Removed {name} from menu."), next))
    })
}

fn menu_toggle_at(db_path: &Path, id: u32) -> MenuResponse {
    menu_edit(db_path, |service, menu| {
        let next = service.toggle_availability(menu, id)?;
        Ok(("Pizza availability updated.".to_string(), next))
    })
}

fn order_add_at(
    db_path: &Path,
    lines: Vec<OrderLine>,
    pizza_id: u32,
    quantity: i64,
) -> OrderResponse {
    let menu = match with_menu_service(db_path, |service| Ok(service.load())) {
        Ok(menu) => menu,
        Err(failure) => return OrderResponse::failure(failure, lines),
    };

    let result = restore_draft(&lines).and_then(|mut draft| {
        let pizza = find_by_id(&menu, pizza_id).ok_or_else(|| {
            Failure::new(ErrorKind::NotFound, format!("pizza not found: {pizza_id}"))
        })?;
        draft.add(pizza, quantity)?;
        Ok((format!("Added {quantity}x {} to order.", pizza.name), draft))
    });

    match result {
        Ok((message, draft)) => OrderResponse::success(message, draft.items()),
        Err(failure) => OrderResponse::failure(failure, lines),
    }
}

/// Rebuilds priced order items from the snapshots the shell holds.
///
/// Each line is re-created through `create_order_item` on an available copy
/// of its snapshot, so quantities and subtotals get the same checks as a
/// fresh `order_add`.
fn restore_draft(lines: &[OrderLine]) -> Result<OrderDraft, Failure> {
    let items = lines
        .iter()
        .map(|line| -> Result<OrderItem, Failure> {
            let price = Decimal::from_str(line.unit_price.trim()).map_err(|_| {
                Failure::new(
                    ErrorKind::Validation,
                    format!("invalid unit price `{}`", line.unit_price),
                )
            })?;
            let pizza = PizzaType::new(line.pizza_id, line.name.clone(), price);
            create_order_item(&pizza, i64::from(line.quantity)).map_err(Failure::from)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OrderDraft::from_items(items))
}

type SqliteMenuService<'conn> = MenuService<KvMenuRepository<SqliteKeyValueStore<'conn>>>;

/// Loads the stored menu and applies one edit to it.
///
/// The load goes through `MenuService::load`, so an empty or corrupt store is
/// reseeded with the default menu even when the edit itself is rejected.
fn menu_edit(
    db_path: &Path,
    edit: impl FnOnce(
        &SqliteMenuService<'_>,
        &[PizzaType],
    ) -> Result<(String, Vec<PizzaType>), MenuError>,
) -> MenuResponse {
    let mut current = Vec::new();
    let result = with_menu_service(db_path, |service| {
        current = service.load();
        edit(service, &current).map_err(Failure::from)
    });
    match result {
        Ok((message, next)) => MenuResponse::success(message, &next),
        Err(failure) => MenuResponse::failure(failure, &current),
    }
}

fn with_menu_service<T>(
    db_path: &Path,
    f: impl FnOnce(&SqliteMenuService<'_>) -> Result<T, Failure>,
) -> Result<T, Failure> {
    let conn = open_db(db_path).map_err(|err| {
        warn!("event=ffi_call module=ffi status=error error_code=db_open_failed");
        Failure::new(ErrorKind::Persistence, format!("menu DB open failed: {err}"))
    })?;
    let service = MenuService::new(KvMenuRepository::new(SqliteKeyValueStore::new(&conn)));
    f(&service)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

/// Error collapsed to what the shell displays.
#[derive(Debug)]
struct Failure {
    kind: ErrorKind,
    message: String,
}

impl Failure {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<MenuError> for Failure {
    fn from(value: MenuError) -> Self {
        Self::new(value.kind(), value.to_string())
    }
}

impl From<OrderError> for Failure {
    fn from(value: OrderError) -> Self {
        Self::new(value.kind(), value.to_string())
    }
}

impl MenuResponse {
    fn success(message: impl Into<String>, menu: &[PizzaType]) -> Self {
        Self {
            ok: true,
            error_code: None,
            message: message.into(),
            menu: menu.iter().map(to_pizza_view).collect(),
        }
    }

    fn failure(failure: Failure, menu: &[PizzaType]) -> Self {
        Self {
            ok: false,
            error_code: Some(failure.kind.code().to_string()),
            message: failure.message,
            menu: menu.iter().map(to_pizza_view).collect(),
        }
    }
}

impl OrderResponse {
    fn success(message: impl Into<String>, items: &[OrderItem]) -> Self {
        Self {
            ok: true,
            error_code: None,
            message: message.into(),
            lines: items.iter().map(to_order_line).collect(),
        }
    }

    fn failure(failure: Failure, lines: Vec<OrderLine>) -> Self {
        Self {
            ok: false,
            error_code: Some(failure.kind.code().to_string()),
            message: failure.message,
            lines,
        }
    }
}

impl SplitResponse {
    fn failure(failure: Failure) -> Self {
        Self {
            ok: false,
            error_code: Some(failure.kind.code().to_string()),
            message: failure.message,
            total_label: String::new(),
            cost_per_person_label: String::new(),
            summary: String::new(),
        }
    }
}

fn to_pizza_view(pizza: &PizzaType) -> PizzaView {
    PizzaView {
        id: pizza.id,
        name: pizza.name.clone(),
        price: pizza.price.to_f64().unwrap_or_default(),
        price_label: format_currency(pizza.price),
        available: pizza.available,
    }
}

fn to_order_line(item: &OrderItem) -> OrderLine {
    let mut unit_price = item.pizza.price;
    unit_price.rescale(2);
    OrderLine {
        pizza_id: item.pizza.id,
        name: item.pizza.name.clone(),
        unit_price: unit_price.to_string(),
        quantity: item.quantity,
        subtotal_label: format_currency(item.subtotal),
    }
}
