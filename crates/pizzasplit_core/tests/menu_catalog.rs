use pizzasplit_core::db::open_db_in_memory;
use pizzasplit_core::{
    create_order_item, default_menu, find_by_id, ErrorKind, KeyValueStore, KvMenuRepository,
    MenuError, MenuService, PizzaType, RepoError, RepoResult, SqliteKeyValueStore,
    ValidationError, ValidationRules, CATALOG_KEY, VALIDATION_RULES,
};
use rust_decimal_macros::dec;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory store that counts writes and can be told to reject them.
#[derive(Default)]
struct ScriptedStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl ScriptedStore {
    fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    fn stored(&self) -> Option<String> {
        self.values.borrow().get(CATALOG_KEY).cloned()
    }
}

impl KeyValueStore for ScriptedStore {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::InvalidData("storage is full".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn service(store: &ScriptedStore) -> MenuService<KvMenuRepository<&ScriptedStore>> {
    MenuService::new(KvMenuRepository::new(store))
}

#[test]
fn load_without_stored_menu_returns_and_persists_default() {
    let store = ScriptedStore::default();
    let menu = service(&store).load();

    assert_eq!(menu, default_menu());
    assert_eq!(store.writes.get(), 1);
    assert!(store.stored().unwrap().contains("Quattro Stagioni"));
}

#[test]
fn load_from_non_array_value_falls_back_to_default_and_persists_it() {
    for raw in [r#"{"id":1}"#, "42", "\"menu\"", "{broken"] {
        let store = ScriptedStore::with_value(CATALOG_KEY, raw);
        let menu = service(&store).load();

        assert_eq!(menu, default_menu(), "stored value {raw}");
        assert_eq!(store.writes.get(), 1);
        assert_ne!(store.stored().as_deref(), Some(raw));
    }
}

#[test]
fn load_with_one_malformed_entry_discards_whole_document() {
    let raw = r#"[
        {"id":1,"name":"Custom","price":9.5,"available":true},
        {"id":2,"name":"Broken","price":"9.50","available":true}
    ]"#;
    let store = ScriptedStore::with_value(CATALOG_KEY, raw);

    assert_eq!(service(&store).load(), default_menu());
}

#[test]
fn load_returns_stored_menu_without_rewriting_it() {
    let raw = r#"[{"id":4,"name":"Custom","price":9.5,"available":false}]"#;
    let store = ScriptedStore::with_value(CATALOG_KEY, raw);

    let menu = service(&store).load();
    assert_eq!(
        menu,
        vec![PizzaType {
            id: 4,
            name: "Custom".to_string(),
            price: dec!(9.50),
            available: false,
        }]
    );
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn load_never_fails_even_when_default_cannot_be_saved() {
    let store = ScriptedStore::default();
    store.fail_writes.set(true);

    assert_eq!(service(&store).load(), default_menu());
    assert_eq!(store.stored(), None);
}

#[test]
fn add_assigns_next_id_trims_name_and_rounds_price() {
    let store = ScriptedStore::default();
    let service = service(&store);
    let menu = default_menu();

    let next = service.add_pizza(&menu, "  Diavola  ", 13.456).unwrap();

    assert_eq!(next.len(), menu.len() + 1);
    let added = find_by_id(&next, 7).expect("new pizza should get id 7");
    assert_eq!(added.name, "Diavola");
    assert_eq!(added.price, dec!(13.46));
    assert!(added.available);
    assert_eq!(menu.len(), 6, "input snapshot must not change");
    assert_eq!(store.writes.get(), 1);
}

#[test]
fn add_uses_max_id_not_length_and_starts_at_one() {
    let store = ScriptedStore::default();
    let service = service(&store);

    let sparse = vec![PizzaType::new(9, "Nine", dec!(9.00))];
    let next = service.add_pizza(&sparse, "Ten", 10.0).unwrap();
    assert_eq!(next[1].id, 10);

    let first = service.add_pizza(&[], "First", 1.0).unwrap();
    assert_eq!(first[0].id, 1);
}

#[test]
fn add_rejects_invalid_input_without_writing() {
    let store = ScriptedStore::default();
    let service = service(&store);
    let menu = default_menu();

    let cases: Vec<(&str, f64)> = vec![
        ("   ", 10.0),
        ("", 10.0),
        ("This name is far too long to be accepted by the menu", 10.0),
        ("Pizza<script>", 10.0),
        ("Valid", 0.0),
        ("Valid", -1.0),
        ("Valid", 1000.0),
        ("Valid", f64::NAN),
    ];
    for (name, price) in cases {
        let err = service.add_pizza(&menu, name, price).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "{name} {price}: {err}");
    }
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn add_rejects_duplicate_names_case_insensitively() {
    let store = ScriptedStore::default();
    let err = service(&store)
        .add_pizza(&default_menu(), " margherita ", 9.0)
        .unwrap_err();

    assert!(matches!(&err, MenuError::Duplicate(name) if name == "margherita"));
    assert_eq!(err.kind(), ErrorKind::Duplicate);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn add_rejects_when_catalog_is_full() {
    let store = ScriptedStore::default();
    let service = service(&store);
    let full = (1..=20)
        .map(|id| PizzaType::new(id, format!("Pizza {id}"), dec!(5.00)))
        .collect::<Vec<_>>();

    let err = service.add_pizza(&full, "One More", 5.0).unwrap_err();
    assert!(matches!(err, MenuError::Capacity { max: 20 }));

    let duplicate_in_full = service.add_pizza(&full, "Pizza 1", 5.0).unwrap_err();
    assert_eq!(duplicate_in_full.kind(), ErrorKind::Capacity);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn add_respects_custom_rules() {
    let store = ScriptedStore::default();
    let rules = ValidationRules {
        max_pizza_types: 1,
        max_name_length: 5,
        ..VALIDATION_RULES
    };
    let service = MenuService::with_rules(KvMenuRepository::new(&store), rules);

    let err = service.add_pizza(&[], "Marinara", 5.0).unwrap_err();
    assert!(matches!(
        err,
        MenuError::Validation(ValidationError::NameTooLong { max: 5 })
    ));

    let one = service.add_pizza(&[], "Rossa", 5.0).unwrap();
    let err = service.add_pizza(&one, "Ragu", 5.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn add_surfaces_write_failure_as_persistence_error() {
    let store = ScriptedStore::default();
    store.fail_writes.set(true);

    let err = service(&store)
        .add_pizza(&default_menu(), "Diavola", 13.0)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(err.to_string().contains("failed to save menu"));
    assert_eq!(store.stored(), None);
}

#[test]
fn add_rejects_when_no_next_id_exists() {
    let store = ScriptedStore::default();
    let menu = vec![PizzaType::new(u32::MAX, "Last", dec!(5.00))];

    let err = service(&store).add_pizza(&menu, "Beyond", 2.0).unwrap_err();

    assert!(matches!(err, MenuError::IdsExhausted));
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn add_after_loading_highest_stored_id_fails_cleanly() {
    let raw = r#"[{"id":4294967295,"name":"Last","price":5.0,"available":true}]"#;
    let store = ScriptedStore::with_value(CATALOG_KEY, raw);
    let service = service(&store);
    let menu = service.load();

    let err = service.add_pizza(&menu, "Beyond", 2.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
    assert_eq!(store.stored().as_deref(), Some(raw));
}

#[test]
fn remove_drops_exactly_one_entry() {
    let store = ScriptedStore::default();
    let menu = default_menu();

    let next = service(&store).remove_pizza(&menu, 3).unwrap();

    assert_eq!(next.len(), menu.len() - 1);
    assert!(find_by_id(&next, 3).is_none());
    assert_eq!(store.writes.get(), 1);
}

#[test]
fn remove_unknown_id_fails_without_writing() {
    let store = ScriptedStore::default();
    let err = service(&store)
        .remove_pizza(&default_menu(), 42)
        .unwrap_err();

    assert!(matches!(err, MenuError::NotFound(42)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn remove_surfaces_write_failure() {
    let store = ScriptedStore::default();
    store.fail_writes.set(true);

    let err = service(&store).remove_pizza(&default_menu(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[test]
fn toggle_surfaces_write_failure() {
    let store = ScriptedStore::default();
    store.fail_writes.set(true);

    let err = service(&store)
        .toggle_availability(&default_menu(), 1)
        .unwrap_err();
    assert!(matches!(err, MenuError::Persistence(_)));
    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[test]
fn failed_writes_leave_stored_catalog_untouched() {
    let raw = r#"[{"id":1,"name":"Custom","price":9.5,"available":true}]"#;
    let store = ScriptedStore::with_value(CATALOG_KEY, raw);
    let service = service(&store);
    let menu = service.load();
    store.fail_writes.set(true);

    assert!(service.add_pizza(&menu, "Another", 8.0).is_err());
    assert!(service.remove_pizza(&menu, 1).is_err());
    assert!(service.toggle_availability(&menu, 1).is_err());

    assert_eq!(store.stored().as_deref(), Some(raw));
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn stored_price_too_large_to_order_fails_without_panicking() {
    let raw = r#"[{"id":1,"name":"Gold","price":7e28,"available":true}]"#;
    let store = ScriptedStore::with_value(CATALOG_KEY, raw);
    let menu = service(&store).load();

    let err = create_order_item(&menu[0], 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn toggle_twice_restores_original_availability() {
    let store = ScriptedStore::default();
    let service = service(&store);
    let menu = default_menu();

    let once = service.toggle_availability(&menu, 2).unwrap();
    assert!(!find_by_id(&once, 2).unwrap().available);
    assert!(find_by_id(&once, 1).unwrap().available);

    let twice = service.toggle_availability(&once, 2).unwrap();
    assert_eq!(twice, menu);
    assert_eq!(store.writes.get(), 2);
}

#[test]
fn toggle_unknown_id_is_not_an_error_and_still_persists() {
    let store = ScriptedStore::default();
    let menu = default_menu();

    let next = service(&store).toggle_availability(&menu, 99).unwrap();

    assert_eq!(next, menu);
    assert_eq!(store.writes.get(), 1);
}

#[test]
fn catalog_survives_sqlite_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let service = MenuService::new(KvMenuRepository::new(SqliteKeyValueStore::new(&conn)));

    let menu = service.load();
    let menu = service.add_pizza(&menu, "Capricciosa", 14.0).unwrap();
    let menu = service.toggle_availability(&menu, 1).unwrap();
    let menu = service.remove_pizza(&menu, 2).unwrap();

    let reloaded = MenuService::new(KvMenuRepository::new(SqliteKeyValueStore::new(&conn))).load();
    assert_eq!(reloaded, menu);
    assert_eq!(reloaded.len(), 6);
    assert!(!find_by_id(&reloaded, 1).unwrap().available);
    assert_eq!(find_by_id(&reloaded, 7).unwrap().price, dec!(14.00));
}
