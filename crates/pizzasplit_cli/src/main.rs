//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pizzasplit_core` linkage without the Flutter shell.
//! - Print the default menu and one sample split with deterministic output.

use pizzasplit_core::{
    default_menu, format_currency, summarize, Order, OrderDraft, OrderError, PizzaType,
};

fn main() {
    println!("pizzasplit_core ping={}", pizzasplit_core::ping());
    println!("pizzasplit_core version={}", pizzasplit_core::core_version());

    let menu = default_menu();
    for pizza in &menu {
        println!(
            "{:<3} {:<20} {:>8}",
            pizza.id,
            pizza.name,
            format_currency(pizza.price)
        );
    }

    match sample_split(&menu) {
        Ok(order) => println!("{}", summarize(&order)),
        Err(err) => eprintln!("sample split failed: {err}"),
    }
}

fn sample_split(menu: &[PizzaType]) -> Result<Order, OrderError> {
    let mut draft = OrderDraft::new();
    draft.add(&menu[0], 2)?;
    draft.add(&menu[1], 1)?;
    draft.split(3)
}
