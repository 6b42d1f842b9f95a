//! Integration tests for cart pricing against a small test menu.
//!
//! Prices are USD with the house policy: 8% tax, free delivery strictly above $25.00, otherwise
//! a $2.99 delivery fee.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use nonna_rosa::{
    cart::{Cart, Customizations},
    menu::{Menu, NewMenuItem},
    pricing::PricingPolicy,
    tags::Tags,
};

fn test_menu() -> TestResult<Menu> {
    let mut menu = Menu::new(USD);

    menu.add_category("pizzas", "Pizzas")?
        .add_category("appetizers", "Appetizers")?;

    for (slug, name, category, minor) in [
        ("pizza", "Pizza", "pizzas", 1600),
        ("garlic-knots", "Garlic Knots", "appetizers", 800),
        ("side", "Side", "appetizers", 1000),
        ("half-pizza", "Half Pizza", "pizzas", 1250),
    ] {
        menu.add_item(
            slug,
            NewMenuItem {
                name: name.to_string(),
                description: String::new(),
                price: Money::from_minor(minor, USD),
                category: category.to_string(),
                tags: Tags::empty(),
            },
        )?;
    }

    Ok(menu)
}

#[test]
fn free_delivery_over_threshold() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    let pizza = cart.add_item(menu.item("pizza")?, Customizations::none());
    cart.update_quantity(pizza, 2);
    cart.add_item(menu.item("garlic-knots")?, Customizations::none());

    let totals = cart.totals()?;

    assert_eq!(totals.subtotal(), Money::from_minor(4000, USD));
    assert_eq!(totals.tax(), Money::from_minor(320, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(0, USD));
    assert_eq!(totals.total(), Money::from_minor(4320, USD));
    assert_eq!(totals.item_count(), 3);
    assert!(totals.has_free_delivery());

    Ok(())
}

#[test]
fn delivery_fee_under_threshold() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    cart.add_item(menu.item("side")?, Customizations::none());

    let totals = cart.totals()?;

    assert_eq!(totals.subtotal(), Money::from_minor(1000, USD));
    assert_eq!(totals.tax(), Money::from_minor(80, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(299, USD));
    assert_eq!(totals.total(), Money::from_minor(1379, USD));

    Ok(())
}

#[test]
fn subtotal_exactly_at_threshold_pays_delivery() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    let half = cart.add_item(menu.item("half-pizza")?, Customizations::none());
    cart.increment(half);

    let totals = cart.totals()?;

    assert_eq!(totals.subtotal(), Money::from_minor(2500, USD));
    assert_eq!(totals.delivery_fee(), Money::from_minor(299, USD));
    assert_eq!(totals.tax(), Money::from_minor(200, USD));
    assert_eq!(totals.total(), Money::from_minor(2999, USD));

    Ok(())
}

#[test]
fn empty_cart_charges_delivery_only() -> TestResult {
    let totals = Cart::new().totals()?;

    assert_eq!(totals.subtotal(), Money::from_minor(0, USD));
    assert_eq!(totals.tax(), Money::from_minor(0, USD));
    assert_eq!(totals.total(), Money::from_minor(299, USD));
    assert_eq!(totals.item_count(), 0);

    Ok(())
}

#[test]
fn same_item_with_different_options_gets_separate_lines() -> TestResult {
    let menu = test_menu()?;
    let pizza = menu.item("pizza")?;
    let mut cart = Cart::new();

    let large = cart.add_item(pizza, Customizations::none().with("size", "large"));
    let small = cart.add_item(pizza, Customizations::none().with("size", "small"));
    let large_again = cart.add_item(pizza, Customizations::none().with("size", "large"));

    assert_ne!(large, small);
    assert_eq!(large, large_again);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get(large).map(|line| line.quantity()), Some(2));
    assert_eq!(cart.item_count(), 3);

    Ok(())
}

#[test]
fn option_order_does_not_split_lines() -> TestResult {
    let menu = test_menu()?;
    let pizza = menu.item("pizza")?;
    let mut cart = Cart::new();

    let first = cart.add_item(
        pizza,
        Customizations::from_pairs([("size", "large"), ("crust", "thin")]),
    );
    let second = cart.add_item(
        pizza,
        Customizations::from_pairs([("crust", "thin"), ("size", "large")]),
    );

    assert_eq!(first, second);
    assert_eq!(cart.len(), 1);

    Ok(())
}

#[test]
fn update_to_zero_matches_remove() -> TestResult {
    let menu = test_menu()?;

    let mut updated = Cart::new();
    let mut removed = Cart::new();

    for cart in [&mut updated, &mut removed] {
        cart.add_item(menu.item("pizza")?, Customizations::none());
    }

    let knots_updated = updated.add_item(menu.item("garlic-knots")?, Customizations::none());
    let knots_removed = removed.add_item(menu.item("garlic-knots")?, Customizations::none());

    updated.update_quantity(knots_updated, 0);
    removed.remove_item(knots_removed);

    assert_eq!(updated.totals()?, removed.totals()?);
    assert_eq!(updated.len(), 1);
    assert!(updated.get(knots_updated).is_none());

    Ok(())
}

#[test]
fn negative_quantity_removes_line() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    let pizza = cart.add_item(menu.item("pizza")?, Customizations::none());
    cart.update_quantity(pizza, -3);

    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn removed_line_ids_are_not_reused() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    let first = cart.add_item(menu.item("pizza")?, Customizations::none());
    cart.remove_item(first);

    let second = cart.add_item(menu.item("pizza")?, Customizations::none());

    assert_ne!(first, second);

    cart.update_quantity(first, 5);
    assert_eq!(cart.get(second).map(|line| line.quantity()), Some(1));

    Ok(())
}

#[test]
fn policy_from_fixture_prices_cart() -> TestResult {
    let menu = Menu::bundled()?;
    let policy = PricingPolicy::load("fixtures/pricing/default.yml")?;
    let mut cart = Cart::with_policy(policy);

    cart.add_item(menu.item("brooklyn-margherita")?, Customizations::none());

    let snapshot = cart.snapshot()?;

    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.totals.subtotal(), Money::from_minor(1600, USD));
    assert_eq!(snapshot.totals.tax(), Money::from_minor(128, USD));
    assert_eq!(snapshot.totals.total(), Money::from_minor(2027, USD));

    Ok(())
}

#[test]
fn clear_empties_cart() -> TestResult {
    let menu = test_menu()?;
    let mut cart = Cart::new();

    cart.add_item(menu.item("pizza")?, Customizations::none());
    cart.add_item(menu.item("side")?, Customizations::none());
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);

    Ok(())
}
