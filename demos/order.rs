//! Order Example
//!
//! This example fills a cart from a menu fixture, prints the receipt, then walks the reservation
//! wizard through to a confirmation.
//!
//! Use `-m` to load a menu fixture set by name
//! Use `-p` to load a pricing policy YAML file
//! Use `-g` to set the number of guests
//!
//! Set `RUST_LOG=nonna_rosa=debug` to see cart and wizard transitions.

use std::io;

use anyhow::Result;
use clap::Parser;
use jiff::Zoned;
use tracing_subscriber::EnvFilter;

use nonna_rosa::{
    booking::{BookingWizard, TableType, TimeSlot, schedule::available_dates},
    cart::{Cart, Customizations},
    menu::Menu,
    pricing::PricingPolicy,
    receipt::{write_cart, write_confirmation},
    tags::Tags,
    utils::DemoArgs,
};

/// Order Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nonna_rosa=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = DemoArgs::parse();

    let menu = Menu::from_set("fixtures", &args.menu)?;

    let policy = match args.policy.as_deref() {
        Some(path) => PricingPolicy::load(path)?,
        None => PricingPolicy::default(),
    };

    let mut cart = Cart::with_policy(policy);

    let popular = Tags::from_strs(&["popular"]);

    for item in menu.filter("pizzas", &popular) {
        cart.add_item(item, Customizations::none().with("size", "large"));
    }

    if let Some(dessert) = menu.category_items("desserts").next() {
        let key = cart.add_item(dessert, Customizations::none());
        cart.increment(key);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_cart(&mut handle, &cart)?;

    let mut wizard = BookingWizard::new();

    let today = Zoned::now().date();

    if let Some(date) = available_dates(today).nth(2) {
        wizard.set_date(date);
    }

    if let Some(slot) = TimeSlot::ALL.last() {
        wizard.set_time(*slot);
    }

    wizard.advance()?;

    wizard.set_party_size(args.guests);
    wizard.set_table(TableType::Window);
    wizard.set_special_requests("Window seat if possible");
    wizard.advance()?;

    wizard.set_name("Maria Rossi");
    wizard.set_email("maria@example.com");
    wizard.set_phone("(718) 555-0100");

    let confirmation = wizard.submit()?;

    write_confirmation(&mut handle, &confirmation)?;

    println!("Step: {}", wizard.step().title());

    Ok(())
}
