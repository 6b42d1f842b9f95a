//! Nonna Rosa
//!
//! Ordering and reservation core for Nonna Rosa's Pizzeria: the menu catalog, a shopping cart
//! with tax and delivery pricing, and a three-step table reservation wizard.

pub mod booking;
pub mod cart;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod tags;
pub mod utils;
