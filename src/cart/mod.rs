//! Cart
//!
//! The shopping cart shared by every page that sells food. Construct one per browsing session
//! and hand it to the views that need it.

use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::{
    menu::{MenuItem, MenuItemKey},
    pricing::{Price, PricingError, PricingPolicy, line_total},
};

pub mod customizations;
pub mod totals;

pub use customizations::{Choice, Customizations};
pub use totals::CartTotals;

new_key_type! {
    /// Line Item Key
    ///
    /// Keys are versioned, so the id of a removed line is never handed out again.
    pub struct LineItemKey;
}

/// One distinct (menu item, customizations) entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    key: LineItemKey,
    menu_item: MenuItemKey,
    name: String,
    customizations: Customizations,
    unit_price: Price,
    quantity: u32,
}

impl LineItem {
    /// Id of this line
    pub fn key(&self) -> LineItemKey {
        self.key
    }

    /// Menu item the line was added from
    pub fn menu_item(&self) -> MenuItemKey {
        self.menu_item
    }

    /// Name of the dish when it was added
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options chosen for the dish
    pub fn customizations(&self) -> &Customizations {
        &self.customizations
    }

    /// Price per unit, fixed when the line was created
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Number of units; always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the amount does not fit in minor units.
    pub fn line_total(&self) -> Result<Price, PricingError> {
        line_total(&self.unit_price, self.quantity)
    }
}

/// Read-only view of the cart handed to the rendering layer.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    /// Lines in the order they were first added
    pub items: Vec<LineItem>,

    /// Totals for those lines
    pub totals: CartTotals,
}

/// Shopping cart
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    ids: SlotMap<LineItemKey, ()>,
    policy: PricingPolicy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart using the site's standard pricing.
    pub fn new() -> Self {
        Self::with_policy(PricingPolicy::default())
    }

    /// Create an empty cart with a custom pricing policy.
    pub fn with_policy(policy: PricingPolicy) -> Self {
        Self {
            items: Vec::new(),
            ids: SlotMap::with_key(),
            policy,
        }
    }

    /// Add one unit of a dish.
    ///
    /// If a line for the same menu item with equal customizations exists its quantity goes up by
    /// one, otherwise a new line with quantity 1 is appended. Returns the id of the affected line.
    pub fn add_item(&mut self, item: &MenuItem, customizations: Customizations) -> LineItemKey {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.menu_item == item.key() && line.customizations == customizations)
        {
            line.quantity = line.quantity.saturating_add(1);

            debug!(
                line_item = ?line.key,
                menu_item = item.slug(),
                quantity = line.quantity,
                "merged into existing cart line"
            );

            return line.key;
        }

        let key = self.ids.insert(());

        debug!(
            line_item = ?key,
            menu_item = item.slug(),
            customizations = %customizations,
            "added cart line"
        );

        self.items.push(LineItem {
            key,
            menu_item: item.key(),
            name: item.name().to_string(),
            customizations,
            unit_price: item.price(),
            quantity: 1,
        });

        key
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, key: LineItemKey) -> Option<LineItem> {
        let Some(pos) = self.items.iter().position(|line| line.key == key) else {
            debug!(line_item = ?key, "remove ignored, no such cart line");
            return None;
        };

        self.ids.remove(key);

        debug!(line_item = ?key, "removed cart line");

        Some(self.items.remove(pos))
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are ignored.
    pub fn update_quantity(&mut self, key: LineItemKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(key);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(key) {
            line.quantity = quantity;

            debug!(line_item = ?key, quantity, "updated cart line quantity");
        } else {
            debug!(line_item = ?key, "update ignored, no such cart line");
        }
    }

    /// Add one unit to a line.
    pub fn increment(&mut self, key: LineItemKey) {
        if let Some(quantity) = self.get(key).map(LineItem::quantity) {
            self.update_quantity(key, i64::from(quantity) + 1);
        }
    }

    /// Take one unit off a line, removing it when it reaches zero.
    pub fn decrement(&mut self, key: LineItemKey) {
        if let Some(quantity) = self.get(key).map(LineItem::quantity) {
            self.update_quantity(key, i64::from(quantity) - 1);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.items.len(), "cleared cart");

        self.items.clear();
        self.ids.clear();
    }

    /// Subtotal, tax, delivery fee, total and item count for the current lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line is priced in a currency other than the policy's,
    /// or an amount overflows.
    pub fn totals(&self) -> Result<CartTotals, PricingError> {
        CartTotals::calculate(&self.items, &self.policy)
    }

    /// Lines and totals together.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals cannot be calculated.
    pub fn snapshot(&self) -> Result<CartSnapshot, PricingError> {
        Ok(CartSnapshot {
            items: self.items.clone(),
            totals: self.totals()?,
        })
    }

    /// Look up a line.
    pub fn get(&self, key: LineItemKey) -> Option<&LineItem> {
        self.items.iter().find(|line| line.key == key)
    }

    /// Iterate over lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Pricing policy the totals are computed with.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    fn line_mut(&mut self, key: LineItemKey) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| line.key == key)
    }
}
