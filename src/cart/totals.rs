//! Cart Totals

use crate::{
    cart::LineItem,
    pricing::{Price, PricingError, PricingPolicy, sum_prices},
};

/// Amounts shown in the cart summary, derived from the current line items.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    subtotal: Price,
    tax: Price,
    delivery_fee: Price,
    total: Price,
    item_count: u64,
}

impl CartTotals {
    /// Derive the totals for a set of line items under a pricing policy.
    ///
    /// # Errors
    ///
    /// - [`PricingError::CurrencyMismatch`]: a line item is not priced in the policy currency.
    /// - [`PricingError::Overflow`]: an amount does not fit in minor units.
    pub fn calculate<'a>(
        items: impl IntoIterator<Item = &'a LineItem>,
        policy: &PricingPolicy,
    ) -> Result<Self, PricingError> {
        let currency = policy.currency();
        let mut line_totals = Vec::new();
        let mut item_count = 0_u64;

        for item in items {
            line_totals.push(item.line_total()?);
            item_count = item_count.saturating_add(u64::from(item.quantity()));
        }

        let subtotal = sum_prices(line_totals, currency)?;
        let tax = policy.tax_on(&subtotal)?;
        let delivery_fee = policy.delivery_fee_for(&subtotal)?;
        let total = sum_prices([subtotal, tax, delivery_fee], currency)?;

        Ok(Self {
            subtotal,
            tax,
            delivery_fee,
            total,
            item_count,
        })
    }

    /// Sum of unit price times quantity over every line
    pub fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Tax on the subtotal
    pub fn tax(&self) -> Price {
        self.tax
    }

    /// Delivery fee; zero once the subtotal clears the free delivery threshold
    pub fn delivery_fee(&self) -> Price {
        self.delivery_fee
    }

    /// Subtotal plus tax plus delivery
    pub fn total(&self) -> Price {
        self.total
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Returns true if delivery is free at this subtotal.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.to_minor_units() == 0
    }
}
