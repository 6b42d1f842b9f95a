//! Pricing
//!
//! Money helpers shared by the cart and the menu, plus the [`PricingPolicy`] that decides tax and
//! delivery charges.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

/// A monetary amount in one of the supported ISO currencies.
pub type Price = Money<'static, Currency>;

/// Errors raised while parsing or combining prices.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Price string was not of the form `"AMOUNT CURRENCY"`.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Percentage string could not be parsed.
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Currency code not supported.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Minor-unit arithmetic overflowed.
    #[error("amount overflowed while calculating {0}")]
    Overflow(&'static str),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Policy file could not be read.
    #[error("Failed to read pricing policy: {0}")]
    Io(#[from] std::io::Error),

    /// Policy file was not valid YAML.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Tax, delivery fee and free delivery threshold applied to a cart.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    tax_rate: Decimal,
    free_delivery_threshold: Price,
    delivery_fee: Price,
}

impl Default for PricingPolicy {
    /// 8% tax; orders strictly over $25.00 deliver free, everything else pays $2.99.
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_delivery_threshold: Money::from_minor(2500, USD),
            delivery_fee: Money::from_minor(299, USD),
        }
    }
}

/// Pricing policy as written in YAML.
#[derive(Debug, Deserialize)]
struct PricingPolicyFile {
    tax_rate: String,
    free_delivery_threshold: String,
    delivery_fee: String,
}

impl PricingPolicy {
    /// Create a policy from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::CurrencyMismatch`] if the threshold and fee use different currencies.
    pub fn new(
        tax_rate: Percentage,
        free_delivery_threshold: Price,
        delivery_fee: Price,
    ) -> Result<Self, PricingError> {
        ensure_same_currency(free_delivery_threshold.currency(), delivery_fee.currency())?;

        Ok(Self {
            tax_rate: tax_rate * Decimal::ONE,
            free_delivery_threshold,
            delivery_fee,
        })
    }

    /// Parse a policy from a YAML document.
    ///
    /// ```yaml
    /// tax_rate: "8%"
    /// free_delivery_threshold: "25.00 USD"
    /// delivery_fee: "2.99 USD"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any value fails to parse.
    pub fn from_yaml_str(contents: &str) -> Result<Self, PricingError> {
        let file: PricingPolicyFile = serde_norway::from_str(contents)?;

        Self::new(
            parse_percentage(&file.tax_rate)?,
            parse_price(&file.free_delivery_threshold)?,
            parse_price(&file.delivery_fee)?,
        )
    }

    /// Load a policy from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Tax rate as a fractional percentage (0.08 for 8%).
    pub fn tax_rate(&self) -> Percentage {
        Percentage::from(self.tax_rate)
    }

    /// Subtotals strictly above this amount deliver free.
    pub fn free_delivery_threshold(&self) -> Price {
        self.free_delivery_threshold
    }

    /// Flat delivery fee charged at or below the threshold.
    pub fn delivery_fee(&self) -> Price {
        self.delivery_fee
    }

    /// Currency the policy's amounts are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.delivery_fee.currency()
    }

    /// Tax owed on a subtotal, rounded to the nearest minor unit (half away from zero).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the result cannot be represented in minor units.
    pub fn tax_on(&self, subtotal: &Price) -> Result<Price, PricingError> {
        let minor = fraction_of_minor(self.tax_rate, subtotal.to_minor_units())?;

        Ok(Money::from_minor(minor, subtotal.currency()))
    }

    /// Delivery fee owed for a subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::CurrencyMismatch`] if the subtotal is not in the policy currency.
    pub fn delivery_fee_for(&self, subtotal: &Price) -> Result<Price, PricingError> {
        ensure_same_currency(self.currency(), subtotal.currency())?;

        if subtotal.to_minor_units() > self.free_delivery_threshold.to_minor_units() {
            Ok(Money::from_minor(0, self.currency()))
        } else {
            Ok(self.delivery_fee)
        }
    }
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total(unit_price: &Price, quantity: u32) -> Result<Price, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow("line total"))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum a sequence of prices, all of which must be in `currency`.
///
/// Returns zero in `currency` for an empty sequence.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: a price is not in `currency`.
/// - [`PricingError::Overflow`]: the sum does not fit in minor units.
pub fn sum_prices(
    prices: impl IntoIterator<Item = Price>,
    currency: &'static Currency,
) -> Result<Price, PricingError> {
    let minor = prices.into_iter().try_fold(0_i64, |acc, price| {
        ensure_same_currency(currency, price.currency())?;

        acc.checked_add(price.to_minor_units())
            .ok_or(PricingError::Overflow("sum"))
    })?;

    Ok(Money::from_minor(minor, currency))
}

/// Return `CurrencyMismatch` unless both currencies are the same.
///
/// # Errors
///
/// Returns [`PricingError::CurrencyMismatch`] when `found` differs from `expected`.
pub fn ensure_same_currency(
    expected: &'static Currency,
    found: &'static Currency,
) -> Result<(), PricingError> {
    if expected == found {
        Ok(())
    } else {
        Err(PricingError::CurrencyMismatch(
            expected.iso_alpha_code,
            found.iso_alpha_code,
        ))
    }
}

/// Apply a fraction to an amount in minor units, rounding half away from zero.
fn fraction_of_minor(fraction: Decimal, minor: i64) -> Result<i64, PricingError> {
    fraction
        .checked_mul(Decimal::from(minor))
        .map(|applied| applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or(PricingError::Overflow("tax"))
}

/// Parse price string (e.g., "2.99 USD") into a [`Price`].
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Price, PricingError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(PricingError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PricingError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(PricingError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse percentage string (e.g., "8%" or "0.08") into a [`Percentage`].
///
/// # Errors
///
/// Returns [`PricingError::InvalidPercentage`] if the string is not a decimal number.
pub fn parse_percentage(s: &str) -> Result<Percentage, PricingError> {
    let trimmed = s.trim();

    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(points) => (points.trim(), Decimal::ONE_HUNDRED),
        None => (trimmed, Decimal::ONE),
    };

    let value = number
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidPercentage(s.to_string()))?;

    value
        .checked_div(scale)
        .map(Percentage::from)
        .ok_or_else(|| PricingError::InvalidPercentage(s.to_string()))
}
