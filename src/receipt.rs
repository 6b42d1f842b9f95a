//! Receipt
//!
//! Terminal rendering of a cart and of a confirmed reservation.

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    booking::{Confirmation, schedule::TABLE_HOLD_MINUTES},
    cart::{Cart, CartTotals},
    pricing::PricingError,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating cart totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the cart as a table of line items followed by the order summary.
///
/// # Errors
///
/// Returns an error if the totals can't be calculated or the output can't be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), ReceiptError> {
    let totals = cart.totals()?;

    if cart.is_empty() {
        writeln!(out, "\nYour cart is empty\n").map_err(|_err| ReceiptError::IO)?;
    } else {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Options", "Price", "Total"]);

        for item in cart.iter() {
            let options = item
                .customizations()
                .iter()
                .map(|choice| format!("{}: {}", choice.group(), choice.option()))
                .collect::<SmallVec<[String; 4]>>()
                .join(", ");

            builder.push_record([
                item.quantity().to_string(),
                item.name().to_string(),
                options,
                item.unit_price().to_string(),
                item.line_total()?.to_string(),
            ]);
        }

        write_table(&mut out, builder, Some(Columns::new(3..5)))?;
    }

    write_cart_summary(&mut out, cart, &totals)
}

fn write_cart_summary(
    out: &mut impl io::Write,
    cart: &Cart,
    totals: &CartTotals,
) -> Result<(), ReceiptError> {
    let tax_points = (cart.policy().tax_rate() * Decimal::ONE_HUNDRED).normalize();

    let delivery = if totals.has_free_delivery() {
        "FREE".to_string()
    } else {
        totals.delivery_fee().to_string()
    };

    let lines = [
        (" Subtotal:".to_string(), format!("{}  ", totals.subtotal())),
        (format!(" Tax ({tax_points}%):"), format!("{}  ", totals.tax())),
        (" Delivery:".to_string(), format!("{delivery}  ")),
        (
            " \x1b[1mTotal:\x1b[0m".to_string(),
            format!("\x1b[1m{}  \x1b[0m", totals.total()),
        ),
    ];

    let label_width = lines
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = lines
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &lines {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    if !totals.has_free_delivery() {
        writeln!(
            out,
            "\n Free delivery on orders over {}",
            cart.policy().free_delivery_threshold()
        )
        .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Writes a confirmed reservation and the house policies that apply to it.
///
/// # Errors
///
/// Returns an error if the output can't be written.
pub fn write_confirmation(
    mut out: impl io::Write,
    confirmation: &Confirmation,
) -> Result<(), ReceiptError> {
    let booking = &confirmation.booking;
    let mut builder = Builder::default();

    builder.push_record(["Reservation", ""]);
    builder.push_record([
        "Date".to_string(),
        booking.date.strftime("%A, %B %-d, %Y").to_string(),
    ]);
    builder.push_record(["Time".to_string(), booking.time.to_string()]);
    builder.push_record(["Party Size".to_string(), booking.party_size.to_string()]);
    builder.push_record(["Table".to_string(), booking.table.to_string()]);
    builder.push_record(["Name".to_string(), booking.contact.name.clone()]);
    builder.push_record(["Email".to_string(), booking.contact.email.clone()]);
    builder.push_record(["Phone".to_string(), booking.contact.phone.clone()]);

    if let Some(requests) = &booking.special_requests {
        builder.push_record(["Special Requests".to_string(), requests.clone()]);
    }

    write_table(&mut out, builder, None)?;

    writeln!(out, " {}", confirmation.message).map_err(|_err| ReceiptError::IO)?;
    writeln!(
        out,
        " Tables are held for {TABLE_HOLD_MINUTES} minutes past the reservation time."
    )
    .map_err(|_err| ReceiptError::IO)?;

    if booking.party_size.requires_card_hold() {
        writeln!(out, " Parties of this size require a credit card to hold the table.")
            .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Option<Columns<std::ops::Range<usize>>>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);

    if let Some(columns) = right_aligned {
        table.modify(columns, Alignment::right());
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}
