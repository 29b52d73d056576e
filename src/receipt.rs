//! Receipt
//!
//! Renders cart lines and order totals as a console table.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartLine, pricing::OrderSummary};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Output could not be written
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Cart lines plus their order summary.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    lines: &'a [CartLine],
    summary: OrderSummary<'a>,
}

impl<'a> Receipt<'a> {
    /// A receipt for `lines` totalled by `summary`.
    pub fn new(lines: &'a [CartLine], summary: OrderSummary<'a>) -> Self {
        Self { lines, summary }
    }

    /// Write the receipt table and totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            writeln!(out, "Your cart is empty.")?;

            return Ok(());
        }

        let currency = self.summary.subtotal.currency();
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.product.name.clone(),
                line.quantity.to_string(),
                money(line.product.price, currency),
                money(line.line_total(), currency),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());
        table.modify(Rows::first(), Color::BOLD);

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let shipping = if self.summary.ships_free() {
            "Free".to_string()
        } else {
            self.summary.shipping.to_string()
        };

        let rows = [
            ("Subtotal:", self.summary.subtotal.to_string()),
            ("Shipping:", shipping),
            ("Tax:", self.summary.tax.to_string()),
            ("Total:", self.summary.total.to_string()),
        ];

        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, "{label:>10}  {value:>value_width$}")?;
        }

        if let Some(remaining) = self.summary.free_shipping_remaining {
            writeln!(out, "\nAdd {remaining} more to qualify for free shipping.")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

fn money(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
