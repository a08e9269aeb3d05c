//! Order receipts
//!
//! Plain-text rendering of a confirmed order: priced lines, subtotal,
//! loyalty discount, payable total and points movements. Rendering only —
//! the amounts are computed by [`crate::pricing`] and [`crate::loyalty`]
//! before they get here.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::format_rupees;

/// One priced line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Product name as sold.
    pub name: String,

    /// Units sold.
    pub quantity: u32,

    /// Unit price at the time of the order.
    pub unit_price: Decimal,

    /// Line total.
    pub total: Decimal,
}

/// A rendered order confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Priced lines, in cart order.
    pub lines: Vec<ReceiptLine>,

    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Loyalty discount applied at checkout.
    pub discount: Decimal,

    /// Amount due after the discount.
    pub payable: Decimal,

    /// Points redeemed against this order.
    pub points_redeemed: u64,

    /// Points earned on the paid amount.
    pub points_earned: u64,
}

impl Display for Receipt {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for line in &self.lines {
            writeln!(
                f,
                "{:>3} x {:<28} {:>12}",
                line.quantity,
                line.name,
                format_rupees(line.total)
            )?;
        }

        writeln!(f, "{:>49}", "-".repeat(14))?;
        writeln!(f, "{:<34} {:>14}", "Subtotal", format_rupees(self.subtotal))?;

        if self.points_redeemed > 0 {
            writeln!(
                f,
                "{:<34} {:>14}",
                format!("Loyalty ({} pts)", self.points_redeemed),
                format!("-{}", format_rupees(self.discount))
            )?;
        }

        writeln!(f, "{:<34} {:>14}", "Payable", format_rupees(self.payable))?;

        if self.points_earned > 0 {
            writeln!(f, "Points earned: {}", self.points_earned)?;
        }

        Ok(())
    }
}
