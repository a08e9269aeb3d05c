//! Checkout Models

use rust_decimal::Decimal;
use shinwari::{
    pricing::PricingError,
    receipt::{Receipt, ReceiptLine},
};

use crate::domain::orders::models::{NewOrder, Order};

/// Checkout Request Model
///
/// `points_requested` is raw form input; it is validated before anything is
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub order: NewOrder,
    pub points_requested: Option<i64>,
}

/// Checkout Outcome Model
///
/// `payable` is what the (external) payment gateway should charge:
/// `subtotal − discount`, never negative.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub points_applied: u64,
    pub payable: Decimal,
    pub points_earned: u64,
}

impl CheckoutOutcome {
    /// Renders the order confirmation receipt.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidQuantity`] if an order item carries a
    /// zero quantity, which the storage constraints rule out.
    pub fn receipt(&self) -> Result<Receipt, PricingError> {
        let lines = self
            .order
            .items
            .iter()
            .map(|item| {
                Ok(ReceiptLine {
                    name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.price,
                    total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Receipt {
            lines,
            subtotal: self.subtotal,
            discount: self.discount,
            payable: self.payable,
            points_redeemed: self.points_applied,
            points_earned: self.points_earned,
        })
    }
}
