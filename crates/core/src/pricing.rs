//! Order pricing
//!
//! The single authority for cart and order totals: every place a price is
//! displayed or persisted goes through these functions so the rounding
//! behaviour cannot drift between call sites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::round_money;

/// Errors that can occur while totalling cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line quantity was zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// The priced view of a product: its list price and optional promotional price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// List price.
    pub price: Decimal,

    /// Promotional price, when one is set.
    pub discount_price: Option<Decimal>,
}

impl ProductPricing {
    /// Creates a pricing view from a list price alone.
    #[must_use]
    pub const fn new(price: Decimal) -> Self {
        Self {
            price,
            discount_price: None,
        }
    }

    /// Creates a pricing view with a promotional price.
    #[must_use]
    pub const fn discounted(price: Decimal, discount_price: Decimal) -> Self {
        Self {
            price,
            discount_price: Some(discount_price),
        }
    }

    /// The price the customer pays: the promotional price when present, the
    /// list price otherwise, rounded half-up to two places.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        round_money(self.discount_price.unwrap_or(self.price))
    }
}

/// One cart line: a priced product at a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Pricing of the product on this line.
    pub pricing: ProductPricing,

    /// Number of units. Must be at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Creates a cart line.
    #[must_use]
    pub const fn new(pricing: ProductPricing, quantity: u32) -> Self {
        Self { pricing, quantity }
    }

    /// The line total: effective price × quantity, rounded half-up to two
    /// places.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidQuantity`]: the quantity is zero.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        line_total(&self.pricing, self.quantity)
    }
}

/// Calculates the total for `quantity` units of a product.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`]: `quantity` is zero.
pub fn line_total(pricing: &ProductPricing, quantity: u32) -> Result<Decimal, PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity);
    }

    Ok(round_money(
        pricing.effective_price() * Decimal::from(quantity),
    ))
}

/// Calculates the total of a cart.
///
/// Each line is rounded once and the final sum is rounded once; an empty
/// cart totals zero. Rejecting checkout on an empty cart is the order
/// flow's responsibility, not a pricing concern.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`]: a line has a zero quantity.
pub fn cart_total(lines: &[CartLine]) -> Result<Decimal, PricingError> {
    let sum = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| Ok(acc + line.total()?))?;

    Ok(round_money(sum))
}
