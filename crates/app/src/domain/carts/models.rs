//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use shinwari::pricing::{CartLine, PricingError, ProductPricing};

use crate::{
    domain::{accounts::models::AccountUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// `total_price` and `total_items` are computed from the live product
/// prices when the cart is read; they are never stored.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub account_uuid: AccountUuid,
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total_price: Decimal,
    pub created_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub added_at: Timestamp,
}

impl CartItem {
    /// The pricing view used for totalling.
    #[must_use]
    pub fn pricing(&self) -> ProductPricing {
        ProductPricing {
            price: self.price,
            discount_price: self.discount_price,
        }
    }

    /// The per-unit price the customer pays.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.pricing().effective_price()
    }

    /// The line total for this item.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidQuantity`] when the quantity is zero,
    /// which the storage constraints rule out for persisted rows.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        self.as_cart_line().total()
    }

    pub(crate) fn as_cart_line(&self) -> CartLine {
        CartLine::new(self.pricing(), self.quantity)
    }
}

/// Add Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct AddCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
