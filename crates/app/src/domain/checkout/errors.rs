//! Checkout errors.

use thiserror::Error;

use crate::domain::{loyalty::errors::LoyaltyServiceError, orders::errors::OrdersServiceError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("points must be a non-negative integer")]
    InvalidRedemptionAmount,

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Loyalty(#[from] LoyaltyServiceError),
}
