//! Checkout orchestration service.
//!
//! The one flow that touches orders and the loyalty ledger together:
//! place the order from the cart, apply an optional points redemption
//! against its total, then earn points on the amount actually paid. The
//! final payable amount is handed back for the caller to take to the
//! payment gateway; no gateway call happens here.

use std::sync::Arc;

use rust_decimal::Decimal;
use shinwari::loyalty::redemption_points;
use tracing::info;

use crate::domain::{
    accounts::models::AccountUuid,
    checkout::{
        errors::CheckoutError,
        models::{CheckoutOutcome, CheckoutRequest},
    },
    loyalty::{models::Redemption, service::LoyaltyService},
    orders::service::OrdersService,
};

#[derive(Clone)]
pub struct CheckoutService {
    orders: Arc<dyn OrdersService>,
    loyalty: Arc<dyn LoyaltyService>,
}

impl CheckoutService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, loyalty: Arc<dyn LoyaltyService>) -> Self {
        Self { orders, loyalty }
    }

    /// Runs the checkout flow for an account.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidRedemptionAmount`]: a negative points
    ///   request; nothing is persisted.
    /// - [`CheckoutError::Orders`]: the cart was empty or order persistence
    ///   failed.
    /// - [`CheckoutError::Loyalty`]: the redemption exceeded the balance or
    ///   the ledger rejected a mutation.
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(account_uuid = %account, order_uuid = %request.order.uuid),
        err
    )]
    pub async fn checkout(
        &self,
        account: AccountUuid,
        request: CheckoutRequest,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let points_requested = match request.points_requested {
            Some(raw) => {
                redemption_points(raw).or(Err(CheckoutError::InvalidRedemptionAmount))?
            }
            None => 0,
        };

        let order = self.orders.place_order(account, request.order).await?;
        let subtotal = order.total_price;

        let redemption = if points_requested > 0 {
            self.loyalty
                .apply_redemption(account, points_requested, subtotal)
                .await?
        } else {
            Redemption {
                points_applied: 0,
                discount: Decimal::ZERO,
            }
        };

        let payable = subtotal - redemption.discount;

        let points_earned = self
            .loyalty
            .award_points_for_order(account, order.uuid, payable)
            .await?
            .map_or(0, |transaction| transaction.points);

        info!(
            order_uuid = %order.uuid,
            %payable,
            points_applied = redemption.points_applied,
            points_earned,
            "checkout complete"
        );

        Ok(CheckoutOutcome {
            order,
            subtotal,
            discount: redemption.discount,
            points_applied: redemption.points_applied,
            payable,
            points_earned,
        })
    }
}
