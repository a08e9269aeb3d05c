//! Loyalty points arithmetic
//!
//! Conversions between money and points. The rates live in a
//! [`LoyaltyPolicy`] built from configuration; nothing here hard-codes a
//! rate at a call site. Balance enforcement (whether an account *has* the
//! points) belongs to the ledger that owns the balances, not to this module.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::round_money;

/// Errors for loyalty conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoyaltyError {
    /// A points request was negative.
    #[error("points must be a non-negative integer")]
    InvalidRedemptionAmount,
}

/// Conversion rates between money and loyalty points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyPolicy {
    /// Points earned per whole currency unit paid.
    pub earn_rate: Decimal,

    /// Currency value of a single redeemed point.
    pub redeem_rate: Decimal,
}

impl Default for LoyaltyPolicy {
    /// One point per rupee paid; one rupee per redeemed point.
    fn default() -> Self {
        Self {
            earn_rate: Decimal::ONE,
            redeem_rate: Decimal::ONE,
        }
    }
}

impl LoyaltyPolicy {
    /// Points earned for a paid amount: ⌊amount × earn rate⌋.
    ///
    /// Zero and negative amounts earn nothing.
    #[must_use]
    pub fn points_for_amount(&self, amount: Decimal) -> u64 {
        if amount <= Decimal::ZERO {
            return 0;
        }

        self.earn_rate
            .checked_mul(amount)
            .and_then(|points| points.floor().to_u64())
            .unwrap_or(0)
    }

    /// Monetary discount for redeeming `points`, rounded half-up to two
    /// places.
    #[must_use]
    pub fn discount_for_points(&self, points: u64) -> Decimal {
        Decimal::from(points)
            .checked_mul(self.redeem_rate)
            .map_or(Decimal::MAX, round_money)
    }

    /// The largest number of points whose discount stays within
    /// `order_total`.
    #[must_use]
    pub fn max_points_for_total(&self, order_total: Decimal) -> u64 {
        if order_total <= Decimal::ZERO || self.redeem_rate <= Decimal::ZERO {
            return 0;
        }

        (order_total / self.redeem_rate)
            .floor()
            .to_u64()
            .unwrap_or(0)
    }

    /// Clamps a redemption request so the discount never exceeds
    /// `order_total`, returning the points to apply and the resulting
    /// discount.
    ///
    /// The returned discount is always ≤ `order_total`, whatever was
    /// requested.
    #[must_use]
    pub fn clamp_redemption(&self, points_requested: u64, order_total: Decimal) -> (u64, Decimal) {
        let points = points_requested.min(self.max_points_for_total(order_total));

        (points, self.discount_for_points(points))
    }
}

/// Validates a raw points request from an untyped boundary (form input,
/// CLI argument).
///
/// # Errors
///
/// - [`LoyaltyError::InvalidRedemptionAmount`]: the request is negative.
pub fn redemption_points(raw: i64) -> Result<u64, LoyaltyError> {
    u64::try_from(raw).or(Err(LoyaltyError::InvalidRedemptionAmount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rs(major: i64) -> Decimal {
        Decimal::new(major * 100, 2)
    }

    #[test]
    fn default_policy_is_one_to_one() {
        let policy = LoyaltyPolicy::default();

        assert_eq!(policy.points_for_amount(rs(250)), 250);
        assert_eq!(policy.discount_for_points(250), rs(250));
    }

    #[test]
    fn fractional_amounts_floor_to_whole_points() {
        let policy = LoyaltyPolicy::default();

        assert_eq!(policy.points_for_amount(Decimal::new(24999, 2)), 249);
    }

    #[test]
    fn zero_and_negative_amounts_earn_nothing() {
        let policy = LoyaltyPolicy::default();

        assert_eq!(policy.points_for_amount(Decimal::ZERO), 0);
        assert_eq!(policy.points_for_amount(rs(-10)), 0);
    }

    #[test]
    fn clamp_caps_discount_at_order_total() {
        let policy = LoyaltyPolicy::default();

        let (points, discount) = policy.clamp_redemption(150, rs(80));

        assert_eq!(points, 80);
        assert_eq!(discount, rs(80));
    }

    #[test]
    fn clamp_leaves_small_requests_alone() {
        let policy = LoyaltyPolicy::default();

        let (points, discount) = policy.clamp_redemption(30, rs(80));

        assert_eq!(points, 30);
        assert_eq!(discount, rs(30));
    }

    #[test]
    fn clamp_never_exceeds_total_under_fractional_rate() {
        let policy = LoyaltyPolicy {
            earn_rate: Decimal::ONE,
            redeem_rate: Decimal::new(75, 2),
        };

        let (points, discount) = policy.clamp_redemption(u64::MAX, rs(100));

        assert!(discount <= rs(100), "discount {discount} exceeds total");
        assert_eq!(points, 133);
    }

    #[test]
    fn clamp_against_zero_total_applies_nothing() {
        let policy = LoyaltyPolicy::default();

        let (points, discount) = policy.clamp_redemption(50, Decimal::ZERO);

        assert_eq!(points, 0);
        assert_eq!(discount, Decimal::ZERO);
    }

    #[test]
    fn redemption_points_rejects_negative_input() {
        assert!(matches!(
            redemption_points(-1),
            Err(LoyaltyError::InvalidRedemptionAmount)
        ));
    }

    #[test]
    fn redemption_points_accepts_zero_and_positive_input() {
        assert_eq!(redemption_points(0), Ok(0));
        assert_eq!(redemption_points(150), Ok(150));
    }
}
