//! Money helpers

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Rounds a monetary amount to two decimal places, half-up.
///
/// Rounding an already two-place value is a no-op, so re-rounding is safe
/// wherever a total passes through more than one calculation.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as Pakistani rupees, e.g. `₨1,350.00`.
#[must_use]
pub fn format_rupees(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::PKR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(12344, 3)), Decimal::new(1234, 2));
    }

    #[test]
    fn rounding_two_place_value_is_noop() {
        let amount = Decimal::new(157000, 2);

        assert_eq!(round_money(amount), amount);
    }

    #[test]
    fn formats_with_currency_symbol() {
        let formatted = format_rupees(Decimal::new(135000, 2));

        assert!(
            formatted.contains("1,350.00"),
            "expected grouped amount, got {formatted}"
        );
    }
}
