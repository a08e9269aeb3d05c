//! Application configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use shinwari::loyalty::LoyaltyPolicy;

/// Loyalty conversion rates as configuration.
///
/// Both rates default to 1 (one point per rupee paid, one rupee per
/// redeemed point); deployments override them via settings rather than
/// code.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LoyaltySettings {
    /// Points earned per whole rupee paid.
    pub earn_rate: Decimal,

    /// Rupee value of a single redeemed point.
    pub redeem_rate: Decimal,
}

impl Default for LoyaltySettings {
    fn default() -> Self {
        let policy = LoyaltyPolicy::default();

        Self {
            earn_rate: policy.earn_rate,
            redeem_rate: policy.redeem_rate,
        }
    }
}

impl From<LoyaltySettings> for LoyaltyPolicy {
    fn from(settings: LoyaltySettings) -> Self {
        Self {
            earn_rate: settings.earn_rate,
            redeem_rate: settings.redeem_rate,
        }
    }
}
