//! Loyalty Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{accounts::models::AccountUuid, orders::models::OrderUuid},
    uuids::TypedUuid,
};

/// Loyalty Profile Model
///
/// One per account. The balance only changes together with an appended
/// [`PointsTransaction`]; there is no other mutation path.
#[derive(Debug, Clone)]
pub struct LoyaltyProfile {
    pub account_uuid: AccountUuid,
    pub points_balance: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Points either enter or leave the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Earn,
    Redeem,
}

impl TransactionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earn => "EARN",
            Self::Redeem => "REDEEM",
        }
    }
}

/// Points Transaction UUID
pub type PointsTransactionUuid = TypedUuid<PointsTransaction>;

/// Points Transaction Model
///
/// Immutable once written; the ledger is append-only.
#[derive(Debug, Clone)]
pub struct PointsTransaction {
    pub uuid: PointsTransactionUuid,
    pub account_uuid: AccountUuid,
    pub kind: TransactionKind,
    pub points: u64,
    pub amount: Decimal,
    pub order_uuid: Option<OrderUuid>,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

/// Ledger entry to append. Only the service constructs these, keeping the
/// append-only discipline behind the service boundary.
#[derive(Debug, Clone)]
pub(crate) struct NewPointsTransaction {
    pub uuid: PointsTransactionUuid,
    pub account_uuid: AccountUuid,
    pub kind: TransactionKind,
    pub points: u64,
    pub amount: Decimal,
    pub order_uuid: Option<OrderUuid>,
    pub note: Option<String>,
}

/// Outcome of applying a redemption at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub points_applied: u64,
    pub discount: Decimal,
}
