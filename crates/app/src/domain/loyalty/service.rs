//! Loyalty ledger service.
//!
//! Balances move only by appending a transaction; the transaction row and
//! the balance update commit together or not at all. Mutations take a row
//! lock on the profile, so concurrent redemptions for one account
//! serialize and cannot jointly overdraw a stale balance.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use shinwari::loyalty::LoyaltyPolicy;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        loyalty::{
            errors::LoyaltyServiceError,
            models::{
                LoyaltyProfile, NewPointsTransaction, PointsTransaction, PointsTransactionUuid,
                Redemption, TransactionKind,
            },
            repository::PgLoyaltyRepository,
        },
        orders::models::OrderUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgLoyaltyService {
    db: Db,
    policy: LoyaltyPolicy,
    repository: PgLoyaltyRepository,
}

impl PgLoyaltyService {
    #[must_use]
    pub fn new(db: Db, policy: LoyaltyPolicy) -> Self {
        Self {
            db,
            policy,
            repository: PgLoyaltyRepository::new(),
        }
    }

    /// The conversion rates this ledger applies.
    #[must_use]
    pub fn policy(&self) -> LoyaltyPolicy {
        self.policy
    }

    /// Lock the profile row for mutation, creating it first for accounts
    /// that predate the loyalty programme.
    async fn lock_or_create_profile(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        account: AccountUuid,
    ) -> Result<LoyaltyProfile, LoyaltyServiceError> {
        if let Some(profile) = self.repository.lock_profile(tx, account).await? {
            return Ok(profile);
        }

        let created = self.repository.create_profile(tx, account).await?;

        Ok(created)
    }
}

#[async_trait]
impl LoyaltyService for PgLoyaltyService {
    async fn get_profile(
        &self,
        account: AccountUuid,
    ) -> Result<LoyaltyProfile, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = match self.repository.get_profile(&mut tx, account).await? {
            Some(profile) => profile,
            None => self.repository.create_profile(&mut tx, account).await?,
        };

        tx.commit().await?;

        Ok(profile)
    }

    #[tracing::instrument(
        name = "loyalty.service.award_points_for_order",
        skip(self),
        fields(account_uuid = %account, order_uuid = %order, %paid_amount),
        err
    )]
    async fn award_points_for_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
        paid_amount: Decimal,
    ) -> Result<Option<PointsTransaction>, LoyaltyServiceError> {
        let points = self.policy.points_for_amount(paid_amount);

        if points == 0 {
            return Ok(None);
        }

        let delta = i64::try_from(points).or(Err(LoyaltyServiceError::PointsOutOfRange))?;

        let mut tx = self.db.begin().await?;

        self.lock_or_create_profile(&mut tx, account).await?;

        let transaction = self
            .repository
            .insert_transaction(
                &mut tx,
                NewPointsTransaction {
                    uuid: PointsTransactionUuid::new(),
                    account_uuid: account,
                    kind: TransactionKind::Earn,
                    points,
                    amount: paid_amount,
                    order_uuid: Some(order),
                    note: None,
                },
            )
            .await?;

        self.repository.adjust_balance(&mut tx, account, delta).await?;

        tx.commit().await?;

        info!(points, "awarded points for order");

        Ok(Some(transaction))
    }

    #[tracing::instrument(
        name = "loyalty.service.redeem_points",
        skip(self),
        fields(account_uuid = %account, points),
        err
    )]
    async fn redeem_points(
        &self,
        account: AccountUuid,
        points: u64,
    ) -> Result<Decimal, LoyaltyServiceError> {
        if points == 0 {
            return Ok(Decimal::ZERO);
        }

        let delta = i64::try_from(points).or(Err(LoyaltyServiceError::PointsOutOfRange))?;

        let mut tx = self.db.begin().await?;

        let profile = self.lock_or_create_profile(&mut tx, account).await?;

        if points > profile.points_balance {
            return Err(LoyaltyServiceError::InsufficientPoints);
        }

        let discount = self.policy.discount_for_points(points);

        self.repository
            .insert_transaction(
                &mut tx,
                NewPointsTransaction {
                    uuid: PointsTransactionUuid::new(),
                    account_uuid: account,
                    kind: TransactionKind::Redeem,
                    points,
                    amount: discount,
                    order_uuid: None,
                    note: None,
                },
            )
            .await?;

        self.repository.adjust_balance(&mut tx, account, -delta).await?;

        tx.commit().await?;

        info!(points, %discount, "redeemed points");

        Ok(discount)
    }

    async fn apply_redemption(
        &self,
        account: AccountUuid,
        points_requested: u64,
        order_total: Decimal,
    ) -> Result<Redemption, LoyaltyServiceError> {
        let (points_applied, _) = self.policy.clamp_redemption(points_requested, order_total);

        let discount = self.redeem_points(account, points_applied).await?;

        Ok(Redemption {
            points_applied,
            discount,
        })
    }

    async fn list_transactions(
        &self,
        account: AccountUuid,
        limit: i64,
    ) -> Result<Vec<PointsTransaction>, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let transactions = self
            .repository
            .list_transactions(&mut tx, account, limit)
            .await?;

        tx.commit().await?;

        Ok(transactions)
    }
}

#[automock]
#[async_trait]
pub trait LoyaltyService: Send + Sync {
    /// Returns the account's profile, creating it with a zero balance when
    /// absent. Idempotent.
    async fn get_profile(&self, account: AccountUuid)
    -> Result<LoyaltyProfile, LoyaltyServiceError>;

    /// Awards points for a paid order. No-ops (returning `None`) when the
    /// paid amount is zero or negative or converts to zero points. A second
    /// award for the same order fails with
    /// [`LoyaltyServiceError::AlreadyAwarded`].
    async fn award_points_for_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
        paid_amount: Decimal,
    ) -> Result<Option<PointsTransaction>, LoyaltyServiceError>;

    /// Redeems points against the account's balance, returning the monetary
    /// discount. Fails with [`LoyaltyServiceError::InsufficientPoints`] when
    /// the balance is too small, leaving it unchanged. Redeeming zero points
    /// is a no-op with a zero discount.
    async fn redeem_points(
        &self,
        account: AccountUuid,
        points: u64,
    ) -> Result<Decimal, LoyaltyServiceError>;

    /// Clamps the request so the discount never exceeds `order_total`, then
    /// redeems. The entry point checkout flows call.
    async fn apply_redemption(
        &self,
        account: AccountUuid,
        points_requested: u64,
        order_total: Decimal,
    ) -> Result<Redemption, LoyaltyServiceError>;

    /// The account's ledger, newest first.
    async fn list_transactions(
        &self,
        account: AccountUuid,
        limit: i64,
    ) -> Result<Vec<PointsTransaction>, LoyaltyServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::rs};

    use super::*;

    #[tokio::test]
    async fn get_profile_creates_zero_balance_once() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        let first = ctx.loyalty.get_profile(account).await?;
        let second = ctx.loyalty.get_profile(account).await?;

        assert_eq!(first.points_balance, 0);
        assert_eq!(second.points_balance, 0);
        assert_eq!(first.account_uuid, second.account_uuid);

        Ok(())
    }

    #[tokio::test]
    async fn award_records_earn_and_increments_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;
        let order = ctx.place_order(account, rs(1350)).await;

        let transaction = ctx
            .loyalty
            .award_points_for_order(account, order.uuid, order.total_price)
            .await?
            .ok_or("expected an EARN transaction")?;

        assert_eq!(transaction.kind, TransactionKind::Earn);
        assert_eq!(transaction.points, 1350);
        assert_eq!(transaction.order_uuid, Some(order.uuid));

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 1350);

        Ok(())
    }

    #[tokio::test]
    async fn award_zero_total_is_a_noop() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;
        let order = ctx.place_order(account, rs(100)).await;

        let outcome = ctx
            .loyalty
            .award_points_for_order(account, order.uuid, rs(0))
            .await?;

        assert!(outcome.is_none(), "zero total should award nothing");

        let profile = ctx.loyalty.get_profile(account).await?;
        let transactions = ctx.loyalty.list_transactions(account, 10).await?;

        assert_eq!(profile.points_balance, 0);
        assert!(transactions.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn double_award_for_same_order_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;
        let order = ctx.place_order(account, rs(500)).await;

        ctx.loyalty
            .award_points_for_order(account, order.uuid, order.total_price)
            .await?;

        let result = ctx
            .loyalty
            .award_points_for_order(account, order.uuid, order.total_price)
            .await;

        assert!(
            matches!(result, Err(LoyaltyServiceError::AlreadyAwarded)),
            "expected AlreadyAwarded, got {result:?}"
        );

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 500, "balance must be unchanged");

        Ok(())
    }

    #[tokio::test]
    async fn redeem_decrements_balance_and_returns_discount() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 100).await;

        let discount = ctx.loyalty.redeem_points(account, 30).await?;

        assert_eq!(discount, rs(30));

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 70);

        let latest = ctx.loyalty.list_transactions(account, 1).await?;
        let latest = latest.first().ok_or("expected a REDEEM transaction")?;

        assert_eq!(latest.kind, TransactionKind::Redeem);
        assert_eq!(latest.points, 30);
        assert_eq!(latest.amount, rs(30));

        Ok(())
    }

    #[tokio::test]
    async fn redeem_beyond_balance_fails_and_preserves_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 50).await;

        let result = ctx.loyalty.redeem_points(account, 80).await;

        assert!(
            matches!(result, Err(LoyaltyServiceError::InsufficientPoints)),
            "expected InsufficientPoints, got {result:?}"
        );

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 50);

        Ok(())
    }

    #[tokio::test]
    async fn redeem_zero_points_is_a_noop() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        let discount = ctx.loyalty.redeem_points(account, 0).await?;

        assert_eq!(discount, rs(0));
        assert!(ctx.loyalty.list_transactions(account, 10).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn apply_redemption_clamps_to_order_total() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 100).await;

        // 150 points requested against an 80-rupee order
        let redemption = ctx.loyalty.apply_redemption(account, 150, rs(80)).await?;

        assert_eq!(redemption.points_applied, 80);
        assert_eq!(redemption.discount, rs(80));

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 20);

        Ok(())
    }

    #[tokio::test]
    async fn apply_redemption_still_requires_sufficient_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 50).await;

        // clamped to 80 points, but only 50 are held
        let result = ctx.loyalty.apply_redemption(account, 150, rs(80)).await;

        assert!(
            matches!(result, Err(LoyaltyServiceError::InsufficientPoints)),
            "expected InsufficientPoints, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_redemptions_cannot_overdraw() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 100).await;

        let service_a = ctx.loyalty.clone();
        let service_b = ctx.loyalty.clone();

        let (first, second) = tokio::join!(
            service_a.redeem_points(account, 80),
            service_b.redeem_points(account, 80),
        );

        assert!(
            first.is_ok() != second.is_ok(),
            "exactly one redemption should win, got {first:?} and {second:?}"
        );

        let profile = ctx.loyalty.get_profile(account).await?;

        assert_eq!(profile.points_balance, 20);

        Ok(())
    }

    #[tokio::test]
    async fn list_transactions_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        ctx.seed_points(account, 100).await;
        ctx.loyalty.redeem_points(account, 10).await?;
        ctx.loyalty.redeem_points(account, 20).await?;

        let transactions = ctx.loyalty.list_transactions(account, 10).await?;
        let latest = transactions.first().ok_or("expected transactions")?;

        assert_eq!(transactions.len(), 3);
        assert_eq!(latest.points, 20);

        Ok(())
    }
}
