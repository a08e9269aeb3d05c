//! Loyalty Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::AccountUuid,
    loyalty::models::{
        LoyaltyProfile, NewPointsTransaction, PointsTransaction, PointsTransactionUuid,
        TransactionKind,
    },
    orders::models::OrderUuid,
};

const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const LOCK_PROFILE_SQL: &str = include_str!("sql/lock_profile.sql");
const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const ADJUST_BALANCE_SQL: &str = include_str!("sql/adjust_balance.sql");
const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLoyaltyRepository;

impl PgLoyaltyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Option<LoyaltyProfile>, sqlx::Error> {
        query_as::<Postgres, LoyaltyProfile>(GET_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch the profile with a row lock held until the transaction ends.
    ///
    /// Every balance mutation goes through this lock, so two concurrent
    /// redemptions cannot both pass the sufficiency check on a stale
    /// balance.
    pub(crate) async fn lock_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Option<LoyaltyProfile>, sqlx::Error> {
        query_as::<Postgres, LoyaltyProfile>(LOCK_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<LoyaltyProfile, sqlx::Error> {
        query_as::<Postgres, LoyaltyProfile>(CREATE_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Apply a signed delta to the cached balance.
    pub(crate) async fn adjust_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        delta: i64,
    ) -> Result<LoyaltyProfile, sqlx::Error> {
        query_as::<Postgres, LoyaltyProfile>(ADJUST_BALANCE_SQL)
            .bind(account.into_uuid())
            .bind(delta)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: NewPointsTransaction,
    ) -> Result<PointsTransaction, sqlx::Error> {
        let points = points_to_db(transaction.points)?;

        query_as::<Postgres, PointsTransaction>(INSERT_TRANSACTION_SQL)
            .bind(transaction.uuid.into_uuid())
            .bind(transaction.account_uuid.into_uuid())
            .bind(transaction.kind.as_str())
            .bind(points)
            .bind(transaction.amount)
            .bind(transaction.order_uuid.map(OrderUuid::into_uuid))
            .bind(transaction.note)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        limit: i64,
    ) -> Result<Vec<PointsTransaction>, sqlx::Error> {
        query_as::<Postgres, PointsTransaction>(LIST_TRANSACTIONS_SQL)
            .bind(account.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LoyaltyProfile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            points_balance: try_get_points(row, "points_balance")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PointsTransaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: &str = row.try_get("kind")?;

        let kind = match kind {
            "EARN" => TransactionKind::Earn,
            "REDEEM" => TransactionKind::Redeem,
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: format!("unknown transaction kind {other:?}").into(),
                });
            }
        };

        Ok(Self {
            uuid: PointsTransactionUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            kind,
            points: try_get_points(row, "points")?,
            amount: row.try_get::<Decimal, _>("amount")?,
            order_uuid: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            note: row.try_get("note")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_get_points(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let points_i64: i64 = row.try_get(col)?;

    u64::try_from(points_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn points_to_db(points: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(points).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
