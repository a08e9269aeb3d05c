//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::accounts::models::{Account, AccountUpdate, AccountUuid, NewAccount};

const GET_ACCOUNT_SQL: &str = include_str!("sql/get_account.sql");
const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const UPDATE_ACCOUNT_SQL: &str = include_str!("sql/update_account.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(GET_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: NewAccount,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.full_name)
            .bind(account.email)
            .bind(account.phone)
            .bind(account.address)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(UPDATE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .bind(update.full_name)
            .bind(update.email)
            .bind(update.phone)
            .bind(update.address)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Account {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
