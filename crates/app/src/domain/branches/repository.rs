//! Branches Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::branches::models::{Branch, BranchUpdate, BranchUuid, NewBranch};

const LIST_BRANCHES_SQL: &str = include_str!("sql/list_branches.sql");
const GET_BRANCH_SQL: &str = include_str!("sql/get_branch.sql");
const CREATE_BRANCH_SQL: &str = include_str!("sql/create_branch.sql");
const UPDATE_BRANCH_SQL: &str = include_str!("sql/update_branch.sql");
const DELETE_BRANCH_SQL: &str = include_str!("sql/delete_branch.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBranchesRepository;

impl PgBranchesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_branches(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Branch>, sqlx::Error> {
        query_as::<Postgres, Branch>(LIST_BRANCHES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_branch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        branch: BranchUuid,
    ) -> Result<Branch, sqlx::Error> {
        query_as::<Postgres, Branch>(GET_BRANCH_SQL)
            .bind(branch.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_branch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        branch: NewBranch,
    ) -> Result<Branch, sqlx::Error> {
        query_as::<Postgres, Branch>(CREATE_BRANCH_SQL)
            .bind(branch.uuid.into_uuid())
            .bind(branch.name)
            .bind(branch.address)
            .bind(branch.city)
            .bind(branch.phone)
            .bind(branch.is_main)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_branch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        branch: BranchUuid,
        update: BranchUpdate,
    ) -> Result<Branch, sqlx::Error> {
        query_as::<Postgres, Branch>(UPDATE_BRANCH_SQL)
            .bind(branch.into_uuid())
            .bind(update.name)
            .bind(update.address)
            .bind(update.city)
            .bind(update.phone)
            .bind(update.is_main)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_branch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        branch: BranchUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BRANCH_SQL)
            .bind(branch.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Branch {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BranchUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            phone: row.try_get("phone")?,
            is_main: row.try_get("is_main")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
