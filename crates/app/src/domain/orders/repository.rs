//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::AccountUuid,
    branches::models::BranchUuid,
    carts::repositories::try_get_quantity,
    orders::models::{
        NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
        StatusCount,
    },
    products::models::ProductUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_FOR_ACCOUNT_SQL: &str = include_str!("sql/get_order_for_account.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LIST_ORDERS_BY_ACCOUNT_SQL: &str = include_str!("sql/list_orders_by_account.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const SALES_SUMMARY_SQL: &str = include_str!("sql/sales_summary.sql");
const STATUS_COUNTS_SQL: &str = include_str!("sql/status_counts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        order: NewOrder,
        total_price: Decimal,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(order.full_name)
            .bind(order.phone)
            .bind(order.address)
            .bind(order.branch_uuid.map(BranchUuid::into_uuid))
            .bind(total_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderItem, sqlx::Error> {
        let quantity = i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.map(ProductUuid::into_uuid))
            .bind(item.product_name)
            .bind(quantity)
            .bind(item.price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_for_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_FOR_ACCOUNT_SQL)
            .bind(order.into_uuid())
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_by_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_BY_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn sales_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(u64, Decimal), sqlx::Error> {
        let row = query_as::<Postgres, (i64, Decimal)>(SALES_SUMMARY_SQL)
            .fetch_one(&mut **tx)
            .await?;

        let total_orders = u64::try_from(row.0).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_orders".to_string(),
            source: Box::new(e),
        })?;

        Ok((total_orders, row.1))
    }

    pub(crate) async fn status_counts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        query_as::<Postgres, StatusCount>(STATUS_COUNTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn try_get_status(row: &PgRow, col: &str) -> Result<OrderStatus, sqlx::Error> {
    let status: &str = row.try_get(col)?;

    OrderStatus::from_str(status).map_err(|message| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: message.into(),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            full_name: row.try_get("full_name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            branch_uuid: row
                .try_get::<Option<Uuid>, _>("branch_uuid")?
                .map(BranchUuid::from_uuid),
            total_price: row.try_get::<Decimal, _>("total_price")?,
            status: try_get_status(row, "status")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get::<Decimal, _>("price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StatusCount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let count_i64: i64 = row.try_get("count")?;

        let count = u64::try_from(count_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            status: try_get_status(row, "status")?,
            count,
        })
    }
}
