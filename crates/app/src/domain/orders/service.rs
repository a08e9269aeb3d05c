//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use shinwari::pricing::cart_total;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        carts::{
            models::CartItem,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            errors::OrdersServiceError,
            models::{
                NewOrder, NewOrderItem, Order, OrderItemUuid, OrderStatus, OrderUuid,
                OrdersSummary,
            },
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    carts: PgCartsRepository,
    cart_items: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
        }
    }
}

/// Snapshot one cart line at its current effective price.
fn snapshot(item: &CartItem) -> NewOrderItem {
    NewOrderItem {
        uuid: OrderItemUuid::new(),
        product_uuid: Some(item.product_uuid),
        product_name: item.product_name.clone(),
        quantity: item.quantity,
        price: item.unit_price(),
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(account_uuid = %account, order_uuid = %order.uuid),
        err
    )]
    async fn place_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts.get_cart_by_account(&mut tx, account).await? else {
            return Err(OrdersServiceError::EmptyCart);
        };

        let cart_items = self.cart_items.get_cart_items(&mut tx, cart.uuid).await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let lines: Vec<_> = cart_items.iter().map(CartItem::as_cart_line).collect();
        let total_price = cart_total(&lines)?;

        let mut created = self
            .orders
            .create_order(&mut tx, account, order, total_price)
            .await?;

        for cart_item in &cart_items {
            let item = self
                .orders
                .create_order_item(&mut tx, created.uuid, snapshot(cart_item))
                .await?;

            created.items.push(item);
        }

        self.cart_items.clear_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %created.uuid, %total_price, "placed order");

        Ok(created)
    }

    async fn get_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self
            .orders
            .get_order_for_account(&mut tx, account, order)
            .await?;

        let items = self.orders.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        found.items = items;

        Ok(found)
    }

    async fn list_orders(&self, account: AccountUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders_by_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.orders.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, status = status.as_str(), "updated order status");

        Ok(updated)
    }

    async fn sales_summary(&self) -> Result<OrdersSummary, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let (total_orders, total_revenue) = self.orders.sales_totals(&mut tx).await?;
        let status_counts = self.orders.status_counts(&mut tx).await?;

        tx.commit().await?;

        Ok(OrdersSummary {
            total_orders,
            total_revenue,
            status_counts,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order from the account's cart: totals the lines, snapshots
    /// each at its current effective price, and clears the cart — all in
    /// one transaction. Fails with [`OrdersServiceError::EmptyCart`] when
    /// there is nothing to order.
    async fn place_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one of the account's orders, with items.
    async fn get_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The account's orders, newest first, without items.
    async fn list_orders(&self, account: AccountUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order, newest first, without items.
    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order through its lifecycle.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Dashboard aggregates: order count, revenue, per-status counts.
    async fn sales_summary(&self) -> Result<OrdersSummary, OrdersServiceError>;
}
