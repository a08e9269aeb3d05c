//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use shinwari::pricing::cart_total;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        carts::{
            errors::CartsServiceError,
            models::{AddCartItem, Cart, CartItem, CartItemUuid, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
        }
    }

    /// Fetch the account's cart, creating it on first access.
    async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        account: AccountUuid,
    ) -> Result<Cart, CartsServiceError> {
        if let Some(cart) = self.carts.get_cart_by_account(tx, account).await? {
            return Ok(cart);
        }

        let created = self.carts.create_cart(tx, CartUuid::new(), account).await?;

        Ok(created)
    }
}

/// Attach items and compute totals on a bare cart row.
fn assemble(mut cart: Cart, items: Vec<CartItem>) -> Result<Cart, CartsServiceError> {
    let lines: Vec<_> = items.iter().map(CartItem::as_cart_line).collect();

    cart.total_price = cart_total(&lines)?;
    cart.total_items = items.iter().map(|item| u64::from(item.quantity)).sum();
    cart.items = items;

    Ok(cart)
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, account: AccountUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.get_or_create_cart(&mut tx, account).await?;
        let items = self.items.get_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        assemble(cart, items)
    }

    async fn add_item(
        &self,
        account: AccountUuid,
        item: AddCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        match self
            .items
            .get_product_availability(&mut tx, item.product_uuid)
            .await?
        {
            None => return Err(CartsServiceError::NotFound),
            Some(false) => return Err(CartsServiceError::ProductUnavailable),
            Some(true) => {}
        }

        let cart = self.get_or_create_cart(&mut tx, account).await?;
        let item_uuid = self.items.upsert_cart_item(&mut tx, cart.uuid, item).await?;
        let item = self.items.get_cart_item(&mut tx, cart.uuid, item_uuid).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        account: AccountUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.get_or_create_cart(&mut tx, account).await?;

        let rows_affected = self
            .items
            .update_quantity(&mut tx, cart.uuid, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let item = self.items.get_cart_item(&mut tx, cart.uuid, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        account: AccountUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.get_or_create_cart(&mut tx, account).await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, cart.uuid, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, account: AccountUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.get_or_create_cart(&mut tx, account).await?;

        self.items.clear_cart_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the account's cart with priced lines and totals, creating
    /// the cart on first access.
    async fn get_cart(&self, account: AccountUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart. Adding a product already in the cart
    /// increments its quantity.
    async fn add_item(
        &self,
        account: AccountUuid,
        item: AddCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Set the quantity of a cart line. Quantity must be at least 1;
    /// removal is [`CartsService::remove_item`].
    async fn update_item(
        &self,
        account: AccountUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Remove a line from the cart.
    async fn remove_item(
        &self,
        account: AccountUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Delete every line in the cart.
    async fn clear_cart(&self, account: AccountUuid) -> Result<(), CartsServiceError>;
}
