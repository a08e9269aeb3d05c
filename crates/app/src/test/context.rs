//! Test context for service-level integration tests.

use rust_decimal::Decimal;
use shinwari::loyalty::LoyaltyPolicy;
use sqlx::query;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        accounts::{AccountsService, PgAccountsService, models::AccountUuid},
        branches::{BranchesService, PgBranchesService, models::{BranchUuid, NewBranch}},
        carts::{
            CartsService, PgCartsService,
            models::{AddCartItem, CartItemUuid},
        },
        catalog::{CatalogService, PgCatalogService, models::{CategoryUuid, NewCategory}},
        engagement::PgEngagementService,
        loyalty::PgLoyaltyService,
        orders::{OrdersService, PgOrdersService, models::Order},
        products::{PgProductsService, ProductsService, models::Product},
        reviews::PgReviewsService,
    },
};

use super::{db::TestDb, helpers};

pub struct TestContext {
    pub db: TestDb,
    pub accounts: PgAccountsService,
    pub branches: PgBranchesService,
    pub catalog: PgCatalogService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub loyalty: PgLoyaltyService,
    pub reviews: PgReviewsService,
    pub engagement: PgEngagementService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            accounts: PgAccountsService::new(db.clone()),
            branches: PgBranchesService::new(db.clone()),
            catalog: PgCatalogService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            loyalty: PgLoyaltyService::new(db.clone(), LoyaltyPolicy::default()),
            reviews: PgReviewsService::new(db.clone()),
            engagement: PgEngagementService::new(db),
            db: test_db,
        }
    }

    /// Create an account and return its UUID.
    pub async fn create_account(&self, email: &str) -> AccountUuid {
        self.accounts
            .create_account(helpers::new_account(email))
            .await
            .expect("Failed to create test account")
            .uuid
    }

    /// Create a branch and return its UUID.
    pub async fn create_branch(&self, name: &str) -> BranchUuid {
        self.branches
            .create_branch(NewBranch {
                uuid: BranchUuid::new(),
                name: name.to_string(),
                address: None,
                city: None,
                phone: None,
                is_main: false,
            })
            .await
            .expect("Failed to create test branch")
            .uuid
    }

    /// Create a category and return its UUID.
    pub async fn create_category(&self, name: &str) -> CategoryUuid {
        self.catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
            })
            .await
            .expect("Failed to create test category")
            .uuid
    }

    /// Create an available product with the given list price.
    pub async fn create_product(
        &self,
        category: CategoryUuid,
        name: &str,
        price: Decimal,
    ) -> Product {
        self.products
            .create_product(helpers::new_product(category, name, price))
            .await
            .expect("Failed to create test product")
    }

    /// Seed a single-line cart and place an order totalling `total`.
    pub async fn place_order(&self, account: AccountUuid, total: Decimal) -> Order {
        let category = self
            .create_category(&format!("seed_{}", Uuid::now_v7().simple()))
            .await;

        let product = self.create_product(category, "Seeded Item", total).await;

        self.carts
            .add_item(
                account,
                AddCartItem {
                    uuid: CartItemUuid::new(),
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await
            .expect("Failed to seed cart item");

        self.orders
            .place_order(account, helpers::new_order())
            .await
            .expect("Failed to place test order")
    }

    /// Seed points directly into the ledger, bypassing order placement.
    pub async fn seed_points(&self, account: AccountUuid, points: i64) {
        query(
            "INSERT INTO points_transactions (uuid, account_uuid, kind, points, amount, note) \
             VALUES ($1, $2, 'EARN', $3, $4, 'test seed')",
        )
        .bind(Uuid::now_v7())
        .bind(account.into_uuid())
        .bind(points)
        .bind(Decimal::from(points))
        .execute(self.db.pool())
        .await
        .expect("Failed to seed points transaction");

        query(
            "UPDATE loyalty_profiles SET points_balance = points_balance + $2 \
             WHERE account_uuid = $1",
        )
        .bind(account.into_uuid())
        .bind(points)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed points balance");
    }
}
