//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::LoyaltySettings,
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        branches::{BranchesService, PgBranchesService},
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        checkout::CheckoutService,
        engagement::{EngagementService, PgEngagementService},
        loyalty::{LoyaltyService, PgLoyaltyService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reviews::{PgReviewsService, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub branches: Arc<dyn BranchesService>,
    pub catalog: Arc<dyn CatalogService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub loyalty: Arc<dyn LoyaltyService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub engagement: Arc<dyn EngagementService>,
    pub checkout: CheckoutService,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        loyalty: LoyaltySettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone()));
        let loyalty: Arc<dyn LoyaltyService> =
            Arc::new(PgLoyaltyService::new(db.clone(), loyalty.into()));

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            branches: Arc::new(PgBranchesService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            engagement: Arc::new(PgEngagementService::new(db)),
            checkout: CheckoutService::new(orders.clone(), loyalty.clone()),
            orders,
            loyalty,
        })
    }
}
