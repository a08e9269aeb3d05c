//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductFilter, ProductUpdate, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_featured(&self, limit: i64) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_featured(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products matching the filter, sorted by name.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves up to `limit` featured, available products, newest first.
    async fn list_featured(&self, limit: i64) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<Product, ProductsServiceError>;

    /// Updates a product with the given details.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::catalog::models::CategoryUuid,
        test::{TestContext, helpers::{new_product, rs}},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_round_trips_decimal_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Karahi").await;

        let mut new = new_product(category, "Chicken Karahi", rs(500));
        new.discount_price = Some(rs(450));

        let product = ctx.products.create_product(new.clone()).await?;

        assert_eq!(product.uuid, new.uuid);
        assert_eq!(product.price, rs(500));
        assert_eq!(product.discount_price, Some(rs(450)));
        assert_eq!(product.effective_price(), rs(450));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product(CategoryUuid::new(), "Orphan", rs(100)))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;
        let karahi = ctx.create_category("Karahi").await;
        let bbq = ctx.create_category("BBQ").await;

        ctx.products
            .create_product(new_product(karahi, "Mutton Karahi", rs(900)))
            .await?;
        ctx.products
            .create_product(new_product(bbq, "Malai Boti", rs(420)))
            .await?;

        let products = ctx
            .products
            .list_products(ProductFilter {
                category: Some(bbq),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(products.len(), 1);
        assert!(products.iter().all(|p| p.category_uuid == bbq));

        Ok(())
    }

    #[tokio::test]
    async fn branch_filter_keeps_shared_products() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Rice").await;
        let branch = ctx.create_branch("Gulberg").await;
        let other = ctx.create_branch("Saddar").await;

        let mut branch_only = new_product(category, "Branch Special", rs(300));
        branch_only.branch_uuid = Some(branch);
        ctx.products.create_product(branch_only).await?;

        let mut elsewhere = new_product(category, "Other Special", rs(300));
        elsewhere.branch_uuid = Some(other);
        ctx.products.create_product(elsewhere).await?;

        // no branch: sold everywhere
        ctx.products
            .create_product(new_product(category, "Kabuli Pulao", rs(110)))
            .await?;

        let names: Vec<String> = ctx
            .products
            .list_products(ProductFilter {
                branch: Some(branch),
                ..ProductFilter::default()
            })
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Branch Special", "Kabuli Pulao"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_price_bounds() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        for (name, price) in [("Chai", 80), ("Pulao", 110), ("Karahi", 500)] {
            ctx.products
                .create_product(new_product(category, name, rs(price)))
                .await?;
        }

        let products = ctx
            .products
            .list_products(ProductFilter {
                min_price: Some(rs(100)),
                max_price: Some(rs(200)),
                ..ProductFilter::default()
            })
            .await?;

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Pulao"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_name_and_description() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        let mut described = new_product(category, "House Special", rs(650));
        described.description = Some("Slow-cooked lamb shank".to_string());
        ctx.products.create_product(described).await?;

        ctx.products
            .create_product(new_product(category, "Lamb Chops", rs(700)))
            .await?;
        ctx.products
            .create_product(new_product(category, "Chicken Tikka", rs(350)))
            .await?;

        let products = ctx
            .products
            .list_products(ProductFilter {
                search: Some("lamb".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(products.len(), 2, "search should hit name and description");

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_products_hidden_by_default() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        let mut sold_out = new_product(category, "Seasonal", rs(250));
        sold_out.available = false;
        ctx.products.create_product(sold_out).await?;

        let default_listing = ctx.products.list_products(ProductFilter::default()).await?;

        let full_listing = ctx
            .products
            .list_products(ProductFilter {
                include_unavailable: true,
                ..ProductFilter::default()
            })
            .await?;

        assert!(default_listing.is_empty());
        assert_eq!(full_listing.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_featured_respects_flag_and_limit() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        for i in 0..3 {
            let mut featured = new_product(category, &format!("Featured {i}"), rs(200));
            featured.is_featured = true;
            ctx.products.create_product(featured).await?;
        }

        ctx.products
            .create_product(new_product(category, "Ordinary", rs(150)))
            .await?;

        let featured = ctx.products.list_featured(2).await?;

        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|p| p.is_featured));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_price() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        let product = ctx
            .products
            .create_product(new_product(category, "Karahi", rs(500)))
            .await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: product.name.clone(),
                    description: None,
                    price: rs(550),
                    discount_price: None,
                    available: true,
                    is_featured: false,
                    category_uuid: category,
                    branch_uuid: None,
                },
            )
            .await?;

        assert_eq!(updated.price, rs(550));

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("Menu").await;

        let product = ctx
            .products
            .create_product(new_product(category, "Karahi", rs(500)))
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
