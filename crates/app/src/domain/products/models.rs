//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use shinwari::pricing::ProductPricing;

use crate::{
    domain::{branches::models::BranchUuid, catalog::models::CategoryUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub available: bool,
    pub is_featured: bool,
    pub category_uuid: CategoryUuid,
    pub branch_uuid: Option<BranchUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// The pricing view used by cart and order totalling.
    #[must_use]
    pub fn pricing(&self) -> ProductPricing {
        ProductPricing {
            price: self.price,
            discount_price: self.discount_price,
        }
    }

    /// The price the customer pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.pricing().effective_price()
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub available: bool,
    pub is_featured: bool,
    pub category_uuid: CategoryUuid,
    pub branch_uuid: Option<BranchUuid>,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub available: bool,
    pub is_featured: bool,
    pub category_uuid: CategoryUuid,
    pub branch_uuid: Option<BranchUuid>,
}

/// Composable listing filter. `Default` lists every available product.
///
/// A branch filter keeps products sold at that branch plus products with no
/// branch (shared across all branches).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<CategoryUuid>,
    pub branch: Option<BranchUuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub include_unavailable: bool,
}
