//! Order Models

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use shinwari::pricing::{PricingError, ProductPricing, line_total};

use crate::{
    domain::{
        accounts::models::AccountUuid, branches::models::BranchUuid,
        products::models::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status {other:?}")),
        }
    }
}

/// Order Model
///
/// `total_price` and the item prices are captured when the order is placed
/// and never recomputed from the live catalog.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub account_uuid: AccountUuid,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub branch_uuid: Option<BranchUuid>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// OrderItem Model
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    /// Cleared when the product is later deleted; the name and price
    /// snapshots below keep the order legible.
    pub product_uuid: Option<ProductUuid>,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    /// The line total at the snapshotted price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidQuantity`] when the quantity is zero,
    /// which the storage constraints rule out for persisted rows.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        line_total(&ProductPricing::new(self.price), self.quantity)
    }
}

/// New Order Model — delivery details supplied at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub branch_uuid: Option<BranchUuid>,
}

/// Snapshot of one cart line at order time.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: Option<ProductUuid>,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Orders per status, for the dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u64,
}

/// Dashboard aggregates over all orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersSummary {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub status_counts: Vec<StatusCount>,
}
