//! Shared fixtures for service tests.

use rust_decimal::Decimal;

use crate::domain::{
    accounts::models::{AccountUuid, NewAccount},
    catalog::models::CategoryUuid,
    orders::models::{NewOrder, OrderUuid},
    products::models::{NewProduct, ProductUuid},
};

/// Rupees with two decimal places.
pub fn rs(major: i64) -> Decimal {
    Decimal::new(major * 100, 2)
}

pub fn new_account(email: &str) -> NewAccount {
    NewAccount {
        uuid: AccountUuid::new(),
        full_name: "Test Customer".to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
    }
}

pub fn new_product(category: CategoryUuid, name: &str, price: Decimal) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: None,
        price,
        discount_price: None,
        available: true,
        is_featured: false,
        category_uuid: category,
        branch_uuid: None,
    }
}

pub fn new_order() -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        full_name: "Test Customer".to_string(),
        phone: "0300-0000000".to_string(),
        address: "1 Test Street".to_string(),
        branch_uuid: None,
    }
}
