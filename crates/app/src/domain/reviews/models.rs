//! Review Models

use jiff::Timestamp;

use crate::{
    domain::{accounts::models::AccountUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Valid rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Review Model
#[derive(Debug, Clone)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub account_uuid: AccountUuid,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

/// New Review Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub rating: u8,
    pub comment: String,
}
