//! Carts service errors.

use shinwari::pricing::PricingError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart or item not found")]
    NotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product is not available")]
    ProductUnavailable,

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}

impl From<PricingError> for CartsServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::InvalidQuantity => Self::InvalidQuantity,
        }
    }
}
