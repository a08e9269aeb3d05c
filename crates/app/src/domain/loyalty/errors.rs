//! Loyalty service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoyaltyServiceError {
    #[error("insufficient points")]
    InsufficientPoints,

    #[error("points already awarded for this order")]
    AlreadyAwarded,

    #[error("points value out of range")]
    PointsOutOfRange,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for LoyaltyServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyAwarded,
            // the non-negative balance constraint; unreachable while
            // redemptions hold the profile row lock
            Some(ErrorKind::CheckViolation) => Self::InsufficientPoints,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}
