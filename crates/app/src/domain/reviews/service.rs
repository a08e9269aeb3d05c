//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        products::models::ProductUuid,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, RATING_RANGE, Review},
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn add_review(
        &self,
        account: AccountUuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        if !RATING_RANGE.contains(&review.rating) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_review(&mut tx, account, review).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_reviews_by_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_for_account(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_reviews_by_account(&mut tx, account)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Adds a review for a product. Ratings run 1 to 5.
    async fn add_review(
        &self,
        account: AccountUuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// A product's reviews, newest first.
    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// An account's reviews, newest first.
    async fn list_for_account(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::reviews::models::ReviewUuid,
        test::{TestContext, helpers::rs},
    };

    use super::*;

    #[tokio::test]
    async fn add_review_round_trips() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;
        let category = ctx.create_category("Menu").await;
        let product = ctx.create_product(category, "Karahi", rs(500)).await;

        let review = ctx
            .reviews
            .add_review(
                account,
                NewReview {
                    uuid: ReviewUuid::new(),
                    product_uuid: product.uuid,
                    rating: 5,
                    comment: "Best karahi in town".to_string(),
                },
            )
            .await?;

        assert_eq!(review.rating, 5);
        assert_eq!(review.account_uuid, account);

        Ok(())
    }

    #[tokio::test]
    async fn add_review_rejects_out_of_range_ratings() {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        for rating in [0, 6] {
            let result = ctx
                .reviews
                .add_review(
                    account,
                    NewReview {
                        uuid: ReviewUuid::new(),
                        product_uuid: crate::domain::products::models::ProductUuid::new(),
                        rating,
                        comment: String::new(),
                    },
                )
                .await;

            assert!(
                matches!(result, Err(ReviewsServiceError::InvalidRating)),
                "rating {rating}: expected InvalidRating, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn add_review_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;

        let result = ctx
            .reviews
            .add_review(
                account,
                NewReview {
                    uuid: ReviewUuid::new(),
                    product_uuid: crate::domain::products::models::ProductUuid::new(),
                    rating: 4,
                    comment: String::new(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_for_product_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let account = ctx.create_account("ayesha@example.com").await;
        let category = ctx.create_category("Menu").await;
        let product = ctx.create_product(category, "Karahi", rs(500)).await;

        for (rating, comment) in [(3, "decent"), (5, "superb")] {
            ctx.reviews
                .add_review(
                    account,
                    NewReview {
                        uuid: ReviewUuid::new(),
                        product_uuid: product.uuid,
                        rating,
                        comment: comment.to_string(),
                    },
                )
                .await?;
        }

        let reviews = ctx.reviews.list_for_product(product.uuid).await?;
        let newest = reviews.first().ok_or("expected reviews")?;

        assert_eq!(reviews.len(), 2);
        assert_eq!(newest.comment, "superb");

        Ok(())
    }
}
