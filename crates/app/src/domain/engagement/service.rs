//! Engagement service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::engagement::{
        errors::EngagementServiceError,
        models::{
            ContactMessage, Feedback, NewContactMessage, NewFeedback, NewsletterSubscriber,
            SubscriberUuid,
        },
        repository::PgEngagementRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgEngagementService {
    db: Db,
    repository: PgEngagementRepository,
}

impl PgEngagementService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgEngagementRepository::new(),
        }
    }
}

#[async_trait]
impl EngagementService for PgEngagementService {
    async fn submit_contact(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, EngagementServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_contact_message(&mut tx, message)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, EngagementServiceError> {
        let mut tx = self.db.begin().await?;

        let messages = self.repository.list_contact_messages(&mut tx).await?;

        tx.commit().await?;

        Ok(messages)
    }

    async fn subscribe(&self, email: &str) -> Result<NewsletterSubscriber, EngagementServiceError> {
        let mut tx = self.db.begin().await?;

        let subscriber = self
            .repository
            .create_subscriber(&mut tx, SubscriberUuid::new(), email)
            .await?;

        tx.commit().await?;

        Ok(subscriber)
    }

    async fn list_subscribers(&self) -> Result<Vec<NewsletterSubscriber>, EngagementServiceError> {
        let mut tx = self.db.begin().await?;

        let subscribers = self.repository.list_subscribers(&mut tx).await?;

        tx.commit().await?;

        Ok(subscribers)
    }

    async fn submit_feedback(
        &self,
        feedback: NewFeedback,
    ) -> Result<Feedback, EngagementServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_feedback(&mut tx, feedback).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait EngagementService: Send + Sync {
    /// Stores a contact-form message.
    async fn submit_contact(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, EngagementServiceError>;

    /// All contact messages, newest first.
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, EngagementServiceError>;

    /// Subscribes an email to the newsletter. Duplicate emails fail with
    /// [`EngagementServiceError::AlreadySubscribed`].
    async fn subscribe(&self, email: &str)
    -> Result<NewsletterSubscriber, EngagementServiceError>;

    /// All subscribers, newest first.
    async fn list_subscribers(&self) -> Result<Vec<NewsletterSubscriber>, EngagementServiceError>;

    /// Stores site feedback.
    async fn submit_feedback(
        &self,
        feedback: NewFeedback,
    ) -> Result<Feedback, EngagementServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::engagement::models::{ContactMessageUuid, FeedbackUuid},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn submit_contact_stores_message() -> TestResult {
        let ctx = TestContext::new().await;

        let message = ctx
            .engagement
            .submit_contact(NewContactMessage {
                uuid: ContactMessageUuid::new(),
                name: "Ayesha".to_string(),
                email: "ayesha@example.com".to_string(),
                subject: "Catering".to_string(),
                message: "Do you cater weddings?".to_string(),
            })
            .await?;

        assert_eq!(message.subject, "Catering");

        let listed = ctx.engagement.list_contact_messages().await?;

        assert_eq!(listed.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn subscribe_is_rejected_for_duplicate_email() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.engagement.subscribe("news@example.com").await?;

        let result = ctx.engagement.subscribe("news@example.com").await;

        assert!(
            matches!(result, Err(EngagementServiceError::AlreadySubscribed)),
            "expected AlreadySubscribed, got {result:?}"
        );

        let subscribers = ctx.engagement.list_subscribers().await?;

        assert_eq!(subscribers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn submit_feedback_stores_entry() -> TestResult {
        let ctx = TestContext::new().await;

        let feedback = ctx
            .engagement
            .submit_feedback(NewFeedback {
                uuid: FeedbackUuid::new(),
                name: "Bilal".to_string(),
                email: "bilal@example.com".to_string(),
                message: "Loved the new branch".to_string(),
            })
            .await?;

        assert_eq!(feedback.name, "Bilal");

        Ok(())
    }
}
