//! Engagement Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::engagement::models::{
    ContactMessage, ContactMessageUuid, Feedback, FeedbackUuid, NewContactMessage, NewFeedback,
    NewsletterSubscriber, SubscriberUuid,
};

const CREATE_CONTACT_MESSAGE_SQL: &str = include_str!("sql/create_contact_message.sql");
const LIST_CONTACT_MESSAGES_SQL: &str = include_str!("sql/list_contact_messages.sql");
const CREATE_SUBSCRIBER_SQL: &str = include_str!("sql/create_subscriber.sql");
const LIST_SUBSCRIBERS_SQL: &str = include_str!("sql/list_subscribers.sql");
const CREATE_FEEDBACK_SQL: &str = include_str!("sql/create_feedback.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEngagementRepository;

impl PgEngagementRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_contact_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        query_as::<Postgres, ContactMessage>(CREATE_CONTACT_MESSAGE_SQL)
            .bind(message.uuid.into_uuid())
            .bind(message.name)
            .bind(message.email)
            .bind(message.subject)
            .bind(message.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_contact_messages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        query_as::<Postgres, ContactMessage>(LIST_CONTACT_MESSAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_subscriber(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscriber: SubscriberUuid,
        email: &str,
    ) -> Result<NewsletterSubscriber, sqlx::Error> {
        query_as::<Postgres, NewsletterSubscriber>(CREATE_SUBSCRIBER_SQL)
            .bind(subscriber.into_uuid())
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_subscribers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        query_as::<Postgres, NewsletterSubscriber>(LIST_SUBSCRIBERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_feedback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        feedback: NewFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        query_as::<Postgres, Feedback>(CREATE_FEEDBACK_SQL)
            .bind(feedback.uuid.into_uuid())
            .bind(feedback.name)
            .bind(feedback.email)
            .bind(feedback.message)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ContactMessage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ContactMessageUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for NewsletterSubscriber {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubscriberUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            subscribed_at: row.try_get::<SqlxTimestamp, _>("subscribed_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Feedback {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FeedbackUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            message: row.try_get("message")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
