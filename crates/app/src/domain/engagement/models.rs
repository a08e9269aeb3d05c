//! Engagement Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Contact Message UUID
pub type ContactMessageUuid = TypedUuid<ContactMessage>;

/// Contact Message Model
///
/// Stored for follow-up; delivering mail is someone else's job.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub uuid: ContactMessageUuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// New Contact Message Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub uuid: ContactMessageUuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Newsletter Subscriber UUID
pub type SubscriberUuid = TypedUuid<NewsletterSubscriber>;

/// Newsletter Subscriber Model
#[derive(Debug, Clone)]
pub struct NewsletterSubscriber {
    pub uuid: SubscriberUuid,
    pub email: String,
    pub subscribed_at: Timestamp,
}

/// Feedback UUID
pub type FeedbackUuid = TypedUuid<Feedback>;

/// Feedback Model
#[derive(Debug, Clone)]
pub struct Feedback {
    pub uuid: FeedbackUuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// New Feedback Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub uuid: FeedbackUuid,
    pub name: String,
    pub email: String,
    pub message: String,
}
