//! Engagement intake: contact messages, newsletter signups, feedback.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::EngagementServiceError;
pub use service::*;
