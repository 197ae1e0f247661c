//! Notification entity: a best-effort asynchronous notice to one account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;

/// Message attached to the notice a post author receives on creation.
pub const POST_CREATED_MESSAGE: &str = "Your post has been created!";

/// A notice emitted to an account in response to a feed event.
///
/// Created unread and never mutated afterwards; there is no read path in
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Stable identifier.
    pub id: Uuid,
    /// Account the notice addresses.
    pub recipient_id: AccountId,
    /// Notice text.
    pub message: String,
    /// Whether the recipient has seen the notice. Always `false` in scope.
    pub read: bool,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Construct an unread notice with a now-timestamp.
    pub fn new(recipient_id: AccountId, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    /// The fixed notice dispatched when a post is created.
    pub fn post_created(recipient_id: AccountId) -> Self {
        Self::new(recipient_id, POST_CREATED_MESSAGE)
    }
}
