//! Port abstraction over the notification collection.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::notification::Notification;
use crate::domain::Error;

/// Persistence errors raised by notification store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationPersistenceError {
    /// Store connection could not be established.
    #[error("notification store connection failed: {message}")]
    Connection {
        /// Backend failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("notification store query failed: {message}")]
    Query {
        /// Backend failure description.
        message: String,
    },
}

impl NotificationPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<NotificationPersistenceError> for Error {
    fn from(error: NotificationPersistenceError) -> Self {
        match error {
            NotificationPersistenceError::Connection { message } => {
                Self::service_unavailable(message)
            }
            NotificationPersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Access to stored notifications.
///
/// Inserts are invoked best-effort by the feed: the caller may discard the
/// result, and a failure must never propagate into the triggering operation.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notice.
    async fn insert(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationPersistenceError>;

    /// Notices addressed to one account, newest first.
    async fn list_for(
        &self,
        recipient: AccountId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError>;
}
