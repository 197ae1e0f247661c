//! Port abstraction over the feed's post collection.

use async_trait::async_trait;

use crate::domain::post::{Comment, Post, PostId};
use crate::domain::Error;

/// Persistence errors raised by post store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostPersistenceError {
    /// Store connection could not be established.
    #[error("post store connection failed: {message}")]
    Connection {
        /// Backend failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("post store query failed: {message}")]
    Query {
        /// Backend failure description.
        message: String,
    },
}

impl PostPersistenceError {
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

impl From<PostPersistenceError> for Error {
    fn from(error: PostPersistenceError) -> Self {
        match error {
            PostPersistenceError::Connection { message } => Self::service_unavailable(message),
            PostPersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Access to the shared feed.
///
/// Like and comment mutations are atomic primitives, not read-modify-write:
/// concurrent calls against the same post must never lose an increment or a
/// comment, and comments keep insertion order.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a freshly created post.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// All posts, newest first, each with its comments in insertion order.
    async fn list_recent(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// Atomically add one to a post's like counter. Returns `false` when no
    /// such post exists.
    async fn increment_likes(&self, id: PostId) -> Result<bool, PostPersistenceError>;

    /// Atomically append a comment to the end of a post's comment sequence.
    /// Returns `false` when no such post exists.
    async fn append_comment(
        &self,
        id: PostId,
        comment: Comment,
    ) -> Result<bool, PostPersistenceError>;
}
