//! Feed entities: posts and their comments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{AccountId, Role};

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from string form.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single comment on a post.
///
/// Comments are append-only and keep insertion order; nothing reorders or
/// deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Display name of the commenting account.
    pub author_name: String,
    /// Comment body.
    pub text: String,
    /// Append instant.
    pub created_at: DateTime<Utc>,
}

/// A feed post with its like counter and ordered comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier.
    pub id: PostId,
    /// Authoring account.
    pub author_id: AccountId,
    /// Store the author belongs to.
    pub author_role: Role,
    /// Post body.
    pub caption: String,
    /// Opaque reference path to an uploaded image, if any.
    pub image_ref: Option<String>,
    /// Like counter; non-negative and only ever incremented in scope.
    pub likes: i32,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
    /// Creation instant; the feed sorts descending on this.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Construct a fresh post: zero likes, no comments, now-timestamp.
    pub fn new(
        author_id: AccountId,
        author_role: Role,
        caption: String,
        image_ref: Option<String>,
    ) -> Self {
        Self {
            id: PostId::random(),
            author_id,
            author_role,
            caption,
            image_ref,
            likes: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_posts_start_unliked_and_uncommented() {
        let post = Post::new(AccountId::random(), Role::Student, "hello".into(), None);
        assert_eq!(post.likes, 0);
        assert!(post.comments.is_empty());
    }

    #[rstest]
    fn post_serialises_camel_case() {
        let post = Post::new(
            AccountId::random(),
            Role::Alumnus,
            "caption".into(),
            Some("/uploads/1.png".into()),
        );
        let value = serde_json::to_value(&post).expect("post serialises");
        assert!(value.get("imageRef").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(
            value.get("likes").and_then(serde_json::Value::as_i64),
            Some(0)
        );
    }
}
