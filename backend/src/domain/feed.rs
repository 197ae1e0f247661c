//! Feed mutation engine: post creation, atomic like/comment mutations,
//! ordered reads, and the best-effort notification dispatch.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::account::{AccountId, Role};
use crate::domain::notification::Notification;
use crate::domain::ports::{NotificationRepository, PostRepository};
use crate::domain::post::{Comment, Post, PostId};
use crate::domain::Error;

/// Creates posts, applies like/comment mutations, and orders feed reads.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl FeedService {
    /// Create a new service over the post and notification stores.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            posts,
            notifications,
        }
    }

    /// Create a post: zero likes, no comments, now-timestamp.
    ///
    /// On success the author is notified with the fixed "post created"
    /// message. The dispatch is best-effort and at-most-once: its result is
    /// logged and then deliberately discarded, so a notification store
    /// failure never rolls back or fails the post creation.
    pub async fn create_post(
        &self,
        author_id: AccountId,
        author_role: Role,
        caption: String,
        image_ref: Option<String>,
    ) -> Result<Post, Error> {
        let post = Post::new(author_id, author_role, caption, image_ref);
        self.posts.insert(&post).await?;
        info!(post_id = %post.id, author_id = %author_id, "post created");

        let notice = Notification::post_created(author_id);
        if let Err(error) = self.notifications.insert(&notice).await {
            warn!(%error, recipient = %author_id, "notification dispatch dropped");
        }

        Ok(post)
    }

    /// Atomically add one like. Returns `false` when the post is missing;
    /// the HTTP layer turns that into a silent redirect, never a 404.
    pub async fn like_post(&self, id: PostId) -> Result<bool, Error> {
        Ok(self.posts.increment_likes(id).await?)
    }

    /// Atomically append a comment with a now-timestamp. Returns `false`
    /// when the post is missing.
    pub async fn add_comment(
        &self,
        id: PostId,
        author_name: String,
        text: String,
    ) -> Result<bool, Error> {
        let comment = Comment {
            author_name,
            text,
            created_at: Utc::now(),
        };
        Ok(self.posts.append_comment(id, comment).await?)
    }

    /// The whole feed, newest post first. Pagination is out of scope.
    pub async fn list_feed(&self) -> Result<Vec<Post>, Error> {
        Ok(self.posts.list_recent().await?)
    }
}
