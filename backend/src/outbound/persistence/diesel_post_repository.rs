//! PostgreSQL-backed `PostRepository`.
//!
//! Likes are incremented with a single atomic UPDATE so concurrent requests
//! never lose counts. Comments live in their own table; the serial key keeps
//! them in arrival order without a timestamp tiebreak.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::post::{Comment, Post, PostId};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, posts};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> PostPersistenceError {
    map_pool_error(error, PostPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> PostPersistenceError {
    map_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

fn decode_error(error: impl std::fmt::Display) -> PostPersistenceError {
    PostPersistenceError::query(format!("stored post failed validation: {error}"))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = PostRow::from_post(post);
        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let post_rows = posts::table
            .order(posts::created_at.desc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        let ids: Vec<Uuid> = post_rows.iter().map(|row| row.id).collect();
        let comment_rows = comments::table
            .filter(comments::post_id.eq_any(&ids))
            .order(comments::id.asc())
            .select(CommentRow::as_select())
            .load::<CommentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut grouped: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for row in comment_rows {
            grouped
                .entry(row.post_id)
                .or_default()
                .push(Comment::from(row));
        }

        post_rows
            .into_iter()
            .map(|row| {
                let comments = grouped.remove(&row.id).unwrap_or_default();
                row.into_post(comments).map_err(decode_error)
            })
            .collect()
    }

    async fn increment_likes(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(posts::table.find(*id.as_uuid()))
            .set(posts::likes.eq(posts::likes + 1))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn append_comment(
        &self,
        id: PostId,
        comment: Comment,
    ) -> Result<bool, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewCommentRow {
            post_id: *id.as_uuid(),
            author_name: comment.author_name,
            body: comment.text,
            created_at: comment.created_at,
        };
        let inserted = diesel::insert_into(comments::table)
            .values(&row)
            .execute(&mut conn)
            .await;
        match inserted {
            Ok(_) => Ok(true),
            // No such post: the FK rejects the row.
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Ok(false),
            Err(error) => Err(diesel_error(error)),
        }
    }
}
