//! Row structs mapping the Diesel schema onto the domain model.
//!
//! Conversions live next to the rows so each repository stays focused on the
//! queries. The password hash column stores the bcrypt string verbatim.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::account::{
    Account, AccountId, AccountName, AccountValidationError, Email, Experience, RoleProfile,
};
use crate::domain::job::{Job, JobId};
use crate::domain::notification::Notification;
use crate::domain::password::PasswordHash;
use crate::domain::post::{Comment, Post, PostId};

use super::schema::{admins, alumni, comments, experiences, jobs, notifications, posts, students};

/// Stored fields shared by all three account tables.
pub(super) struct AccountColumns {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AccountColumns {
    pub(super) fn from_account(account: &Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            name: account.name.as_ref().to_owned(),
            email: account.email.as_ref().to_owned(),
            password_hash: account.password_hash.as_stored().to_owned(),
            bio: account.bio.clone(),
            avatar_ref: account.avatar_ref.clone(),
            created_at: account.created_at,
        }
    }

    /// Rehydrate the shared columns plus a role profile into a domain
    /// account. Stored rows already passed validation on the way in, so a
    /// failure here means the row was edited outside the application.
    pub(super) fn into_account(
        self,
        profile: RoleProfile,
    ) -> Result<Account, AccountValidationError> {
        Ok(Account {
            id: AccountId::from_uuid(self.id),
            name: AccountName::new(self.name)?,
            email: Email::new(self.email)?,
            password_hash: PasswordHash::from_stored(self.password_hash),
            bio: self.bio,
            avatar_ref: self.avatar_ref,
            profile,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct AdminRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_ref: Option<String>,
    pub student_number: String,
    pub year: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = alumni)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct AlumnusRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_ref: Option<String>,
    pub batch: String,
    pub department: String,
    pub company: Option<String>,
    pub designation: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = experiences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct ExperienceRow {
    pub id: i64,
    pub alumnus_id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = experiences)]
pub(super) struct NewExperienceRow {
    pub alumnus_id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Self {
            company: row.company,
            position: row.position,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct PostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_role: String,
    pub caption: String,
    pub image_ref: Option<String>,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl PostRow {
    pub(super) fn from_post(post: &Post) -> Self {
        Self {
            id: *post.id.as_uuid(),
            author_id: *post.author_id.as_uuid(),
            author_role: post.author_role.as_tag().to_owned(),
            caption: post.caption.clone(),
            image_ref: post.image_ref.clone(),
            likes: post.likes,
            created_at: post.created_at,
        }
    }

    pub(super) fn into_post(
        self,
        comments: Vec<Comment>,
    ) -> Result<Post, AccountValidationError> {
        Ok(Post {
            id: PostId::from_uuid(self.id),
            author_id: AccountId::from_uuid(self.author_id),
            author_role: self.author_role.parse()?,
            caption: self.caption,
            image_ref: self.image_ref,
            likes: self.likes,
            comments,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct CommentRow {
    pub id: i64,
    pub post_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub(super) struct NewCommentRow {
    pub post_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            author_name: row.author_name,
            text: row.body,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl JobRow {
    pub(super) fn from_job(job: &Job) -> Self {
        Self {
            id: *job.id.as_uuid(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            apply_link: job.apply_link.clone(),
            posted_by: *job.posted_by.as_uuid(),
            created_at: job.created_at,
        }
    }
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId::from_uuid(row.id),
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            apply_link: row.apply_link,
            posted_by: AccountId::from_uuid(row.posted_by),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub(super) fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            recipient_id: *notification.recipient_id.as_uuid(),
            message: notification.message.clone(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            recipient_id: AccountId::from_uuid(row.recipient_id),
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}
