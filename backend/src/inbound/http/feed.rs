//! Dashboard read and the feed mutation handlers.
//!
//! The dashboard is the one JSON read in the surface: fresh account data,
//! the full feed, the job board, and the caller's notifications. The
//! mutations are form posts answered with redirects.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::account::{Account, RoleProfile};
use crate::domain::job::Job;
use crate::domain::notification::Notification;
use crate::domain::post::{Post, PostId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{blank_to_none, see_other, ApiResult, DASHBOARD_REDIRECT};

/// Account data exposed to the dashboard. The password hash never leaves
/// the domain.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: crate::domain::account::AccountId,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_ref: Option<String>,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name.as_ref().to_owned(),
            email: account.email.as_ref().to_owned(),
            bio: account.bio,
            avatar_ref: account.avatar_ref,
            profile: account.profile,
        }
    }
}

/// Everything the dashboard page renders, in one read.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub account: AccountView,
    pub posts: Vec<Post>,
    pub jobs: Vec<Job>,
    pub notifications: Vec<Notification>,
}

/// Post creation form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePostForm {
    pub caption: String,
    /// Opaque reference path to an already-uploaded image.
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// Comment form.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommentForm {
    pub text: String,
}

/// Aggregate dashboard read for the authenticated account.
///
/// Account data is re-fetched from the store on every call, so a profile
/// update is visible on the next read without touching the session.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 303, description = "No session; redirect to login")
    ),
    tags = ["feed"]
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let (account_id, role) = session.require_authenticated()?;
    let account = state.profiles.fetch(role, account_id).await?;
    let posts = state.feed.list_feed().await?;
    let jobs = state.job_board.list_jobs().await?;
    let notifications = state.notifications.list_for(account_id).await?;
    Ok(HttpResponse::Ok().json(DashboardResponse {
        account: account.into(),
        posts,
        jobs,
        notifications,
    }))
}

/// Create a post and notify its author.
#[utoipa::path(
    post,
    path = "/post/create",
    request_body = CreatePostForm,
    responses(
        (status = 303, description = "Post created; redirect to the dashboard"),
        (status = 400, description = "Blank caption", body = crate::domain::Error)
    ),
    tags = ["feed"]
)]
#[post("/post/create")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CreatePostForm>,
) -> ApiResult<HttpResponse> {
    let (account_id, role) = session.require_authenticated()?;
    let form = form.into_inner();
    if form.caption.trim().is_empty() {
        return Err(crate::domain::Error::invalid_request(
            "caption must not be empty",
        ));
    }
    state
        .feed
        .create_post(account_id, role, form.caption, blank_to_none(form.image_ref))
        .await?;
    Ok(see_other(DASHBOARD_REDIRECT))
}

/// Add one like to a post.
///
/// A missing or unparseable post id redirects silently; the post may have
/// been deleted between render and click, and the browser flow has nowhere
/// to surface a 404.
#[utoipa::path(
    post,
    path = "/post/{id}/like",
    params(("id" = String, Path, description = "Post identifier")),
    responses((status = 303, description = "Redirect to the dashboard")),
    tags = ["feed"]
)]
#[post("/post/{id}/like")]
pub async fn like_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_authenticated()?;
    if let Some(post_id) = PostId::parse(&path.into_inner()) {
        state.feed.like_post(post_id).await?;
    }
    Ok(see_other(DASHBOARD_REDIRECT))
}

/// Append a comment to a post. Missing posts redirect silently, like likes.
#[utoipa::path(
    post,
    path = "/post/{id}/comment",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = CommentForm,
    responses(
        (status = 303, description = "Redirect to the dashboard"),
        (status = 400, description = "Blank comment", body = crate::domain::Error)
    ),
    tags = ["feed"]
)]
#[post("/post/{id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let (account_id, role) = session.require_authenticated()?;
    let form = form.into_inner();
    if form.text.trim().is_empty() {
        return Err(crate::domain::Error::invalid_request(
            "comment must not be empty",
        ));
    }
    if let Some(post_id) = PostId::parse(&path.into_inner()) {
        let account = state.profiles.fetch(role, account_id).await?;
        state
            .feed
            .add_comment(post_id, account.name.as_ref().to_owned(), form.text)
            .await?;
    }
    Ok(see_other(DASHBOARD_REDIRECT))
}
