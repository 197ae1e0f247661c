//! HTTP inbound adapter exposing the browser-facing endpoints.
//!
//! Mutations arrive as urlencoded forms and answer with `303 See Other`
//! redirects; data reads return JSON.

pub mod auth;
pub mod error;
pub mod feed;
pub mod jobs;
pub mod profile;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;

/// Redirect target for successful authenticated mutations.
pub const DASHBOARD_REDIRECT: &str = "/dashboard";

/// Build the `303 See Other` response the form flow expects.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Map an empty or whitespace-only form field to `None`.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
