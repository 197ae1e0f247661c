//! Job-board entity. Structurally parallel to posts; create and list only.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountId;

/// Stable job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A job listing on the shared board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Stable identifier.
    pub id: JobId,
    /// Listing title.
    pub title: String,
    /// Hiring company.
    pub company: String,
    /// Work location.
    pub location: String,
    /// Listing body.
    pub description: String,
    /// External application link.
    pub apply_link: String,
    /// Account that posted the listing.
    pub posted_by: AccountId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Construct a fresh listing with a now-timestamp.
    pub fn new(
        title: String,
        company: String,
        location: String,
        description: String,
        apply_link: String,
        posted_by: AccountId,
    ) -> Self {
        Self {
            id: JobId::random(),
            title,
            company,
            location,
            description,
            apply_link,
            posted_by,
            created_at: Utc::now(),
        }
    }
}
