//! Profile mutation: bio/employment updates for every role, experience
//! entries for alumni only.
//!
//! Every mutation returns the updated account so callers always hold a fresh
//! snapshot; nothing here keeps a second copy that could go stale.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{Account, AccountId, Experience, ProfileUpdate, Role};
use crate::domain::ports::AccountRepository;
use crate::domain::Error;

/// Applies profile mutations to the store selected by the role tag.
#[derive(Clone)]
pub struct ProfileService {
    accounts: Arc<dyn AccountRepository>,
}

impl ProfileService {
    /// Create a new service over an account store adapter.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Fetch the current account for a session's `(id, role)` pair.
    pub async fn fetch(&self, role: Role, id: AccountId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(role, id)
            .await?
            .ok_or_else(|| Error::not_found("account no longer exists"))
    }

    /// Apply a partial profile mutation and return the fresh account.
    pub async fn update_profile(
        &self,
        role: Role,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        let updated = self
            .accounts
            .update_profile(role, id, update)
            .await?
            .ok_or_else(|| Error::not_found("account no longer exists"))?;
        info!(account_id = %id, role = %role, "profile updated");
        Ok(updated)
    }

    /// Append an experience entry to an alumnus profile.
    ///
    /// Only the alumni store carries experience entries; any other role tag
    /// is a typed failure, not a silent no-op.
    pub async fn add_experience(
        &self,
        role: Role,
        id: AccountId,
        experience: Experience,
    ) -> Result<Account, Error> {
        if role != Role::Alumnus {
            return Err(Error::invalid_role(
                "experience entries are limited to alumni accounts",
            ));
        }
        let updated = self
            .accounts
            .push_experience(id, experience)
            .await?
            .ok_or_else(|| Error::not_found("account no longer exists"))?;
        info!(account_id = %id, "experience appended");
        Ok(updated)
    }
}
