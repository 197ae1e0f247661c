//! Port abstraction over the three role-partitioned account stores.

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, Email, Experience, ProfileUpdate, Role};
use crate::domain::Error;

/// Persistence errors raised by account store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountPersistenceError {
    /// Store connection could not be established.
    #[error("account store connection failed: {message}")]
    Connection {
        /// Backend failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("account store query failed: {message}")]
    Query {
        /// Backend failure description.
        message: String,
    },
    /// Insert rejected by the store's per-role email uniqueness constraint.
    ///
    /// Raised when a concurrent registration wins the race between the
    /// service's uniqueness check and the insert itself.
    #[error("email already registered in this store: {message}")]
    Duplicate {
        /// Backend failure description.
        message: String,
    },
}

impl AccountPersistenceError {
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

    /// Helper for per-store email uniqueness violations.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

impl From<AccountPersistenceError> for Error {
    fn from(error: AccountPersistenceError) -> Self {
        match error {
            AccountPersistenceError::Connection { message } => Self::service_unavailable(message),
            AccountPersistenceError::Query { message } => Self::internal(message),
            AccountPersistenceError::Duplicate { .. } => Self::duplicate_email(),
        }
    }
}

/// Access to one logical account store per [`Role`].
///
/// Implementations must keep the stores independently keyed: lookups and the
/// email-uniqueness check only ever see rows of the requested role.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account by email within a single role's store.
    async fn find_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch an account by identifier within a single role's store.
    async fn find_by_id(
        &self,
        role: Role,
        id: AccountId,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Insert a freshly registered account into its role's store.
    ///
    /// Adapters must report a store-level email conflict as
    /// [`AccountPersistenceError::Duplicate`]; the uniqueness pre-check in
    /// the service races against concurrent registrations.
    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError>;

    /// Apply a partial profile mutation and return the updated account, or
    /// `None` when the account no longer exists.
    async fn update_profile(
        &self,
        role: Role,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Append an experience entry to an alumnus and return the updated
    /// account, or `None` when the account no longer exists. Only the alumni
    /// store carries experience entries.
    async fn push_experience(
        &self,
        id: AccountId,
        experience: Experience,
    ) -> Result<Option<Account>, AccountPersistenceError>;
}
