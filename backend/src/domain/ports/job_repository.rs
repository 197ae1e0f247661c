//! Port abstraction over the job board.

use async_trait::async_trait;

use crate::domain::job::Job;
use crate::domain::Error;

/// Persistence errors raised by job store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobPersistenceError {
    /// Store connection could not be established.
    #[error("job store connection failed: {message}")]
    Connection {
        /// Backend failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("job store query failed: {message}")]
    Query {
        /// Backend failure description.
        message: String,
    },
}

impl JobPersistenceError {
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

impl From<JobPersistenceError> for Error {
    fn from(error: JobPersistenceError) -> Self {
        match error {
            JobPersistenceError::Connection { message } => Self::service_unavailable(message),
            JobPersistenceError::Query { message } => Self::internal(message),
        }
    }
}

/// Access to the shared job board.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Persist a freshly created listing.
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError>;

    /// All listings, newest first.
    async fn list_recent(&self) -> Result<Vec<Job>, JobPersistenceError>;
}
