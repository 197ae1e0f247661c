//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the three account stores, the feed/notification collections). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`. Every error
//! enum converts into the transport-agnostic [`crate::domain::Error`] with
//! the same policy: connection failures are retryable
//! (`ServiceUnavailable`), query failures are internal. The account port
//! additionally maps per-store uniqueness conflicts to `DuplicateEmail` so
//! a registration losing an insert race still reports a conflict.

mod account_repository;
mod job_repository;
mod notification_repository;
mod post_repository;

pub use account_repository::{AccountPersistenceError, AccountRepository};
pub use job_repository::{JobPersistenceError, JobRepository};
pub use notification_repository::{NotificationPersistenceError, NotificationRepository};
pub use post_repository::{PostPersistenceError, PostRepository};
