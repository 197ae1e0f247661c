//! PostgreSQL persistence adapters built on Diesel.
//!
//! Each repository port gets one adapter over a shared async connection
//! pool. Row mapping lives in [`models`] and the table definitions in
//! [`schema`], which must stay in lockstep with the migrations.

mod diesel_account_repository;
mod diesel_error;
mod diesel_job_repository;
mod diesel_notification_repository;
mod diesel_post_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
