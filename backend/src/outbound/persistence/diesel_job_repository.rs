//! PostgreSQL-backed `JobRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::job::Job;
use crate::domain::ports::{JobPersistenceError, JobRepository};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::JobRow;
use super::pool::{DbPool, PoolError};
use super::schema::jobs;

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> JobPersistenceError {
    map_pool_error(error, JobPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> JobPersistenceError {
    map_diesel_error(
        error,
        JobPersistenceError::query,
        JobPersistenceError::connection,
    )
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = JobRow::from_job(job);
        diesel::insert_into(jobs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = jobs::table
            .order(jobs::created_at.desc())
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Job::from).collect())
    }
}
