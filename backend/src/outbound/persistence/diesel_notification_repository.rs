//! PostgreSQL-backed `NotificationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::account::AccountId;
use crate::domain::notification::Notification;
use crate::domain::ports::{NotificationPersistenceError, NotificationRepository};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the notification repository port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NotificationPersistenceError {
    map_pool_error(error, NotificationPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> NotificationPersistenceError {
    map_diesel_error(
        error,
        NotificationPersistenceError::query,
        NotificationPersistenceError::connection,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NotificationRow::from_notification(notification);
        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn list_for(
        &self,
        recipient: AccountId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = notifications::table
            .filter(notifications::recipient_id.eq(recipient.as_uuid()))
            .order(notifications::created_at.desc())
            .select(NotificationRow::as_select())
            .load::<NotificationRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }
}
