//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::feed::FeedService;
use crate::domain::identity::IdentityService;
use crate::domain::jobs::JobBoard;
use crate::domain::ports::{
    AccountRepository, JobRepository, NotificationRepository, PostRepository,
};
use crate::domain::profile::ProfileService;

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: IdentityService,
    pub feed: FeedService,
    pub profiles: ProfileService,
    pub job_board: JobBoard,
    /// Read access for the dashboard's notification pane.
    pub notifications: Arc<dyn NotificationRepository>,
}

impl HttpState {
    /// Wire the domain services over one ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            posts,
            jobs,
            notifications,
        } = ports;
        Self {
            identity: IdentityService::new(accounts.clone()),
            feed: FeedService::new(posts, notifications.clone()),
            profiles: ProfileService::new(accounts),
            job_board: JobBoard::new(jobs),
            notifications,
        }
    }
}
