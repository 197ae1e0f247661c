//! Job board: create and list, nothing else.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::AccountId;
use crate::domain::job::Job;
use crate::domain::ports::JobRepository;
use crate::domain::Error;

/// Thin service over the shared job board.
#[derive(Clone)]
pub struct JobBoard {
    jobs: Arc<dyn JobRepository>,
}

impl JobBoard {
    /// Create a new board over a job store adapter.
    pub fn new(jobs: Arc<dyn JobRepository>) -> Self {
        Self { jobs }
    }

    /// Persist a fresh listing with a now-timestamp.
    pub async fn post_job(
        &self,
        posted_by: AccountId,
        title: String,
        company: String,
        location: String,
        description: String,
        apply_link: String,
    ) -> Result<Job, Error> {
        let job = Job::new(title, company, location, description, apply_link, posted_by);
        self.jobs.insert(&job).await?;
        info!(job_id = %job.id, posted_by = %posted_by, "job listed");
        Ok(job)
    }

    /// All listings, newest first.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, Error> {
        Ok(self.jobs.list_recent().await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for job board ordering.
    use std::sync::Mutex;

    use super::*;
    use crate::domain::ports::JobPersistenceError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct StubJobRepository {
        jobs: Mutex<Vec<Job>>,
    }

    #[async_trait]
    impl JobRepository for StubJobRepository {
        async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError> {
            self.jobs.lock().expect("job lock").push(job.clone());
            Ok(())
        }

        async fn list_recent(&self) -> Result<Vec<Job>, JobPersistenceError> {
            let mut jobs = self.jobs.lock().expect("job lock").clone();
            jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(jobs)
        }
    }

    #[tokio::test]
    async fn listings_come_back_newest_first() {
        let board = JobBoard::new(Arc::new(StubJobRepository::default()));
        let poster = AccountId::random();

        let older = board
            .post_job(
                poster,
                "Backend Engineer".into(),
                "ACME".into(),
                "Remote".into(),
                "build services".into(),
                "https://acme.example/jobs/1".into(),
            )
            .await
            .expect("first listing");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = board
            .post_job(
                poster,
                "Platform Engineer".into(),
                "ACME".into(),
                "Remote".into(),
                "run services".into(),
                "https://acme.example/jobs/2".into(),
            )
            .await
            .expect("second listing");

        let listings = board.list_jobs().await.expect("list");
        assert_eq!(listings[0].id, newer.id);
        assert_eq!(listings[1].id, older.id);
    }
}
