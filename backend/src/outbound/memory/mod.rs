//! In-memory adapters for the domain ports.
//!
//! Used when no database is configured and by handler tests. Mutations run
//! behind a mutex, giving the same atomic like/comment guarantees the SQL
//! adapters get from single-statement updates.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::account::{Account, AccountId, Email, Experience, ProfileUpdate, Role, RoleProfile};
use crate::domain::job::Job;
use crate::domain::notification::Notification;
use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, JobPersistenceError, JobRepository,
    NotificationPersistenceError, NotificationRepository, PostPersistenceError, PostRepository,
};
use crate::domain::post::{Comment, Post, PostId};

/// Three role-partitioned account stores behind one mutex.
#[derive(Default)]
pub struct MemoryAccountRepository {
    stores: Mutex<HashMap<(Role, String), Account>>,
}

impl MemoryAccountRepository {
    fn with_account<T>(
        &self,
        id: AccountId,
        apply: impl FnOnce(&mut Account) -> T,
    ) -> Option<T> {
        let mut stores = self.stores.lock().unwrap_or_else(|poison| {
            // A panicked writer leaves test-only state; the data is still
            // structurally valid.
            poison.into_inner()
        });
        stores
            .values_mut()
            .find(|account| account.id == id)
            .map(apply)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(Role, String), Account>> {
        self.stores
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_email(
        &self,
        role: Role,
        email: &Email,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self.lock().get(&(role, email.as_ref().to_owned())).cloned())
    }

    async fn find_by_id(
        &self,
        role: Role,
        id: AccountId,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self
            .lock()
            .values()
            .find(|account| account.role() == role && account.id == id)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        let mut stores = self.lock();
        let key = (account.role(), account.email.as_ref().to_owned());
        if stores.contains_key(&key) {
            return Err(AccountPersistenceError::duplicate(format!(
                "{} already registered as {}",
                account.email,
                account.role()
            )));
        }
        stores.insert(key, account.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        role: Role,
        id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut stores = self.lock();
        let Some(account) = stores
            .values_mut()
            .find(|account| account.role() == role && account.id == id)
        else {
            return Ok(None);
        };
        if let Some(bio) = update.bio {
            account.bio = Some(bio);
        }
        if let Some(avatar_ref) = update.avatar_ref {
            account.avatar_ref = Some(avatar_ref);
        }
        if let RoleProfile::Alumnus {
            company,
            designation,
            ..
        } = &mut account.profile
        {
            if update.company.is_some() {
                *company = update.company;
            }
            if update.designation.is_some() {
                *designation = update.designation;
            }
        }
        Ok(Some(account.clone()))
    }

    async fn push_experience(
        &self,
        id: AccountId,
        experience: Experience,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self.with_account(id, |account| {
            if let RoleProfile::Alumnus {
                experience: entries,
                ..
            } = &mut account.profile
            {
                entries.push(experience);
            }
            account.clone()
        }))
    }
}

/// Posts with embedded comments, insertion-ordered.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPostRepository {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        self.posts
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        self.lock().push(post.clone());
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let mut posts = self.lock().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn increment_likes(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        let mut posts = self.lock();
        match posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.likes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_comment(
        &self,
        id: PostId,
        comment: Comment,
    ) -> Result<bool, PostPersistenceError> {
        let mut posts = self.lock();
        match posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.comments.push(comment);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Job listings, newest first on read.
#[derive(Default)]
pub struct MemoryJobRepository {
    jobs: Mutex<Vec<Job>>,
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError> {
        self.jobs
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(job.clone());
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}

/// Notifications, newest first on read.
#[derive(Default)]
pub struct MemoryNotificationRepository {
    notices: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationPersistenceError> {
        self.notices
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(notification.clone());
        Ok(())
    }

    async fn list_for(
        &self,
        recipient: AccountId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let mut notices: Vec<Notification> = self
            .notices
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .iter()
            .filter(|notice| notice.recipient_id == recipient)
            .cloned()
            .collect();
        notices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notices)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory adapters' ordering semantics.
    use super::*;
    use crate::domain::account::{AccountName, Role};
    use crate::domain::password::PasswordHash;
    use chrono::Utc;

    fn student(email: &str) -> Account {
        Account {
            id: AccountId::random(),
            name: AccountName::new("Test Student").expect("valid name"),
            email: Email::new(email).expect("valid email"),
            password_hash: PasswordHash::from_stored("$2b$10$stub"),
            bio: None,
            avatar_ref: None,
            profile: RoleProfile::Student {
                student_number: "S-1".into(),
                year: "1".into(),
                department: "CS".into(),
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn account_lookup_is_partitioned_by_role() {
        let repository = MemoryAccountRepository::default();
        let account = student("ada@campus.edu");
        repository.insert(&account).await.expect("insert");

        let email = Email::new("ada@campus.edu").expect("email");
        let hit = repository
            .find_by_email(Role::Student, &email)
            .await
            .expect("lookup");
        assert_eq!(hit.map(|found| found.id), Some(account.id));

        let miss = repository
            .find_by_email(Role::Alumnus, &email)
            .await
            .expect("lookup");
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_within_one_store() {
        let repository = MemoryAccountRepository::default();
        let first = student("ada@campus.edu");
        repository.insert(&first).await.expect("first insert");

        let rival = student("ada@campus.edu");
        let err = repository
            .insert(&rival)
            .await
            .expect_err("same store insert must fail");
        assert!(matches!(err, AccountPersistenceError::Duplicate { .. }));

        // The winning registration is untouched by the losing one.
        let email = Email::new("ada@campus.edu").expect("email");
        let stored = repository
            .find_by_email(Role::Student, &email)
            .await
            .expect("lookup")
            .expect("account");
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn comments_stay_in_insertion_order() {
        let repository = MemoryPostRepository::default();
        let post = Post::new(AccountId::random(), Role::Student, "hello".into(), None);
        repository.insert(&post).await.expect("insert");

        for text in ["one", "two", "three"] {
            let appended = repository
                .append_comment(
                    post.id,
                    Comment {
                        author_name: "Ada".into(),
                        text: text.into(),
                        created_at: Utc::now(),
                    },
                )
                .await
                .expect("append");
            assert!(appended);
        }

        let posts = repository.list_recent().await.expect("list");
        let texts: Vec<&str> = posts[0]
            .comments
            .iter()
            .map(|comment| comment.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn missing_post_mutations_report_false() {
        let repository = MemoryPostRepository::default();
        let missing = PostId::random();
        assert!(!repository.increment_likes(missing).await.expect("like"));
        assert!(!repository
            .append_comment(
                missing,
                Comment {
                    author_name: "Ada".into(),
                    text: "ghost".into(),
                    created_at: Utc::now(),
                },
            )
            .await
            .expect("comment"));
    }
}
