//! Role-polymorphic identity resolution: credential verification and
//! registration against the store selected by the role tag.

use std::sync::Arc;

use tracing::info;

use chrono::Utc;

use crate::domain::account::{Account, AccountDraft, AccountId, Email, Role};
use crate::domain::credentials::LoginCredentials;
use crate::domain::password::PasswordHash;
use crate::domain::ports::AccountRepository;
use crate::domain::Error;

/// Resolves a role tag plus credentials to a verified account, and registers
/// new accounts into the store their role selects.
#[derive(Clone)]
pub struct IdentityService {
    accounts: Arc<dyn AccountRepository>,
}

impl IdentityService {
    /// Create a new service over an account store adapter.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Verify credentials against the store selected by the role tag.
    ///
    /// Missing account and wrong password collapse into one
    /// `InvalidCredentials` outcome so the response cannot be used to
    /// enumerate registered emails. The missing-account path still performs
    /// one hash comparison, keeping both failures at comparable cost.
    pub async fn resolve_and_verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Account, Error> {
        let account = self
            .accounts
            .find_by_email(credentials.role(), credentials.email())
            .await?;

        let Some(account) = account else {
            PasswordHash::verify_dummy(credentials.password());
            return Err(Error::invalid_credentials());
        };

        if !account.password_hash.verify(credentials.password()) {
            return Err(Error::invalid_credentials());
        }

        info!(role = %account.role(), account_id = %account.id, "login verified");
        Ok(account)
    }

    /// Register a new account in the store its profile shape selects.
    ///
    /// The email must be unused *within that store*; the same address may
    /// already exist under a different role. Plaintext is hashed before the
    /// account is assembled and never stored or logged.
    pub async fn register(&self, draft: AccountDraft, password: &str) -> Result<Account, Error> {
        let role = draft.profile.role();

        let existing = self.accounts.find_by_email(role, &draft.email).await?;
        if existing.is_some() {
            return Err(Error::duplicate_email());
        }

        let password_hash = PasswordHash::hash(password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let account = Account {
            id: AccountId::random(),
            name: draft.name,
            email: draft.email,
            password_hash,
            bio: None,
            avatar_ref: None,
            profile: draft.profile,
            created_at: Utc::now(),
        };

        self.accounts.insert(&account).await?;
        info!(role = %role, account_id = %account.id, "account registered");
        Ok(account)
    }

    /// Demo-only password reset lookup: reports whether the email exists in
    /// the selected store. No reset token is ever issued.
    pub async fn forgot_password_message(
        &self,
        role: Role,
        email: &Email,
    ) -> Result<&'static str, Error> {
        let account = self.accounts.find_by_email(role, email).await?;
        Ok(if account.is_some() {
            "Password reset link sent (demo)"
        } else {
            "No account found"
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identity resolution and registration.
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::domain::account::{
        AccountName, AccountValidationError, Email, Experience, ProfileUpdate, Role, RoleProfile,
    };
    use crate::domain::ports::AccountPersistenceError;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use rstest::rstest;

    #[derive(Default)]
    struct StubAccountRepository {
        // One map per store, keyed by normalised email.
        stores: Mutex<HashMap<(Role, String), Account>>,
        find_failure: Mutex<Option<AccountPersistenceError>>,
        insert_failure: Mutex<Option<AccountPersistenceError>>,
    }

    impl StubAccountRepository {
        fn set_find_failure(&self, failure: AccountPersistenceError) {
            *self.find_failure.lock().expect("failure lock") = Some(failure);
        }

        fn set_insert_failure(&self, failure: AccountPersistenceError) {
            *self.insert_failure.lock().expect("failure lock") = Some(failure);
        }
    }

    #[async_trait]
    impl crate::domain::ports::AccountRepository for StubAccountRepository {
        async fn find_by_email(
            &self,
            role: Role,
            email: &Email,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            if let Some(failure) = self.find_failure.lock().expect("failure lock").clone() {
                return Err(failure);
            }
            Ok(self
                .stores
                .lock()
                .expect("store lock")
                .get(&(role, email.as_ref().to_owned()))
                .cloned())
        }

        async fn find_by_id(
            &self,
            role: Role,
            id: AccountId,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            Ok(self
                .stores
                .lock()
                .expect("store lock")
                .values()
                .find(|account| account.role() == role && account.id == id)
                .cloned())
        }

        async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
            if let Some(failure) = self.insert_failure.lock().expect("failure lock").clone() {
                return Err(failure);
            }
            self.stores.lock().expect("store lock").insert(
                (account.role(), account.email.as_ref().to_owned()),
                account.clone(),
            );
            Ok(())
        }

        async fn update_profile(
            &self,
            _role: Role,
            _id: AccountId,
            _update: ProfileUpdate,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            Ok(None)
        }

        async fn push_experience(
            &self,
            _id: AccountId,
            _experience: Experience,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            Ok(None)
        }
    }

    fn draft(role: Role, email: &str) -> AccountDraft {
        let profile = match role {
            Role::Admin => RoleProfile::Admin,
            Role::Student => RoleProfile::Student {
                student_number: "S-100".into(),
                year: "3".into(),
                department: "CS".into(),
            },
            Role::Alumnus => RoleProfile::Alumnus {
                batch: "2019".into(),
                department: "CS".into(),
                company: None,
                designation: None,
                experience: Vec::new(),
            },
        };
        AccountDraft {
            name: AccountName::new("Ada Lovelace").expect("valid name"),
            email: Email::new(email).expect("valid email"),
            profile,
        }
    }

    fn service() -> (IdentityService, Arc<StubAccountRepository>) {
        let repository = Arc::new(StubAccountRepository::default());
        (IdentityService::new(repository.clone()), repository)
    }

    fn credentials(role_tag: &str, email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(role_tag, email, password).expect("valid credentials")
    }

    #[tokio::test]
    async fn duplicate_email_fails_within_one_store_only() {
        let (service, _repository) = service();

        service
            .register(draft(Role::Student, "ada@campus.edu"), "pw-123456")
            .await
            .expect("first registration succeeds");

        let err = service
            .register(draft(Role::Student, "ada@campus.edu"), "pw-123456")
            .await
            .expect_err("same store duplicate must fail");
        assert_eq!(err.code(), ErrorCode::DuplicateEmail);

        // The same address is free in every other store.
        service
            .register(draft(Role::Alumnus, "ada@campus.edu"), "pw-123456")
            .await
            .expect("other store registration succeeds");
        service
            .register(draft(Role::Admin, "ada@campus.edu"), "pw-123456")
            .await
            .expect("third store registration succeeds");
    }

    #[tokio::test]
    async fn losing_an_insert_race_still_reports_a_duplicate() {
        let (service, repository) = service();
        // A concurrent registration slipped in between the uniqueness check
        // and the insert; the store rejects the row.
        repository.set_insert_failure(AccountPersistenceError::duplicate(
            "duplicate key value violates unique constraint",
        ));

        let err = service
            .register(draft(Role::Student, "ada@campus.edu"), "pw-123456")
            .await
            .expect_err("losing insert must fail");
        assert_eq!(err.code(), ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn registered_plaintext_is_hashed_not_stored() {
        let (service, repository) = service();

        let account = service
            .register(draft(Role::Admin, "root@campus.edu"), "hunter2-long")
            .await
            .expect("registration succeeds");

        assert_ne!(account.password_hash.as_stored(), "hunter2-long");
        assert!(account.password_hash.verify("hunter2-long"));
        let stored = repository
            .find_by_id(Role::Admin, account.id)
            .await
            .expect("lookup")
            .expect("stored account");
        assert!(stored.password_hash.verify("hunter2-long"));
    }

    #[tokio::test]
    async fn login_succeeds_with_matching_role_and_credentials() {
        let (service, _repository) = service();
        let registered = service
            .register(draft(Role::Student, "bob@campus.edu"), "pw-123456")
            .await
            .expect("registration succeeds");

        let account = service
            .resolve_and_verify(&credentials("Student", "bob@campus.edu", "pw-123456"))
            .await
            .expect("login succeeds");
        assert_eq!(account.id, registered.id);
        assert_eq!(account.role(), Role::Student);
    }

    #[rstest]
    // Wrong password and wrong role (account lives in another store) must be
    // indistinguishable from an unknown email.
    #[case("Student", "bob@campus.edu", "wrong-password")]
    #[case("Alumni", "bob@campus.edu", "pw-123456")]
    #[case("Student", "nobody@campus.edu", "pw-123456")]
    #[tokio::test]
    async fn login_failures_share_one_outcome(
        #[case] role: &str,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let (service, _repository) = service();
        service
            .register(draft(Role::Student, "bob@campus.edu"), "pw-123456")
            .await
            .expect("registration succeeds");

        let err = service
            .resolve_and_verify(&credentials(role, email, password))
            .await
            .expect_err("login must fail");
        assert_eq!(err, Error::invalid_credentials());
    }

    #[tokio::test]
    async fn unknown_role_tag_is_rejected_before_any_lookup() {
        let err = LoginCredentials::try_from_parts("Faculty", "a@b.c", "pw")
            .expect_err("unknown tag must fail");
        assert!(matches!(
            err,
            crate::domain::credentials::LoginValidationError::UnknownRole { .. }
        ));
        // And the account layer agrees on the taxonomy.
        assert!(matches!(
            "Faculty".parse::<Role>(),
            Err(AccountValidationError::UnknownRole { .. })
        ));
    }

    #[tokio::test]
    async fn store_failures_surface_as_service_unavailable() {
        let (service, repository) = service();
        repository.set_find_failure(AccountPersistenceError::connection("database unavailable"));

        let err = service
            .resolve_and_verify(&credentials("Admin", "root@campus.edu", "pw-123456"))
            .await
            .expect_err("store failure must surface");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn forgot_password_reports_demo_messages() {
        let (service, _repository) = service();
        service
            .register(draft(Role::Alumnus, "eve@campus.edu"), "pw-123456")
            .await
            .expect("registration succeeds");

        let hit = service
            .forgot_password_message(Role::Alumnus, &Email::new("eve@campus.edu").expect("email"))
            .await
            .expect("lookup succeeds");
        assert_eq!(hit, "Password reset link sent (demo)");

        let miss = service
            .forgot_password_message(Role::Student, &Email::new("eve@campus.edu").expect("email"))
            .await
            .expect("lookup succeeds");
        assert_eq!(miss, "No account found");
    }
}
