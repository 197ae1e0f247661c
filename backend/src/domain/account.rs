//! Role-partitioned account model.
//!
//! Accounts live in exactly one of three stores selected by [`Role`]. Email
//! uniqueness is enforced per store, never globally: the same address may
//! legally exist once as an administrator, once as a student, and once as an
//! alumnus.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::PasswordHash;

/// Validation errors returned by account value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Identifier string was not a UUID.
    #[error("account id must be a valid UUID")]
    InvalidId,
    /// Display name was blank after trimming.
    #[error("name must not be empty")]
    EmptyName,
    /// Display name exceeded the storage limit.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Email was blank or missing an `@`.
    #[error("email must be a plausible address")]
    InvalidEmail,
    /// Role tag named none of the three stores.
    #[error("unknown role tag: {tag}")]
    UnknownRole {
        /// The tag as supplied by the caller.
        tag: String,
    },
}

/// Role tag selecting one of the three account stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Institutional administrator.
    Admin,
    /// Enrolled student.
    Student,
    /// Graduated alumnus.
    Alumnus,
}

impl Role {
    /// Wire-level tag, matching the values the login and register forms post.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
            Self::Alumnus => "Alumni",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Role {
    type Err = AccountValidationError;

    /// Exhaustive role dispatch; anything outside the three stores is a
    /// typed failure, never a silent default.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Admin" | "admin" => Ok(Self::Admin),
            "Student" | "student" => Ok(Self::Student),
            "Alumni" | "alumni" | "Alumnus" | "alumnus" => Ok(Self::Alumnus),
            other => Err(AccountValidationError::UnknownRole {
                tag: other.to_owned(),
            }),
        }
    }
}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from string form.
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, unique within a single role's store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an address: trimmed and lowercased, with a
    /// minimal shape check. Stricter validation belongs to the mail system.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        let Some((local, host)) = normalised.split_once('@') else {
            return Err(AccountValidationError::InvalidEmail);
        };
        if local.is_empty() || host.is_empty() {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Human-readable account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

/// Maximum accepted length for an account name.
pub const ACCOUNT_NAME_MAX: usize = 80;

impl AccountName {
    /// Validate and construct a name from raw input.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let name = raw.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        if trimmed.chars().count() > ACCOUNT_NAME_MAX {
            return Err(AccountValidationError::NameTooLong {
                max: ACCOUNT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for AccountName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountName> for String {
    fn from(value: AccountName) -> Self {
        value.0
    }
}

/// A work-history entry on an alumnus profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Employer name.
    pub company: String,
    /// Role held.
    pub position: String,
    /// Free-form start marker (the profile form posts plain text).
    pub start_date: String,
    /// Free-form end marker; empty means current.
    pub end_date: Option<String>,
    /// Description of the engagement.
    pub description: String,
}

/// Role-specific profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all_fields = "camelCase")]
pub enum RoleProfile {
    /// Administrators carry no extra profile fields.
    Admin,
    /// Enrolment details for students.
    Student {
        /// Institutional student number.
        student_number: String,
        /// Year of study.
        year: String,
        /// Department of enrolment.
        department: String,
    },
    /// Graduation and employment details for alumni.
    Alumnus {
        /// Graduation batch.
        batch: String,
        /// Department graduated from.
        department: String,
        /// Current employer, if shared.
        company: Option<String>,
        /// Current job title, if shared.
        designation: Option<String>,
        /// Work history, append-only in scope.
        experience: Vec<Experience>,
    },
}

impl RoleProfile {
    /// The store this profile shape belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Student { .. } => Role::Student,
            Self::Alumnus { .. } => Role::Alumnus,
        }
    }
}

/// A stored identity in exactly one role-partitioned store.
///
/// Never hard-deleted in scope; mutated only via profile update and
/// experience append.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Stable identifier within the store.
    pub id: AccountId,
    /// Display name.
    pub name: AccountName,
    /// Address, unique within this account's store.
    pub email: Email,
    /// One-way salted credential hash. Plaintext is never stored.
    pub password_hash: PasswordHash,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Opaque reference path to an uploaded avatar.
    pub avatar_ref: Option<String>,
    /// Role-specific fields; also determines the store.
    pub profile: RoleProfile,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The role tag implied by the profile shape.
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Validated registration input for one store.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    /// Display name.
    pub name: AccountName,
    /// Address to register, checked for per-store uniqueness.
    pub email: Email,
    /// Role-specific fields; selects the target store.
    pub profile: RoleProfile,
}

/// Partial profile mutation applied by the profile update operation.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Replacement biography.
    pub bio: Option<String>,
    /// Replacement employer (alumni and students with placements).
    pub company: Option<String>,
    /// Replacement job title.
    pub designation: Option<String>,
    /// Replacement avatar reference path.
    pub avatar_ref: Option<String>,
}
