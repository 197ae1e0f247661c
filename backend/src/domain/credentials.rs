//! Authentication primitives for the login path.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use zeroize::Zeroizing;

use super::account::{AccountValidationError, Email, Role};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("email must be a plausible address")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Role tag named none of the three stores.
    #[error("unknown role tag: {tag}")]
    UnknownRole {
        /// The tag as supplied by the caller.
        tag: String,
    },
}

/// Validated login credentials: role tag, email, and plaintext password.
///
/// ## Invariants
/// - `email` is normalised the same way the registration path normalises it,
///   so lookups hit the same row.
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    role: Role,
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        role_tag: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let role = role_tag
            .parse::<Role>()
            .map_err(|err| match err {
                AccountValidationError::UnknownRole { tag } => {
                    LoginValidationError::UnknownRole { tag }
                }
                _ => LoginValidationError::UnknownRole {
                    tag: role_tag.to_owned(),
                },
            })?;
        let email = Email::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            role,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Store selected by the role tag.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Normalised lookup address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
