//! One-way password hashing.
//!
//! Plaintext passwords are hashed with bcrypt (salted, irreversible) before
//! anything touches a store, and must never be persisted or logged. `Debug`
//! output is redacted for the same reason.

use zeroize::Zeroizing;

/// Work factor for new hashes. Matches the cost the platform has always
/// used, so existing stored hashes keep verifying.
const BCRYPT_COST: u32 = 10;

/// Fixed hash verified against when no account matches a login email, so the
/// missing-account path performs the same bcrypt work as a mismatch.
const DUMMY_HASH: &str = "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Errors raised while hashing credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The plaintext was empty.
    #[error("password must not be empty")]
    Empty,
    /// The bcrypt backend failed.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Backend failure description.
        message: String,
    },
}

/// Salted one-way hash of an account password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password for storage.
    pub fn hash(plaintext: &str) -> Result<Self, PasswordError> {
        if plaintext.is_empty() {
            return Err(PasswordError::Empty);
        }
        let plaintext = Zeroizing::new(plaintext.to_owned());
        bcrypt::hash(plaintext.as_str(), BCRYPT_COST)
            .map(Self)
            .map_err(|err| PasswordError::Hashing {
                message: err.to_string(),
            })
    }

    /// Re-wrap a hash previously produced by [`PasswordHash::hash`] and read
    /// back from a store.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Verify a plaintext candidate against this hash.
    ///
    /// A backend failure counts as a mismatch; verification never errors
    /// towards acceptance.
    pub fn verify(&self, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, &self.0).unwrap_or(false)
    }

    /// Run one verification against a constant dummy hash. Used on the
    /// missing-account login path so both failure modes cost one bcrypt
    /// comparison.
    pub fn verify_dummy(plaintext: &str) {
        let _ = bcrypt::verify(plaintext, DUMMY_HASH);
    }

    /// The stored string form, for persistence adapters only.
    pub fn as_stored(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_round_trips() {
        let hash = PasswordHash::hash("correct horse battery staple").expect("hashes");
        assert!(hash.verify("correct horse battery staple"));
        assert!(!hash.verify("wrong password"));
    }

    #[rstest]
    fn empty_password_is_rejected() {
        assert_eq!(
            PasswordHash::hash("").expect_err("empty must fail"),
            PasswordError::Empty
        );
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let hash = PasswordHash::hash("secret-value").expect("hashes");
        let rendered = format!("{hash:?}");
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains(hash.as_stored()));
    }

    #[rstest]
    fn stored_form_round_trips() {
        let hash = PasswordHash::hash("pw-123456").expect("hashes");
        let reread = PasswordHash::from_stored(hash.as_stored());
        assert!(reread.verify("pw-123456"));
    }
}
