//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries exactly two values: the account id and the role tag
//! selecting its store. Handlers re-fetch account data on every request, so
//! the session can never serve a stale profile snapshot.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::account::{AccountId, Role};
use crate::domain::Error;

pub(crate) const ACCOUNT_ID_KEY: &str = "account_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist(&self, account_id: AccountId, role: Role) -> Result<(), Error> {
        self.0
            .insert(ACCOUNT_ID_KEY, account_id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, role.as_tag()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Destroy the session, clearing the cookie state.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current identity from the session, if present and valid.
    ///
    /// Tampered or unparseable values are treated as an absent session so
    /// the caller lands on the login redirect rather than a 500.
    pub fn current(&self) -> Result<Option<(AccountId, Role)>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(raw_role)) = (read(ACCOUNT_ID_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        match (AccountId::parse(&raw_id), raw_role.parse::<Role>()) {
            (Ok(id), Ok(role)) => Ok(Some((id, role))),
            (id, role) => {
                tracing::warn!(
                    id_valid = id.is_ok(),
                    role_valid = role.is_ok(),
                    "invalid identity in session cookie"
                );
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or redirect to the login page.
    pub fn require_authenticated(&self) -> Result<(AccountId, Role), Error> {
        self.current()?
            .ok_or_else(|| Error::unauthenticated("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
