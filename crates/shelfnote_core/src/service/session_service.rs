//! Session manager over the record store.
//!
//! # Responsibility
//! - Create, resume and destroy the single current-user record.
//! - Keep session state an explicit object rather than ambient globals.
//!
//! # Invariants
//! - At most one session exists; every login/register replaces it.
//! - No credential is ever verified or stored. The login flow is a
//!   documented simplification of the original client, not an auth
//!   mechanism; passwords are accepted and discarded.
//! - An unreadable session blob degrades to "anonymous", never an error.

use crate::model::user::User;
use crate::repo::record_store::{RecordStore, StoreError, SESSION_KEY};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from session persistence operations.
#[derive(Debug)]
pub enum SessionError {
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize session user: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Explicit session-store object; callers construct one and thread it
/// through, there is no process-wide session state.
pub struct SessionManager<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> SessionManager<S> {
    /// Creates a manager over the given record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Signs in and persists the derived user as the current session.
    ///
    /// No backing user database exists, so nothing is checked: the display
    /// name is derived from the email local-part and a fresh id is
    /// generated. The password is intentionally unused.
    pub fn login(&self, email: &str, _password: &str) -> SessionResult<User> {
        let email = email.trim();
        let user = User::new(display_name_from_email(email), email);
        self.persist(&user)?;
        debug!("event=session_login module=session status=ok");
        Ok(user)
    }

    /// Creates a fresh user and persists it as the current session.
    ///
    /// The password is collected by the UI but never stored or validated.
    pub fn register(&self, name: &str, email: &str, _password: &str) -> SessionResult<User> {
        let user = User::new(name.trim(), email.trim());
        self.persist(&user)?;
        debug!("event=session_register module=session status=ok");
        Ok(user)
    }

    /// Clears the current session record; idempotent.
    pub fn logout(&self) -> SessionResult<()> {
        self.store.clear(SESSION_KEY)?;
        debug!("event=session_logout module=session status=ok");
        Ok(())
    }

    /// Returns the persisted session, if any, to resume across restarts.
    pub fn current(&self) -> SessionResult<Option<User>> {
        let Some(blob) = self.store.read(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&blob) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(
                    "event=session_blob_invalid module=session status=recovered key={SESSION_KEY} error={err}"
                );
                Ok(None)
            }
        }
    }

    fn persist(&self, user: &User) -> SessionResult<()> {
        let blob = serde_json::to_string(user)?;
        self.store.write(SESSION_KEY, &blob)?;
        Ok(())
    }
}

/// Derives the stand-in display name from the email local-part.
///
/// `"bob@x.com"` becomes `"bob"`; an address without `@` is used whole.
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
