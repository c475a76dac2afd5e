//! Session store: the single source of truth for "who is using this client
//! right now", surviving process restarts.
//!
//! The store owns the identity triple (user record, bearer token, role) and
//! its durable persistence. The triple is set and cleared atomically as one
//! unit - [`Identity`] makes the invariant structural: the `Anonymous`
//! variant carries nothing, the `Authenticated` variant carries all three
//! fields, and there is no state in between.
//!
//! Views hold a cheap [`SessionStore`] clone for reads and mutate only
//! through [`SessionStore::login`] / [`SessionStore::logout`]; identity
//! changes are published to every [`SessionStore::subscribe`]r.
//!
//! Across processes the session file is shared but unsynchronized: a logout
//! in one process does not notify another process's in-memory identity. That
//! staleness window is accepted behavior, not a defect.

pub mod storage;

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use stylehub_core::{AccountRole, Role};

use crate::api::types::UserRecord;
use storage::{SessionStorage, StorageError};

/// Fixed keys for the durably stored identity fields.
pub mod keys {
    /// Key for the serialized user record (JSON).
    pub const USER: &str = "user";

    /// Key for the raw bearer token string.
    pub const TOKEN: &str = "token";

    /// Key for the role string (`"Customer"` / `"Seller"`).
    pub const ROLE: &str = "role";
}

/// Errors that can occur when mutating the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Durable storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The user record could not be serialized for persistence.
    #[error("failed to serialize user record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Login was attempted with an empty bearer token.
    #[error("bearer token must not be empty")]
    EmptyToken,
}

/// A fully authenticated identity: all three session fields, present together.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    /// The profile record the API returned at login.
    pub user: UserRecord,
    /// Opaque bearer token, attached verbatim to authenticated requests.
    pub token: String,
    /// The account's role. Never anonymous by construction.
    pub role: AccountRole,
}

/// The principal currently using this client.
#[derive(Debug, Clone, Default)]
pub enum Identity {
    /// Nobody is logged in. No user record, no token.
    #[default]
    Anonymous,
    /// A logged-in customer or seller.
    Authenticated(AuthenticatedIdentity),
}

impl Identity {
    /// The current role, widened to include `Anonymous`.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Anonymous => Role::Anonymous,
            Self::Authenticated(auth) => match auth.role {
                AccountRole::Customer => Role::Customer,
                AccountRole::Seller => Role::Seller,
            },
        }
    }

    /// The bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(auth) => Some(&auth.token),
        }
    }

    /// The user record, if logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(auth) => Some(&auth.user),
        }
    }

    /// Whether somebody is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Injectable session state container.
///
/// Cloning is cheap (an `Arc` bump); all clones observe the same identity.
/// Construct once at process start with [`SessionStore::open`] and thread the
/// handle into the HTTP client and views.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    storage: Box<dyn SessionStorage>,
    identity: watch::Sender<Identity>,
}

impl SessionStore {
    /// Open a session store over a durable storage backend.
    ///
    /// Seeds the in-memory identity from storage. Absent, partial, or
    /// malformed persisted data falls back to [`Identity::Anonymous`] with a
    /// warning - startup never fails on bad durable state.
    #[must_use]
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let identity = rehydrate(&storage);
        Self {
            inner: Arc::new(SessionStoreInner {
                storage: Box::new(storage),
                identity: watch::Sender::new(identity),
            }),
        }
    }

    /// The current identity triple.
    #[must_use]
    pub fn current_identity(&self) -> Identity {
        self.inner.identity.borrow().clone()
    }

    /// The current role (shorthand for `current_identity().role()`).
    #[must_use]
    pub fn current_role(&self) -> Role {
        self.inner.identity.borrow().role()
    }

    /// Subscribe to identity changes (login and logout).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.inner.identity.subscribe()
    }

    /// Store a new identity triple and persist it durably.
    ///
    /// Persists all three fields as one atomic write, then publishes the new
    /// identity to subscribers. The token and user record are stored as the
    /// API returned them - no structural validation, no expiry check.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or persistence fails. On
    /// failure the in-memory identity is left unchanged.
    pub fn login(
        &self,
        user: UserRecord,
        token: String,
        role: AccountRole,
    ) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let user_json = serde_json::to_string(&user)?;
        self.inner.storage.put_all(&[
            (keys::USER, &user_json),
            (keys::TOKEN, &token),
            (keys::ROLE, role.as_str()),
        ])?;

        self.inner
            .identity
            .send_replace(Identity::Authenticated(AuthenticatedIdentity {
                user,
                token,
                role,
            }));
        Ok(())
    }

    /// Clear the identity triple and erase durable storage.
    ///
    /// Wipes the entire storage namespace, not just the identity keys - the
    /// namespace holds nothing else, and a logout must leave no residue.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be erased. On failure the
    /// in-memory identity is left unchanged.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.inner.storage.clear()?;
        self.inner.identity.send_replace(Identity::Anonymous);
        Ok(())
    }
}

/// Rebuild the identity from durable storage at startup.
fn rehydrate(storage: &dyn SessionStorage) -> Identity {
    let read = |key: &str| match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read session storage");
            None
        }
    };

    let (Some(user_json), Some(token), Some(role_str)) =
        (read(keys::USER), read(keys::TOKEN), read(keys::ROLE))
    else {
        return Identity::Anonymous;
    };

    if token.is_empty() {
        tracing::warn!("Discarding persisted session with empty token");
        return Identity::Anonymous;
    }

    let role = match AccountRole::from_str(&role_str) {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding persisted session with unknown role");
            return Identity::Anonymous;
        }
    };

    let user = match serde_json::from_str::<UserRecord>(&user_json) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding persisted session with malformed user record");
            return Identity::Anonymous;
        }
    };

    Identity::Authenticated(AuthenticatedIdentity { user, token, role })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::storage::MemoryStorage;
    use super::*;
    use stylehub_core::UserId;

    fn test_user(id: &str) -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": "Priya",
            "email": "priya@example.com",
        }))
        .unwrap()
    }

    #[test]
    fn test_login_then_current_identity() {
        let store = SessionStore::open(MemoryStorage::new());
        store
            .login(test_user("u1"), "tok-1".into(), AccountRole::Customer)
            .unwrap();

        let identity = store.current_identity();
        assert_eq!(identity.role(), Role::Customer);
        assert_eq!(identity.token(), Some("tok-1"));
        assert_eq!(identity.user().unwrap().id, UserId::new("u1"));
    }

    #[test]
    fn test_login_rejects_empty_token() {
        let store = SessionStore::open(MemoryStorage::new());
        let result = store.login(test_user("u1"), String::new(), AccountRole::Customer);
        assert!(matches!(result, Err(SessionError::EmptyToken)));
        assert!(!store.current_identity().is_authenticated());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = MemoryStorage::new();
        let store = SessionStore::open(storage);
        store
            .login(test_user("u1"), "tok-1".into(), AccountRole::Seller)
            .unwrap();
        store.logout().unwrap();

        assert!(matches!(store.current_identity(), Identity::Anonymous));
        assert_eq!(store.current_role(), Role::Anonymous);
    }

    #[test]
    fn test_rehydrates_from_storage() {
        let storage = MemoryStorage::new();
        let store = SessionStore::open(storage);
        store
            .login(test_user("u2"), "tok-2".into(), AccountRole::Seller)
            .unwrap();

        // Simulate a restart over the same durable namespace.
        let user_json = serde_json::to_string(&test_user("u2")).unwrap();
        let storage = MemoryStorage::seeded(&[
            (keys::USER, &user_json),
            (keys::TOKEN, "tok-2"),
            (keys::ROLE, "Seller"),
        ]);
        let restarted = SessionStore::open(storage);

        let identity = restarted.current_identity();
        assert_eq!(identity.role(), Role::Seller);
        assert_eq!(identity.token(), Some("tok-2"));
        assert_eq!(identity.user().unwrap().id, UserId::new("u2"));
    }

    #[test]
    fn test_partial_storage_is_anonymous() {
        let storage = MemoryStorage::seeded(&[(keys::TOKEN, "tok-1")]);
        let store = SessionStore::open(storage);
        assert!(matches!(store.current_identity(), Identity::Anonymous));
    }

    #[test]
    fn test_corrupt_user_record_is_anonymous() {
        let storage = MemoryStorage::seeded(&[
            (keys::USER, "{definitely not json"),
            (keys::TOKEN, "tok-1"),
            (keys::ROLE, "Customer"),
        ]);
        let store = SessionStore::open(storage);
        assert!(matches!(store.current_identity(), Identity::Anonymous));
    }

    #[test]
    fn test_unknown_role_is_anonymous() {
        let user_json = serde_json::to_string(&test_user("u1")).unwrap();
        let storage = MemoryStorage::seeded(&[
            (keys::USER, &user_json),
            (keys::TOKEN, "tok-1"),
            (keys::ROLE, "Admin"),
        ]);
        let store = SessionStore::open(storage);
        assert!(matches!(store.current_identity(), Identity::Anonymous));
    }

    #[test]
    fn test_empty_token_in_storage_is_anonymous() {
        let user_json = serde_json::to_string(&test_user("u1")).unwrap();
        let storage = MemoryStorage::seeded(&[
            (keys::USER, &user_json),
            (keys::TOKEN, ""),
            (keys::ROLE, "Customer"),
        ]);
        let store = SessionStore::open(storage);
        assert!(matches!(store.current_identity(), Identity::Anonymous));
    }

    #[test]
    fn test_subscribers_observe_login_and_logout() {
        let store = SessionStore::open(MemoryStorage::new());
        let mut rx = store.subscribe();

        store
            .login(test_user("u1"), "tok-1".into(), AccountRole::Customer)
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().role(), Role::Customer);

        store.logout().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().role(), Role::Anonymous);
    }
}
