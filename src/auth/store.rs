//! Session storage.
//!
//! The original client kept its session in ambient browser storage under
//! three fixed keys. Here the store is an owned, injectable object with
//! explicit operations, so the client can be tested deterministically with
//! an in-memory store and embedders can plug in a persistent one.
//!
//! The three entries — access token, refresh token, serialized user profile
//! — live and die together: [`SessionStore::persist`] writes all three and
//! [`SessionStore::clear`] removes all three. A successful token refresh
//! rewrites only the access entry.

use std::fmt;
use std::sync::Mutex;

use crate::auth::session::{Session, UserProfile};

/// Storage key for the access token entry.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token entry.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the serialized user profile entry.
pub const USER_KEY: &str = "user";

/// Client-side persistence for the authenticated session.
///
/// Implementations must be safe to share across async tasks. The client
/// treats an absent access token as the logged-out state.
pub trait SessionStore: fmt::Debug + Send + Sync {
    /// Returns the stored access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Returns the stored refresh token, if any.
    fn refresh_token(&self) -> Option<String>;

    /// Returns the stored user profile, if present and well-formed.
    ///
    /// A malformed stored profile is discarded and `None` is returned; the
    /// user is then treated as logged out rather than crashing.
    fn user(&self) -> Option<UserProfile>;

    /// Writes all three entries from the given session.
    fn persist(&self, session: &Session);

    /// Overwrites only the access token entry.
    fn update_access_token(&self, access_token: &str);

    /// Removes all three entries together.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct Entries {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<String>,
}

/// In-memory [`SessionStore`].
///
/// Entries are held as raw strings, with the user profile stored serialized
/// — the same shape the original client persisted — so corruption of the
/// profile entry is representable and handled.
///
/// # Example
///
/// ```rust
/// use workforce_api::auth::{MemorySessionStore, SessionStore};
///
/// let store = MemorySessionStore::new();
/// assert!(store.access_token().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<Entries>,
}

impl MemorySessionStore {
    /// Creates an empty store. The initial state is logged-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw entry values, e.g. when restoring entries
    /// persisted elsewhere. Passing `None` leaves an entry absent.
    pub fn seed(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        user_json: Option<&str>,
    ) {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.access_token = access_token.map(ToString::to_string);
        entries.refresh_token = refresh_token.map(ToString::to_string);
        entries.user = user_json.map(ToString::to_string);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    fn user(&self) -> Option<UserProfile> {
        let mut entries = self.lock();
        let raw = entries.user.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!("Discarding malformed stored user profile: {err}");
                entries.user = None;
                None
            }
        }
    }

    fn persist(&self, session: &Session) {
        let user = serde_json::to_string(&session.user).unwrap_or_default();
        let mut entries = self.lock();
        entries.access_token = Some(session.access_token.clone());
        entries.refresh_token = Some(session.refresh_token.clone());
        entries.user = Some(user);
    }

    fn update_access_token(&self, access_token: &str) {
        self.lock().access_token = Some(access_token.to_string());
    }

    fn clear(&self) {
        let mut entries = self.lock();
        entries.access_token = None;
        entries.refresh_token = None;
        entries.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::Role;

    fn session() -> Session {
        Session::new(
            "access-1".to_string(),
            "refresh-1".to_string(),
            UserProfile {
                id: 1,
                username: "jdoe".to_string(),
                email: "jdoe@example.com".to_string(),
                first_name: "Jordan".to_string(),
                last_name: "Doe".to_string(),
                role: Role::Admin,
            },
        )
    }

    #[test]
    fn test_initial_state_is_logged_out() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_persist_writes_all_three_entries() {
        let store = MemorySessionStore::new();
        store.persist(&session());

        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(store.user().map(|u| u.email), Some("jdoe@example.com".to_string()));
    }

    #[test]
    fn test_update_access_token_leaves_other_entries() {
        let store = MemorySessionStore::new();
        store.persist(&session());
        store.update_access_token("access-2");

        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert!(store.user().is_some());
    }

    #[test]
    fn test_clear_removes_all_three_entries() {
        let store = MemorySessionStore::new();
        store.persist(&session());
        store.clear();

        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_malformed_user_entry_is_discarded() {
        let store = MemorySessionStore::new();
        store.seed(Some("access-1"), Some("refresh-1"), Some("not json"));

        assert!(store.user().is_none());
        // Entry is gone after the failed read
        assert!(store.lock().user.is_none());
        // Tokens are untouched
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemorySessionStore>();
    }
}
