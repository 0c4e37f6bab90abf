//! Session lifecycle notifications.
//!
//! The original client broadcast `tokenRefreshed` / `tokenExpired` on a
//! global event bus. Here the signal is an explicit typed channel:
//! [`ApiClient::subscribe`](crate::ApiClient::subscribe) hands out a
//! [`tokio::sync::broadcast::Receiver`] of [`SessionEvent`], so dependent
//! state can re-read the current user or redirect to login.

/// A cross-component session notification.
///
/// These are the only signals the client emits. They fire from inside the
/// request interceptor as well as from explicit refresh calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The access token was replaced after a successful refresh.
    TokenRefreshed {
        /// The new access token now in effect.
        access_token: String,
    },

    /// The session could not be refreshed; stored session data was cleared.
    TokenExpired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_cloneable_for_broadcast() {
        let event = SessionEvent::TokenRefreshed {
            access_token: "access-2".to_string(),
        };
        assert_eq!(event.clone(), event);
        assert_ne!(event, SessionEvent::TokenExpired);
    }
}
