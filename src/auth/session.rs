//! Session and user profile types.
//!
//! A [`Session`] is the authenticated user's credential pair plus profile,
//! exactly as returned by the login endpoint. The access token is a
//! short-lived credential attached to API requests; the refresh token is a
//! longer-lived credential used solely to obtain a new access token. Both
//! are opaque strings to this SDK.

use serde::{Deserialize, Serialize};

/// The role assigned to a user account.
///
/// Roles gate what the backend allows; the SDK exposes them so callers can
/// gate their own surfaces without an extra round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Can manage companies, departments and employees.
    Manager,
    /// Read-mostly access.
    Employee,
}

impl Role {
    /// Returns `true` for roles allowed to create and modify records.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// The authenticated user's profile, as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned account id.
    pub id: u64,
    /// Account username.
    pub username: String,
    /// Login email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned role.
    pub role: Role,
}

impl UserProfile {
    /// Returns the user's full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An authenticated session: credential pair plus user profile.
///
/// Created on successful login. The access token is mutated in place on a
/// successful refresh; the entire session is destroyed on logout or on an
/// unrecoverable refresh failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived credential authorizing API requests.
    pub access_token: String,
    /// Longer-lived credential used solely to obtain a new access token.
    pub refresh_token: String,
    /// The authenticated user's profile.
    pub user: UserProfile,
}

impl Session {
    /// Creates a new session from a credential pair and profile.
    #[must_use]
    pub const fn new(access_token: String, refresh_token: String, user: UserProfile) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 7,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Doe".to_string(),
            role: Role::Manager,
        }
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let role: Role = serde_json::from_str(r#""employee""#).unwrap();
        assert_eq!(role, Role::Employee);
    }

    #[test]
    fn test_role_can_manage() {
        assert!(Role::Admin.can_manage());
        assert!(Role::Manager.can_manage());
        assert!(!Role::Employee.can_manage());
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let original = profile();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(profile().full_name(), "Jordan Doe");
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
