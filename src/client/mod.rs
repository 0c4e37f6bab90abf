//! HTTP client with session interception for the Workforce API.
//!
//! This module provides the [`ApiClient`] type. Every API call funnels
//! through its request interceptor, which attaches bearer credentials,
//! performs at most one transparent refresh-and-retry when a request is
//! rejected with 401, and broadcasts session lifecycle events. Callers
//! never see tokens; they call the domain methods in
//! [`resources`](crate::resources) and the auth methods here.
//!
//! # Session state machine
//!
//! Per logical session: `ANONYMOUS` (no stored tokens) → `AUTHENTICATED`
//! (valid access token) → `REFRESHING` (one in-flight refresh) → back to
//! `AUTHENTICATED`, or to `ANONYMOUS` when the refresh is refused. Refreshes
//! are single-flight: concurrent 401s share one refresh call, the rest wait
//! on its result and retry with the token it produced.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, Mutex};

use crate::auth::{MemorySessionStore, Session, SessionEvent, SessionStore, UserProfile};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capacity of the session event channel. Slow subscribers that fall more
/// than this many events behind will observe a lagged receive.
const EVENT_CHANNEL_CAPACITY: usize = 16;

const LOGIN_FALLBACK: &str = "Login failed";
const SIGNUP_FALLBACK: &str = "Signup failed";
const LOGOUT_FALLBACK: &str = "Logout failed";
const REFRESH_FALLBACK: &str = "Token refresh failed";
const SESSION_EXPIRED: &str = "Session expired";

/// Response body of `POST /api/accounts/login/`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    user: UserProfile,
}

/// Response body of `POST /api/accounts/token/refresh/`.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Response body of `POST /api/accounts/signup/`.
#[derive(Debug, Deserialize)]
struct SignupResponse {
    user: UserProfile,
}

/// Payload for registering a new account.
#[derive(Clone, Debug, Serialize)]
pub struct NewAccount {
    /// Account username.
    pub username: String,
    /// Login email address.
    pub email: String,
    /// Password (minimum 8 characters).
    pub password: String,
    /// Password confirmation; must match `password`.
    pub password_confirm: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Requested role.
    pub role: crate::auth::Role,
}

/// Authenticated client for the Workforce Management REST API.
///
/// The client owns the HTTP connection pool, the injectable
/// [`SessionStore`], and the session event channel. It is cheap to share
/// behind an [`Arc`] and safe to use from many tasks at once.
///
/// # Example
///
/// ```rust,ignore
/// use workforce_api::{ApiClient, ApiConfig, BaseUrl};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://hr.example.com")?)
///     .build()?;
/// let client = ApiClient::new(config);
///
/// let user = client.login("admin@example.com", "s3cret-pass").await?;
/// let companies = client.list_companies().await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    config: ApiConfig,
    store: Arc<dyn SessionStore>,
    /// Serializes refresh attempts so concurrent 401s share one refresh.
    refresh_gate: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client with an in-memory session store.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_store(config, Arc::new(MemorySessionStore::new()))
    }

    /// Creates a client with an injected session store.
    ///
    /// Use this to supply a persistent store, or an in-memory fake in tests.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_store(config: ApiConfig, store: Arc<dyn SessionStore>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Workforce API Library v{SDK_VERSION} | Rust {rust_version}");

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            http,
            config,
            store,
            refresh_gate: Mutex::new(()),
            events,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Subscribes to session lifecycle events.
    ///
    /// Receivers see [`SessionEvent::TokenRefreshed`] after each successful
    /// refresh and [`SessionEvent::TokenExpired`] when the session is torn
    /// down after a failed one.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Returns `true` if an access token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }

    /// Returns the stored user profile, if present and well-formed.
    ///
    /// A corrupted stored profile reads as `None` rather than an error.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.user()
    }

    /// Authenticates with email and password.
    ///
    /// On success the session (both tokens plus the profile) is persisted to
    /// the store and the profile is returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if email or password is empty
    /// - [`ApiError::InvalidCredentials`] if the server rejects the login,
    ///   carrying the server's `detail`/`error` message when present
    /// - [`ApiError::Network`] on transport failure
    ///
    /// Nothing is persisted on any failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .send_public(Method::POST, "/accounts/login/", Some(&body), LOGIN_FALLBACK)
            .await
            .map_err(|err| match err {
                ApiError::Server { message, .. } => ApiError::InvalidCredentials(message),
                other => other,
            })?;

        let response: LoginResponse = serde_json::from_value(value)?;
        let session = Session::new(response.access, response.refresh, response.user);
        self.store.persist(&session);
        tracing::debug!(user = %session.user.email, "login succeeded");

        Ok(session.user)
    }

    /// Registers a new account.
    ///
    /// Registration does not establish a session; call [`Self::login`]
    /// afterwards.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if required fields are missing, the
    ///   password is shorter than 8 characters, or the confirmation differs
    /// - [`ApiError::Server`] if the server rejects the registration
    pub async fn signup(&self, account: &NewAccount) -> Result<UserProfile, ApiError> {
        if account.username.trim().is_empty() || account.email.trim().is_empty() {
            return Err(ApiError::Validation(
                "Username and email are required".to_string(),
            ));
        }
        if account.password.len() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters long".to_string(),
            ));
        }
        if account.password != account.password_confirm {
            return Err(ApiError::Validation("Passwords don't match".to_string()));
        }

        let body = serde_json::to_value(account)?;
        let value = self
            .send_public(Method::POST, "/accounts/signup/", Some(&body), SIGNUP_FALLBACK)
            .await?;

        let response: SignupResponse = serde_json::from_value(value)?;
        Ok(response.user)
    }

    /// Logs out.
    ///
    /// Makes a best-effort call to invalidate the refresh token server-side
    /// (failures are logged and ignored), then unconditionally clears the
    /// stored session.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.store.refresh_token() {
            let body = serde_json::json!({ "refresh_token": refresh_token });
            if let Err(err) = self
                .send(Method::POST, "/accounts/logout/", &[], Some(&body), LOGOUT_FALLBACK)
                .await
            {
                tracing::warn!("Server-side logout failed, clearing session anyway: {err}");
            }
        }
        self.store.clear();
    }

    /// Explicitly refreshes the access token.
    ///
    /// The interceptor normally refreshes on demand; this method exists for
    /// callers that want to refresh ahead of expiry. Effects match the
    /// interceptor's: on success the stored access token is overwritten and
    /// [`SessionEvent::TokenRefreshed`] fires; on failure the session is
    /// cleared and [`SessionEvent::TokenExpired`] fires.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::SessionExpired`] if no refresh token is stored or
    /// the refresh is refused.
    pub async fn refresh_session(&self) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;
        let Some(refresh_token) = self.store.refresh_token() else {
            return Err(ApiError::SessionExpired(
                "No refresh token available".to_string(),
            ));
        };
        self.perform_refresh(&refresh_token).await
    }

    /// Sends an authenticated request, refreshing the session once if the
    /// server rejects the access token.
    ///
    /// The retry marker guards against loops: once a request has been
    /// retried, a further 401 is propagated without another refresh.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        let mut retried = false;

        loop {
            let bearer = self.store.access_token();

            let mut request = self.http.request(method.clone(), &url);
            if let Some(token) = &bearer {
                request = request.bearer_auth(token);
            }
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await?;
            let status = response.status();
            let body_value = parse_body(response).await;

            if status.as_u16() == 401 {
                if retried {
                    tracing::debug!(path, "request rejected again after refresh");
                    return Err(ApiError::SessionExpired(error_message(
                        &body_value,
                        SESSION_EXPIRED,
                    )));
                }
                retried = true;
                self.refresh_after_unauthorized(bearer.as_deref()).await?;
                continue;
            }

            if status.is_success() {
                return Ok(body_value);
            }

            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&body_value, fallback),
            });
        }
    }

    /// Sends a request without credentials and without refresh handling.
    /// Used by login, signup, and the refresh call itself.
    async fn send_public(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        fallback: &str,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_value = parse_body(response).await;

        if status.is_success() {
            return Ok(body_value);
        }

        Err(ApiError::Server {
            status: status.as_u16(),
            message: error_message(&body_value, fallback),
        })
    }

    /// Refreshes the session after a 401, deduplicating concurrent attempts.
    ///
    /// `stale_token` is the access token the failed attempt carried. If the
    /// stored token differs by the time the gate is acquired, another task
    /// already refreshed and the caller can retry immediately.
    async fn refresh_after_unauthorized(&self, stale_token: Option<&str>) -> Result<(), ApiError> {
        let _gate = self.refresh_gate.lock().await;

        if self.store.access_token().as_deref() != stale_token {
            tracing::debug!("access token already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            return Err(ApiError::SessionExpired(SESSION_EXPIRED.to_string()));
        };

        tracing::debug!("access token rejected, attempting refresh");
        self.perform_refresh(&refresh_token).await.map(|_| ())
    }

    /// Calls the refresh endpoint and applies its outcome to the store and
    /// the event channel. Callers must hold the refresh gate.
    async fn perform_refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({ "refresh": refresh_token });
        let result = self
            .send_public(
                Method::POST,
                "/accounts/token/refresh/",
                Some(&body),
                REFRESH_FALLBACK,
            )
            .await
            .and_then(|value| {
                let response: RefreshResponse = serde_json::from_value(value)?;
                Ok(response.access)
            });

        match result {
            Ok(access_token) => {
                self.store.update_access_token(&access_token);
                let _ = self.events.send(SessionEvent::TokenRefreshed {
                    access_token: access_token.clone(),
                });
                tracing::debug!("token refresh succeeded");
                Ok(access_token)
            }
            Err(err) => {
                tracing::warn!("Token refresh failed: {err}");
                self.store.clear();
                let _ = self.events.send(SessionEvent::TokenExpired);
                Err(ApiError::SessionExpired(err.to_string()))
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.config.base_url())
    }
}

/// Reads and parses a response body, tolerating empty and non-JSON bodies.
async fn parse_body(response: reqwest::Response) -> Value {
    let text = response.text().await.unwrap_or_default();
    if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::Null)
    }
}

/// Extracts the server-provided message from an error body.
///
/// The backend reports failures under `error` or `detail`; when neither is
/// present the per-operation fallback is used.
fn error_message(body: &Value, fallback: &str) -> String {
    body.get("error")
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}
