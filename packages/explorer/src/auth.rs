//! # Session lifecycle: login, registration, logout and restore
//!
//! [`AuthSession`] is the only writer of the persisted token and identity
//! ([`store::keys::TOKEN`], [`store::keys::USER`]). Every other component
//! receives the token by value from the orchestrator.
//!
//! `restore` never talks to the service: an expired token is only discovered
//! when an authenticated call comes back `401`, at which point the
//! orchestrator funnels the failure into a single re-authentication prompt.

use api::{ApiError, LoginRequest, RegisterRequest, TravelApi};
use serde::{Deserialize, Serialize};
use store::{keys, SessionStore};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Identity cached next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

impl UserProfile {
    /// Profile for an email when no username is known: the local part of the
    /// address.
    pub fn from_email(email: &str) -> Self {
        let username = email.split('@').next().unwrap_or(email).to_string();
        Self {
            username,
            email: email.to_string(),
        }
    }
}

/// Token plus optional identity. A user can never exist without a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            token: Some(token.into()),
            user,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("could not reach the travel service: {0}")]
    Network(String),

    /// The stored token was refused; the user has to log in again.
    #[error("session expired, please log in again")]
    Unauthorized,
}

/// Login, registration and logout against the travel service.
#[derive(Debug, Clone)]
pub struct AuthSession<A, S> {
    api: A,
    store: S,
}

impl<A: TravelApi, S: SessionStore> AuthSession<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Verify credentials and persist the resulting session.
    ///
    /// Nothing is persisted on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.login_as(email, password, None).await
    }

    /// Like [`login`](Self::login) but records a known username (right after
    /// registration) instead of deriving one from the email.
    pub async fn login_as(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.map_err(|e| match e {
            ApiError::Unauthorized | ApiError::Rejected { .. } | ApiError::NotFound => {
                AuthError::InvalidCredentials
            }
            other => AuthError::Network(other.to_string()),
        })?;

        let user = match username {
            Some(username) => UserProfile {
                username: username.to_string(),
                email: email.to_string(),
            },
            None => UserProfile::from_email(email),
        };
        self.persist(&response.access_token, &user);
        info!(email, "logged in");

        Ok(Session::authenticated(response.access_token, Some(user)))
    }

    /// Create an account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let (username, email) = (username.trim(), email.trim());
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "username, email and password are required".to_string(),
            ));
        }

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api.register(&request).await.map_err(|e| match e {
            ApiError::Rejected { message, .. } => AuthError::Validation(message),
            ApiError::Unauthorized | ApiError::NotFound => {
                AuthError::Validation(e.to_string())
            }
            other => AuthError::Network(other.to_string()),
        })?;
        info!(email, "registered account");
        Ok(())
    }

    /// Forget the persisted token and identity. Never fails.
    pub fn logout(&self) {
        self.store.remove(keys::TOKEN);
        self.store.remove(keys::USER);
        info!("logged out");
    }

    /// Rebuild the session from storage without contacting the service.
    pub fn restore(&self) -> Session {
        let Some(token) = self.store.get(keys::TOKEN).filter(|t| !t.is_empty()) else {
            if self.store.get(keys::USER).is_some() {
                debug!("dropping cached identity without a token");
                self.store.remove(keys::USER);
            }
            return Session::anonymous();
        };

        let user = self.store.get(keys::USER).and_then(|raw| {
            serde_json::from_str::<UserProfile>(&raw)
                .map_err(|e| warn!(error = %e, "ignoring unreadable cached identity"))
                .ok()
        });
        Session::authenticated(token, user)
    }

    fn persist(&self, token: &str, user: &UserProfile) {
        self.store.set(keys::TOKEN, token);
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(keys::USER, &raw),
            Err(e) => warn!(error = %e, "failed to serialise identity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use store::MemoryStore;

    fn setup() -> (FakeApi, MemoryStore, AuthSession<FakeApi, MemoryStore>) {
        let api = FakeApi::new().with_account("a@b.com", "secret");
        let store = MemoryStore::new();
        let auth = AuthSession::new(api.clone(), store.clone());
        (api, store, auth)
    }

    #[tokio::test]
    async fn test_login_persists_token_and_identity() {
        let (_, store, auth) = setup();

        let session = auth.login("a@b.com", "secret").await.unwrap();

        assert_eq!(session.token(), Some("token-a@b.com"));
        assert_eq!(session.user().unwrap().username, "a");
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("token-a@b.com"));
        let cached: UserProfile = serde_json::from_str(&store.get(keys::USER).unwrap()).unwrap();
        assert_eq!(cached.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let (_, store, auth) = setup();

        let result = auth.login("a@b.com", "wrong").await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(store.get(keys::TOKEN), None);
        assert_eq!(store.get(keys::USER), None);
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let store = MemoryStore::new();

        struct Down;
        impl TravelApi for Down {
            async fn login(&self, _: &LoginRequest) -> Result<api::LoginResponse, ApiError> {
                Err(ApiError::Timeout)
            }
            async fn register(&self, _: &RegisterRequest) -> Result<(), ApiError> {
                Err(ApiError::Network("connection refused".into()))
            }
            async fn list_destinations(
                &self,
                _: Option<&str>,
            ) -> Result<Vec<api::RawDestination>, ApiError> {
                unreachable!()
            }
            async fn create_booking(
                &self,
                _: &str,
                _: &api::BookingRequest,
            ) -> Result<api::Booking, ApiError> {
                unreachable!()
            }
            async fn list_bookings(&self, _: &str) -> Result<Vec<api::Booking>, ApiError> {
                unreachable!()
            }
            async fn delete_booking(&self, _: &str, _: &str) -> Result<(), ApiError> {
                unreachable!()
            }
        }

        let auth = AuthSession::new(Down, store.clone());
        assert!(matches!(
            auth.login("a@b.com", "secret").await,
            Err(AuthError::Network(_))
        ));
        assert!(matches!(
            auth.register("ana", "a@b.com", "secret").await,
            Err(AuthError::Network(_))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_the_service() {
        let (api, _, auth) = setup();

        assert!(matches!(
            auth.login("  ", "secret").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.register("", "a@b.com", "pw").await,
            Err(AuthError::Validation(_))
        ));
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_does_not_authenticate() {
        let (api, store, auth) = setup();

        auth.register("ana", "new@b.com", "pw").await.unwrap();

        assert_eq!(api.calls("register"), 1);
        assert_eq!(api.calls("login"), 0);
        assert_eq!(store.get(keys::TOKEN), None);
    }

    #[tokio::test]
    async fn test_register_rejection_is_validation() {
        let (api, _, auth) = setup();
        api.script().register = Err(ApiError::Rejected {
            status: 400,
            message: "Email already registered".into(),
        });

        let result = auth.register("ana", "a@b.com", "pw").await;

        assert_eq!(
            result,
            Err(AuthError::Validation("Email already registered".into()))
        );
    }

    #[tokio::test]
    async fn test_login_as_keeps_username() {
        let (_, _, auth) = setup();

        let session = auth.login_as("a@b.com", "secret", Some("ana")).await.unwrap();

        assert_eq!(session.user().unwrap().username, "ana");
        assert_eq!(auth.restore().user().unwrap().username, "ana");
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let (_, store, auth) = setup();
        auth.login("a@b.com", "secret").await.unwrap();
        store.set(keys::DARK_MODE, "true");

        auth.logout();
        auth.logout();

        assert_eq!(store.get(keys::TOKEN), None);
        assert_eq!(store.get(keys::USER), None);
        assert_eq!(store.get(keys::DARK_MODE).as_deref(), Some("true"));
        assert_eq!(auth.restore(), Session::anonymous());
    }

    #[test]
    fn test_restore_without_network() {
        let (api, store, auth) = setup();
        store.set(keys::TOKEN, "token-stored");
        store.set(
            keys::USER,
            r#"{"username": "ana", "email": "a@b.com"}"#,
        );

        let session = auth.restore();

        assert_eq!(session.token(), Some("token-stored"));
        assert_eq!(session.user().unwrap().username, "ana");
        assert_eq!(api.total_calls(), 0);
    }

    #[test]
    fn test_restore_drops_orphaned_identity() {
        let (_, store, auth) = setup();
        store.set(keys::USER, r#"{"username": "ana", "email": "a@b.com"}"#);

        let session = auth.restore();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(store.get(keys::USER), None);
    }

    #[test]
    fn test_restore_tolerates_corrupt_identity() {
        let (_, store, auth) = setup();
        store.set(keys::TOKEN, "token-stored");
        store.set(keys::USER, "{not json");

        let session = auth.restore();

        assert_eq!(session.token(), Some("token-stored"));
        assert!(session.user().is_none());
    }
}
