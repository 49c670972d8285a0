//! Credential issuer client: sign-up and sign-in.
//!
//! Each call is one request. Whatever happens on the wire is folded into
//! an `AuthStatus`; nothing is returned as an error and nothing is retried.
//! A successful call is the only thing that writes the session store.

use std::fmt;
use std::sync::Arc;

use parley_common::{new_correlation_id, Event, EventBus};
use tracing::{debug, debug_span, info, warn, Instrument};

use crate::session_store::{SessionStore, SessionToken};
use crate::{ApiError, ChatBackend, LoginRequest, SignupRequest, UserProfile};

/// Outcome of a credential request, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    SignUpSucceeded,
    UsernameTaken,
    SignUpFailed,
    SignInSucceeded,
    InvalidCredentials,
    SignInFailed,
}

impl AuthStatus {
    pub fn message(self) -> &'static str {
        match self {
            AuthStatus::SignUpSucceeded => "Sign up successful!",
            AuthStatus::UsernameTaken => {
                "Username already registered. Please try a different username."
            }
            AuthStatus::SignUpFailed => "Sign up failed. Please try again.",
            AuthStatus::SignInSucceeded => "Sign in successful!",
            AuthStatus::InvalidCredentials => "Invalid email or password. Please try again.",
            AuthStatus::SignInFailed => "Sign in failed. Please try again.",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            AuthStatus::SignUpSucceeded | AuthStatus::SignInSucceeded
        )
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub struct AuthClient {
    backend: Arc<dyn ChatBackend>,
    store: SessionStore,
    events: Option<Arc<EventBus>>,
}

impl AuthClient {
    pub fn new(backend: Arc<dyn ChatBackend>, store: SessionStore) -> Self {
        Self {
            backend,
            store,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// The store this client writes to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create an account. `identifier` is the email, `display_name` the
    /// username the service keys accounts on.
    pub async fn register(&self, identifier: &str, display_name: &str, secret: &str) -> AuthStatus {
        let cid = new_correlation_id();
        let request = SignupRequest {
            username: display_name.to_string(),
            email: identifier.to_string(),
            password: secret.to_string(),
        };
        debug!(cid = %cid, username = %request.username, "sign-up request");

        match self
            .backend
            .signup(&request)
            .instrument(debug_span!("request", %cid))
            .await
        {
            Ok(response) => {
                match response.access_token {
                    Some(token) => self.store_token(token, display_name).await,
                    None => debug!(cid = %cid, "sign-up response carried no token"),
                }
                info!(cid = %cid, username = %display_name, "signed up");
                AuthStatus::SignUpSucceeded
            }
            Err(ApiError::Status { status: 400, .. }) => {
                warn!(cid = %cid, username = %display_name, "sign-up rejected: username taken");
                AuthStatus::UsernameTaken
            }
            Err(e) => {
                warn!(cid = %cid, error = %e, "sign-up failed");
                AuthStatus::SignUpFailed
            }
        }
    }

    /// Sign in and keep the issued token.
    pub async fn login(&self, identifier: &str, secret: &str) -> AuthStatus {
        let cid = new_correlation_id();
        let request = LoginRequest {
            username: identifier.to_string(),
            password: secret.to_string(),
        };
        debug!(cid = %cid, username = %request.username, "sign-in request");

        match self
            .backend
            .login(&request)
            .instrument(debug_span!("request", %cid))
            .await
        {
            Ok(response) if response.access_token.is_empty() => {
                warn!(cid = %cid, "sign-in response carried an empty token");
                AuthStatus::SignInFailed
            }
            Ok(response) => {
                self.store_token(response.access_token, identifier).await;
                info!(cid = %cid, username = %identifier, "signed in");
                AuthStatus::SignInSucceeded
            }
            Err(ApiError::Status { status: 401, .. }) => {
                warn!(cid = %cid, username = %identifier, "sign-in rejected: bad credentials");
                AuthStatus::InvalidCredentials
            }
            Err(e) => {
                warn!(cid = %cid, error = %e, "sign-in failed");
                AuthStatus::SignInFailed
            }
        }
    }

    /// Fetch the profile of the signed-in user.
    ///
    /// Fails with `NotAuthenticated` without touching the network when no
    /// token is held.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let token = self.store.get().await.ok_or(ApiError::NotAuthenticated)?;
        self.backend.current_user(&token).await
    }

    /// Drop the held token. Returns true if there was one.
    pub async fn logout(&self) -> bool {
        let had_token = self.store.clear().await;
        if had_token {
            info!("signed out");
            self.publish(Event::SignedOut);
        }
        had_token
    }

    async fn store_token(&self, token: String, username: &str) {
        self.store.set(SessionToken::new(token)).await;
        self.publish(Event::SignedIn {
            username: username.to_string(),
        });
    }

    fn publish(&self, event: Event) {
        if let Some(ref bus) = self.events {
            bus.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{status, token_response, Call, FakeBackend};
    use crate::SignupResponse;

    fn client() -> (Arc<FakeBackend>, AuthClient) {
        let fake = Arc::new(FakeBackend::new());
        let auth = AuthClient::new(fake.clone(), SessionStore::new());
        (fake, auth)
    }

    #[test]
    fn status_messages_are_exact() {
        assert_eq!(AuthStatus::SignUpSucceeded.to_string(), "Sign up successful!");
        assert_eq!(
            AuthStatus::UsernameTaken.to_string(),
            "Username already registered. Please try a different username."
        );
        assert_eq!(
            AuthStatus::SignUpFailed.to_string(),
            "Sign up failed. Please try again."
        );
        assert_eq!(AuthStatus::SignInSucceeded.to_string(), "Sign in successful!");
        assert_eq!(
            AuthStatus::InvalidCredentials.to_string(),
            "Invalid email or password. Please try again."
        );
        assert_eq!(
            AuthStatus::SignInFailed.to_string(),
            "Sign in failed. Please try again."
        );
    }

    #[tokio::test]
    async fn login_success_stores_token() {
        let (fake, auth) = client();
        fake.push_login(Ok(token_response("T")));

        let status = auth.login("a@b.com", "secret").await;

        assert_eq!(status.message(), "Sign in successful!");
        assert!(status.is_success());
        assert_eq!(auth.store().get().await, Some(SessionToken::new("T")));
        assert_eq!(
            fake.calls(),
            vec![Call::Login {
                username: "a@b.com".into(),
                password: "secret".into(),
            }]
        );
    }

    #[tokio::test]
    async fn login_401_is_invalid_credentials_and_leaves_store_unset() {
        let (fake, auth) = client();
        fake.push_login(Err(status(401)));

        let status = auth.login("a@b.com", "secret").await;

        assert_eq!(status.message(), "Invalid email or password. Please try again.");
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn login_failure_keeps_previous_token() {
        let (fake, auth) = client();
        auth.store().set(SessionToken::new("old")).await;
        fake.push_login(Err(status(401)));

        auth.login("a@b.com", "wrong").await;

        assert_eq!(auth.store().get().await, Some(SessionToken::new("old")));
    }

    #[tokio::test]
    async fn login_other_failures_are_generic() {
        let (fake, auth) = client();
        fake.push_login(Err(status(500)));
        fake.push_login(Err(status(400)));
        fake.push_login(Err(ApiError::NetworkError("connection refused".into())));
        fake.push_login(Err(ApiError::ParseError("missing field".into())));
        fake.push_login(Err(ApiError::Timeout));

        for _ in 0..5 {
            assert_eq!(auth.login("a@b.com", "s").await, AuthStatus::SignInFailed);
        }
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn login_with_empty_token_fails() {
        let (fake, auth) = client();
        fake.push_login(Ok(token_response("")));

        assert_eq!(auth.login("a@b.com", "s").await, AuthStatus::SignInFailed);
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn register_sends_username_email_password() {
        let (fake, auth) = client();
        fake.push_signup(Ok(SignupResponse {
            access_token: Some("T2".into()),
        }));

        let status = auth.register("ada@example.com", "ada", "pw").await;

        assert_eq!(status, AuthStatus::SignUpSucceeded);
        assert_eq!(status.message(), "Sign up successful!");
        assert_eq!(auth.store().get().await, Some(SessionToken::new("T2")));
        assert_eq!(
            fake.calls(),
            vec![Call::Signup {
                username: "ada".into(),
                email: "ada@example.com".into(),
                password: "pw".into(),
            }]
        );
    }

    #[tokio::test]
    async fn register_400_is_username_taken_and_leaves_store_unset() {
        let (fake, auth) = client();
        fake.push_signup(Err(status(400)));

        let status = auth.register("ada@example.com", "ada", "pw").await;

        assert_eq!(
            status.message(),
            "Username already registered. Please try a different username."
        );
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn register_other_failures_are_generic() {
        let (fake, auth) = client();
        fake.push_signup(Err(status(401)));
        fake.push_signup(Err(status(503)));
        fake.push_signup(Err(ApiError::NetworkError("dns".into())));

        for _ in 0..3 {
            assert_eq!(
                auth.register("ada@example.com", "ada", "pw").await,
                AuthStatus::SignUpFailed
            );
        }
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn register_without_token_succeeds_without_storing() {
        let (fake, auth) = client();
        fake.push_signup(Ok(SignupResponse::default()));

        assert_eq!(
            auth.register("ada@example.com", "ada", "pw").await,
            AuthStatus::SignUpSucceeded
        );
        assert!(auth.store().get().await.is_none());
    }

    #[tokio::test]
    async fn current_user_without_token_skips_network() {
        let (fake, auth) = client();

        let err = auth.current_user().await.unwrap_err();

        assert!(matches!(err, ApiError::NotAuthenticated));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn current_user_sends_stored_token() {
        let (fake, auth) = client();
        fake.push_login(Ok(token_response("T")));
        fake.push_current_user(Ok(UserProfile {
            username: "ada".into(),
            email: Some("ada@example.com".into()),
        }));

        auth.login("ada", "pw").await;
        let profile = auth.current_user().await.unwrap();

        assert_eq!(profile.username, "ada");
        assert_eq!(
            fake.calls().last(),
            Some(&Call::CurrentUser { token: "T".into() })
        );
    }

    #[tokio::test]
    async fn logout_clears_and_publishes() {
        let (fake, auth) = client();
        let bus = Arc::new(EventBus::new(16));
        let mut rx = bus.subscribe();
        let auth = auth.with_event_bus(bus);
        fake.push_login(Ok(token_response("T")));

        auth.login("ada", "pw").await;
        assert!(auth.logout().await);
        assert!(!auth.logout().await);
        assert!(auth.store().get().await.is_none());

        assert!(matches!(rx.recv().await.unwrap(), Event::SignedIn { ref username } if username == "ada"));
        assert!(matches!(rx.recv().await.unwrap(), Event::SignedOut));
    }
}
