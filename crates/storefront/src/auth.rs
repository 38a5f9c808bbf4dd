//! Customer session store.
//!
//! Holds zero or one [`User`] identity, persisted as the pair of storage
//! keys `daisy-user` and `daisy-token`. Restoration requires both: an
//! identity without a token (or a token without an identity) restores to an
//! unauthenticated session, never a partially populated one.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use daisy_client::{ApiClient, ApiError, Storage, StorageError, keys};
use daisy_core::{Email, EmailError, User};

/// Errors produced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Input rejected before any network call.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// The backend rejected the request or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting the session failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An operation that needs a session was called without one.
    #[error("Not signed in")]
    NotAuthenticated,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Login/register response: `{message, token, user}`.
#[derive(Debug, serde::Deserialize)]
struct AuthResponse {
    #[allow(dead_code)]
    message: Option<String>,
    token: String,
    user: User,
}

struct AuthInner {
    api: ApiClient,
    storage: Storage,
    user: RwLock<Option<User>>,
}

/// Customer session store handle.
///
/// Cheaply cloneable; all clones share the same session.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthInner>,
}

impl AuthStore {
    /// Construct the store, restoring a persisted session if one is whole.
    ///
    /// Both the serialized identity and the token must be present;
    /// otherwise the session starts unauthenticated.
    pub async fn restore(api: ApiClient, storage: Storage) -> Self {
        let saved: Option<User> = storage.get_json(keys::USER).await;
        let token = storage.get(keys::TOKEN).await;

        let user = match (saved, token) {
            (Some(user), Some(_)) => {
                debug!(email = %user.email, "Restored customer session");
                Some(user)
            }
            _ => None,
        };

        Self {
            inner: Arc::new(AuthInner {
                api,
                storage,
                user: RwLock::new(user),
            }),
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the identity and token are persisted and the in-memory
    /// session updated. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email (no network call is
    /// made), or the normalized backend error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let response: AuthResponse = self
            .inner
            .api
            .post(
                "/users/login",
                &LoginRequest {
                    email: email.as_str(),
                    password: password.expose_secret(),
                },
            )
            .await?;

        self.store_session(&response).await?;
        info!(email = %response.user.email, "Customer signed in");
        Ok(response.user)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email (no network call is
    /// made), or the normalized backend error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let response: AuthResponse = self
            .inner
            .api
            .post(
                "/users/register",
                &RegisterRequest {
                    name,
                    email: email.as_str(),
                    password: password.expose_secret(),
                },
            )
            .await?;

        self.store_session(&response).await?;
        info!(email = %response.user.email, "Customer account created");
        Ok(response.user)
    }

    /// Sign out: clear the in-memory session and storage unconditionally.
    /// No network call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing storage fails.
    pub async fn logout(&self) -> Result<(), AuthError> {
        *self.inner.user.write().await = None;
        self.inner.storage.remove(keys::USER).await?;
        self.inner.storage.remove(keys::TOKEN).await?;
        info!("Customer signed out");
        Ok(())
    }

    /// Refresh the identity from the backend profile endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no token is stored, or
    /// the normalized backend error.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, AuthError> {
        if self.inner.storage.get(keys::TOKEN).await.is_none() {
            return Err(AuthError::NotAuthenticated);
        }

        let user: User = self.inner.api.get("/users/profile").await?;
        self.inner
            .storage
            .set_json(keys::USER, &user)
            .await?;
        *self.inner.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// The signed-in customer, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.inner.user.read().await.clone()
    }

    /// Whether a customer is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.user.read().await.is_some()
    }

    async fn store_session(&self, response: &AuthResponse) -> Result<(), StorageError> {
        self.inner
            .storage
            .set_json(keys::USER, &response.user)
            .await?;
        self.inner
            .storage
            .set(keys::TOKEN, response.token.clone())
            .await?;
        *self.inner.user.write().await = Some(response.user.clone());
        Ok(())
    }
}
