//! Admin session store.
//!
//! Independent of the customer session: both may coexist in one storage
//! namespace. Persisted as `admin-user` and `admin-token`; restoration
//! requires both keys, otherwise the session starts unauthenticated. There
//! is no admin signup and no token refresh.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use daisy_client::{ApiClient, Storage, StorageError, keys};
use daisy_core::{AdminUser, AdminUserId, Email};

use crate::error::AdminError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Admin login response: `{message, token, user}`.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[allow(dead_code)]
    message: Option<String>,
    token: String,
    user: AdminUser,
}

/// Admin profile response; the backend names the identifier `_id` here.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(rename = "_id")]
    id: AdminUserId,
    email: String,
    name: String,
    #[serde(default)]
    role: Option<String>,
}

impl From<ProfileResponse> for AdminUser {
    fn from(profile: ProfileResponse) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: profile.role,
        }
    }
}

struct AdminAuthInner {
    api: ApiClient,
    storage: Storage,
    admin: RwLock<Option<AdminUser>>,
}

/// Admin session store handle.
///
/// Cheaply cloneable; all clones share the same session.
#[derive(Clone)]
pub struct AdminAuthStore {
    inner: Arc<AdminAuthInner>,
}

impl AdminAuthStore {
    /// Construct the store, restoring a persisted session if one is whole.
    pub async fn restore(api: ApiClient, storage: Storage) -> Self {
        let saved: Option<AdminUser> = storage.get_json(keys::ADMIN_USER).await;
        let token = storage.get(keys::ADMIN_TOKEN).await;

        let admin = match (saved, token) {
            (Some(admin), Some(_)) => {
                debug!(email = %admin.email, "Restored admin session");
                Some(admin)
            }
            _ => None,
        };

        Self {
            inner: Arc::new(AdminAuthInner {
                api,
                storage,
                admin: RwLock::new(admin),
            }),
        }
    }

    /// Sign in to the console.
    ///
    /// On success the identity and token are persisted and the in-memory
    /// session updated. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email (no network call is
    /// made), or the normalized backend error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AdminUser, AdminError> {
        let email =
            Email::parse(email).map_err(|e| AdminError::Validation(e.to_string()))?;

        let response: AuthResponse = self
            .inner
            .api
            .post(
                "/admin/login",
                &LoginRequest {
                    email: email.as_str(),
                    password: password.expose_secret(),
                },
            )
            .await?;

        self.store_session(&response.user, &response.token).await?;
        info!(email = %response.user.email, "Admin signed in");
        Ok(response.user)
    }

    /// Sign out: clear the in-memory session and storage unconditionally.
    /// No network call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing storage fails.
    pub async fn logout(&self) -> Result<(), AdminError> {
        *self.inner.admin.write().await = None;
        self.inner.storage.remove(keys::ADMIN_USER).await?;
        self.inner.storage.remove(keys::ADMIN_TOKEN).await?;
        info!("Admin signed out");
        Ok(())
    }

    /// Refresh the identity from the backend profile endpoint, rewriting
    /// the stored identity on success.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotAuthenticated`] when no admin token is
    /// stored, or the normalized backend error.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<AdminUser, AdminError> {
        if self.inner.storage.get(keys::ADMIN_TOKEN).await.is_none() {
            return Err(AdminError::NotAuthenticated);
        }

        let profile: ProfileResponse = self.inner.api.get("/admin/profile").await?;
        let admin = AdminUser::from(profile);

        self.inner
            .storage
            .set_json(keys::ADMIN_USER, &admin)
            .await?;
        *self.inner.admin.write().await = Some(admin.clone());
        Ok(admin)
    }

    /// The signed-in admin, if any.
    pub async fn current_admin(&self) -> Option<AdminUser> {
        self.inner.admin.read().await.clone()
    }

    /// Whether an admin is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.admin.read().await.is_some()
    }

    async fn store_session(&self, admin: &AdminUser, token: &str) -> Result<(), StorageError> {
        self.inner
            .storage
            .set_json(keys::ADMIN_USER, admin)
            .await?;
        self.inner.storage.set(keys::ADMIN_TOKEN, token).await?;
        *self.inner.admin.write().await = Some(admin.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daisy_client::ClientConfig;

    fn api(storage: &Storage) -> ApiClient {
        ApiClient::new(&ClientConfig::default(), storage.clone())
    }

    fn admin() -> AdminUser {
        AdminUser {
            id: AdminUserId::new("a-1"),
            email: "ops@daisyatelier.com".to_owned(),
            name: "Ops".to_owned(),
            role: Some("super_admin".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_restore_requires_both_identity_and_token() {
        let storage = Storage::memory();
        storage.set_json(keys::ADMIN_USER, &admin()).await.unwrap();
        let auth = AdminAuthStore::restore(api(&storage), storage).await;
        assert!(!auth.is_authenticated().await);

        let storage = Storage::memory();
        storage.set(keys::ADMIN_TOKEN, "tok-1").await.unwrap();
        let auth = AdminAuthStore::restore(api(&storage), storage).await;
        assert!(!auth.is_authenticated().await);

        let storage = Storage::memory();
        storage.set_json(keys::ADMIN_USER, &admin()).await.unwrap();
        storage.set(keys::ADMIN_TOKEN, "tok-1").await.unwrap();
        let auth = AdminAuthStore::restore(api(&storage), storage).await;
        assert_eq!(auth.current_admin().await, Some(admin()));
    }

    #[tokio::test]
    async fn test_admin_session_independent_of_customer_session() {
        let storage = Storage::memory();
        // A customer session alone never authenticates the console
        storage.set(keys::USER, r#"{"id":"u","email":"e@x.c","name":"E"}"#).await.unwrap();
        storage.set(keys::TOKEN, "customer-token").await.unwrap();

        let auth = AdminAuthStore::restore(api(&storage), storage).await;
        assert!(!auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_only_admin_keys() {
        let storage = Storage::memory();
        storage.set_json(keys::ADMIN_USER, &admin()).await.unwrap();
        storage.set(keys::ADMIN_TOKEN, "tok-1").await.unwrap();
        storage.set(keys::TOKEN, "customer-token").await.unwrap();

        let auth = AdminAuthStore::restore(api(&storage), storage.clone()).await;
        auth.logout().await.unwrap();

        assert_eq!(storage.get(keys::ADMIN_USER).await, None);
        assert_eq!(storage.get(keys::ADMIN_TOKEN).await, None);
        // The customer session survives an admin logout
        assert_eq!(
            storage.get(keys::TOKEN).await,
            Some("customer-token".to_owned())
        );
    }

    #[tokio::test]
    async fn test_profile_without_token() {
        let storage = Storage::memory();
        let auth = AdminAuthStore::restore(api(&storage), storage).await;
        assert!(matches!(
            auth.profile().await,
            Err(AdminError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_profile_response_maps_underscore_id() {
        let json = serde_json::json!({
            "_id": "a-9",
            "email": "ops@daisyatelier.com",
            "name": "Ops",
            "role": "admin"
        });
        let profile: ProfileResponse = serde_json::from_value(json).unwrap();
        let admin = AdminUser::from(profile);
        assert_eq!(admin.id, AdminUserId::new("a-9"));
        assert_eq!(admin.role.as_deref(), Some("admin"));
    }
}
