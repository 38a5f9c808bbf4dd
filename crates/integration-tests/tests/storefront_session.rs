//! End-to-end customer session scenarios against the mock backend.

use secrecy::SecretString;
use uuid::Uuid;

use daisy_client::{Storage, keys};
use daisy_integration_tests::{CUSTOMER_TOKEN, MockBackend, PASSWORD};
use daisy_storefront::{AppState, auth::AuthError};

fn password() -> SecretString {
    SecretString::from(PASSWORD.to_owned())
}

fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
async fn test_login_persists_identity_and_token() {
    let backend = MockBackend::spawn().await;
    let storage = Storage::memory();
    let state = AppState::with_storage(backend.config(), storage.clone()).await;

    let user = state
        .auth()
        .login("rose@daisyatelier.com", &password())
        .await
        .expect("Login failed");
    assert_eq!(user.email, "rose@daisyatelier.com");
    assert!(state.auth().is_authenticated().await);

    assert_eq!(
        storage.get(keys::TOKEN).await,
        Some(CUSTOMER_TOKEN.to_owned())
    );
    assert!(storage.get(keys::USER).await.is_some());
}

#[tokio::test]
async fn test_failed_login_leaves_state_untouched() {
    let backend = MockBackend::spawn().await;
    let storage = Storage::memory();
    let state = AppState::with_storage(backend.config(), storage.clone()).await;

    let err = state
        .auth()
        .login(
            "rose@daisyatelier.com",
            &SecretString::from("wrong".to_owned()),
        )
        .await
        .expect_err("Login should fail");

    // The backend's message is surfaced verbatim
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!state.auth().is_authenticated().await);
    assert_eq!(storage.get(keys::TOKEN).await, None);
    assert_eq!(storage.get(keys::USER).await, None);
}

#[tokio::test]
async fn test_signup_conflict_surfaces_backend_message() {
    let backend = MockBackend::spawn().await;
    let state = AppState::with_storage(backend.config(), Storage::memory()).await;

    let err = state
        .auth()
        .signup("Rose", "rose@taken.example", &password())
        .await
        .expect_err("Signup should conflict");
    assert_eq!(err.to_string(), "Email already registered");
    assert!(!state.auth().is_authenticated().await);
}

#[tokio::test]
async fn test_signup_signs_in() {
    let backend = MockBackend::spawn().await;
    let state = AppState::with_storage(backend.config(), Storage::memory()).await;

    let email = unique_email();
    let user = state
        .auth()
        .signup("Rose", &email, &password())
        .await
        .expect("Signup failed");
    assert_eq!(user.email, email);
    assert!(state.auth().is_authenticated().await);
}

#[tokio::test]
async fn test_profile_refresh_uses_bearer_token() {
    let backend = MockBackend::spawn().await;
    let storage = Storage::memory();
    let state = AppState::with_storage(backend.config(), storage.clone()).await;

    state
        .auth()
        .login("rose@daisyatelier.com", &password())
        .await
        .expect("Login failed");

    let refreshed = state.auth().profile().await.expect("Profile fetch failed");
    assert_eq!(refreshed.name, "Rose Refreshed");

    let recorded = backend.recorded().profile_auth_headers.clone();
    assert_eq!(
        recorded.last().cloned().flatten(),
        Some(format!("Bearer {CUSTOMER_TOKEN}"))
    );
}

#[tokio::test]
async fn test_session_restores_across_process_starts() {
    let backend = MockBackend::spawn().await;
    let storage = Storage::memory();

    {
        let state = AppState::with_storage(backend.config(), storage.clone()).await;
        state
            .auth()
            .login("rose@daisyatelier.com", &password())
            .await
            .expect("Login failed");
    }

    // A fresh state over the same storage restores the whole session
    let state = AppState::with_storage(backend.config(), storage.clone()).await;
    assert!(state.auth().is_authenticated().await);

    // Dropping the token invalidates the next restore entirely
    storage.remove(keys::TOKEN).await.expect("Remove failed");
    let state = AppState::with_storage(backend.config(), storage).await;
    assert!(!state.auth().is_authenticated().await);
}

#[tokio::test]
async fn test_logout_then_profile_is_rejected_locally() {
    let backend = MockBackend::spawn().await;
    let state = AppState::with_storage(backend.config(), Storage::memory()).await;

    state
        .auth()
        .login("rose@daisyatelier.com", &password())
        .await
        .expect("Login failed");
    state.auth().logout().await.expect("Logout failed");

    assert!(matches!(
        state.auth().profile().await,
        Err(AuthError::NotAuthenticated)
    ));
    // No profile request reached the backend after logout
    assert!(backend.recorded().profile_auth_headers.is_empty());
}
