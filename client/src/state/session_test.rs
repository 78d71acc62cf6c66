use super::*;
use crate::net::api::ApiError;
use crate::net::backend::DevMockBackend;
use crate::net::dev_backend::placeholder_profile;
use crate::net::types::RegistrationReceipt;
use crate::util::storage::{CONFIRMED_USER_KEY, MemoryStorage, PENDING_USER_KEY, load_json, profile_key, save_json};

const ORIGIN: &str = "http://localhost:3000";

// =========================================================================
// Fixtures
// =========================================================================

async fn dev_store() -> (Arc<MemoryStorage>, SessionStore) {
    let storage = Arc::new(MemoryStorage::new());
    let backend = Arc::new(DevMockBackend::new(storage.clone()));
    let store = SessionStore::new(backend, storage.clone(), ORIGIN);
    store.initialize().await;
    (storage, store)
}

async fn register_and_confirm(store: &SessionStore, email: &str) {
    store.register(email, "hunter22", None).await.unwrap();
    let token = store.ledger().pending_for(email).unwrap().confirmation_token;
    store.confirm_email(&token).await.unwrap();
}

/// Backend with scripted failures, recording what it was asked to do.
#[derive(Default)]
struct ScriptedBackend {
    fail_profile: bool,
    fail_send: bool,
    sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for ScriptedBackend {
    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _details: &RegistrationDetails,
    ) -> Result<RegistrationReceipt, BackendError> {
        Ok(RegistrationReceipt { id: "srv-1".to_owned(), confirmation_token: "srv-token".to_owned() })
    }

    async fn send_confirmation(&self, _email: &str, _token: &str, url: &str) -> Result<(), BackendError> {
        if self.fail_send {
            return Err(ApiError::Transport("mailer down".to_owned()).into());
        }
        self.sent.lock().unwrap().push(url.to_owned());
        Ok(())
    }

    async fn confirm_email(&self, token: &str) -> Result<(), BackendError> {
        if token == "srv-token" { Ok(()) } else { Err(BackendError::Rejected("unknown token".to_owned())) }
    }

    async fn login(&self, email: &str, _password: &str) -> Result<Session, BackendError> {
        Ok(Session { id: "srv-1".to_owned(), token: "jwt".to_owned(), email: Some(email.to_owned()) })
    }

    async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, BackendError> {
        if self.fail_profile {
            return Err(ApiError::Status { status: 500, message: None }.into());
        }
        Ok(placeholder_profile(&session.id, session.email.as_deref()))
    }

    async fn update_profile(&self, _session: &Session, profile: &UserProfile) -> Result<UserProfile, BackendError> {
        Ok(profile.clone())
    }
}

async fn scripted_store(backend: ScriptedBackend) -> (Arc<MemoryStorage>, Arc<ScriptedBackend>, SessionStore) {
    let storage = Arc::new(MemoryStorage::new());
    let backend = Arc::new(backend);
    let store = SessionStore::new(backend.clone(), storage.clone(), ORIGIN);
    store.initialize().await;
    (storage, backend, store)
}

// =========================================================================
// initialize
// =========================================================================

#[tokio::test]
async fn new_store_is_loading_until_initialized() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(Arc::new(DevMockBackend::new(storage.clone())), storage, ORIGIN);
    assert!(store.snapshot().loading);

    store.initialize().await;
    let state = store.snapshot();
    assert!(!state.loading);
    assert!(state.session.is_none());
}

#[tokio::test]
async fn initialize_restores_stored_session() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(AUTH_TOKEN_KEY, "tok").unwrap();
    storage.set(USER_ID_KEY, "u7").unwrap();
    let store = SessionStore::new(Arc::new(DevMockBackend::new(storage.clone())), storage.clone(), ORIGIN);

    store.initialize().await;
    let state = store.snapshot();
    assert_eq!(state.session.as_ref().map(|s| s.id.as_str()), Some("u7"));
    assert_eq!(state.profile.as_ref().map(|p| p.id.as_str()), Some("u7"));
    assert!(!state.loading);
}

#[tokio::test]
async fn initialize_clears_keys_when_profile_fails() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(AUTH_TOKEN_KEY, "stale").unwrap();
    storage.set(USER_ID_KEY, "u7").unwrap();
    let backend = Arc::new(ScriptedBackend { fail_profile: true, ..ScriptedBackend::default() });
    let store = SessionStore::new(backend, storage.clone(), ORIGIN);

    store.initialize().await;
    assert!(store.snapshot().session.is_none());
    assert!(!storage.contains(AUTH_TOKEN_KEY));
    assert!(!storage.contains(USER_ID_KEY));
}

#[tokio::test]
async fn initialize_runs_once() {
    let (_storage, store) = dev_store().await;
    store.initialize().await;
    assert!(!store.snapshot().loading);
}

// =========================================================================
// register / confirm_email / resend
// =========================================================================

#[tokio::test]
async fn register_records_pending_registration_with_token() {
    let (storage, store) = dev_store().await;
    let outcome = store.register("new@fitwell.test", "hunter22", None).await.unwrap();

    assert!(outcome.requires_email_confirmation);
    assert_eq!(outcome.message, REGISTER_MESSAGE);
    let pending: PendingRegistration = load_json(storage.as_ref(), PENDING_USER_KEY).unwrap();
    assert_eq!(pending.email, "new@fitwell.test");
    assert!(!pending.confirmation_token.is_empty());
    assert!(!pending.email_confirmed);
    assert!(store.snapshot().email_verification_sent);
    assert!(!store.snapshot().loading);
}

#[tokio::test]
async fn register_succeeds_even_if_confirmation_email_fails() {
    let (storage, _backend, store) =
        scripted_store(ScriptedBackend { fail_send: true, ..ScriptedBackend::default() }).await;
    store.register("a@b.com", "pw", None).await.unwrap();
    assert!(storage.contains(PENDING_USER_KEY));
}

#[tokio::test]
async fn register_sends_confirmation_link() {
    let (_storage, backend, store) = scripted_store(ScriptedBackend::default()).await;
    store.register("a@b.com", "pw", None).await.unwrap();
    assert_eq!(*backend.sent.lock().unwrap(), vec!["http://localhost:3000/confirm-email/srv-token".to_owned()]);
}

#[tokio::test]
async fn confirm_email_with_correct_token_promotes_record() {
    let (storage, store) = dev_store().await;
    store.register("a@b.com", "pw", None).await.unwrap();
    let token = store.ledger().pending().unwrap().confirmation_token;

    let outcome = store.confirm_email(&token).await.unwrap();
    assert_eq!(outcome.message, CONFIRM_MESSAGE);
    assert!(!storage.contains(PENDING_USER_KEY));
    let confirmed: PendingRegistration = load_json(storage.as_ref(), CONFIRMED_USER_KEY).unwrap();
    assert_eq!(confirmed.email, "a@b.com");
    assert!(confirmed.email_confirmed);
}

#[tokio::test]
async fn confirm_email_with_wrong_token_fails_and_keeps_pending() {
    let (storage, store) = dev_store().await;
    store.register("a@b.com", "pw", None).await.unwrap();
    let before = store.ledger().pending();

    let err = store.confirm_email("not-the-token").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
    assert_eq!(err.code(), "E_INVALID_TOKEN");
    assert_eq!(store.ledger().pending(), before);
    assert!(!storage.contains(CONFIRMED_USER_KEY));
}

#[tokio::test]
async fn confirm_email_rejects_blank_token() {
    let (_storage, store) = dev_store().await;
    assert!(matches!(store.confirm_email("  ").await, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn resend_requires_pending_registration() {
    let (_storage, store) = dev_store().await;
    let err = store.resend_confirmation_email("ghost@b.com").await.unwrap_err();
    assert!(matches!(err, AuthError::NoPendingRegistration));
    assert_eq!(err.to_string(), "No pending registration found for this email");
}

#[tokio::test]
async fn resend_delivers_to_pending_record() {
    let (_storage, backend, store) = scripted_store(ScriptedBackend::default()).await;
    store.register("a@b.com", "pw", None).await.unwrap();

    let message = store.resend_confirmation_email("a@b.com").await.unwrap();
    assert_eq!(message, RESEND_MESSAGE);
    assert_eq!(backend.sent.lock().unwrap().len(), 2);
}

// =========================================================================
// login / logout
// =========================================================================

#[tokio::test]
async fn login_for_confirmed_user_then_logout_clears_everything() {
    let (storage, store) = dev_store().await;
    register_and_confirm(&store, "a@b.com").await;

    let session = store.login("a@b.com", "hunter22").await.unwrap();
    let state = store.snapshot();
    assert_eq!(state.session.as_ref(), Some(&session));
    assert!(state.profile.is_some());
    assert_eq!(storage.get(AUTH_TOKEN_KEY), Some(session.token.clone()));
    assert_eq!(storage.get(USER_ID_KEY), Some(session.id.clone()));

    store.logout();
    let state = store.snapshot();
    assert!(state.session.is_none());
    assert!(state.profile.is_none());
    assert!(!storage.contains(AUTH_TOKEN_KEY));
    assert!(!storage.contains(USER_ID_KEY));
}

#[tokio::test]
async fn login_for_unconfirmed_user_is_rejected() {
    let (storage, store) = dev_store().await;
    store.register("a@b.com", "pw", None).await.unwrap();

    let err = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected(_)));
    assert!(store.snapshot().session.is_none());
    assert!(!storage.contains(AUTH_TOKEN_KEY));
}

#[tokio::test]
async fn login_with_failing_profile_leaves_no_partial_state() {
    let (storage, _backend, store) =
        scripted_store(ScriptedBackend { fail_profile: true, ..ScriptedBackend::default() }).await;

    let err = store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Backend(_)));
    let state = store.snapshot();
    assert!(state.session.is_none());
    assert!(state.profile.is_none());
    assert!(!state.loading);
    assert!(!storage.contains(AUTH_TOKEN_KEY));
}

// =========================================================================
// profile
// =========================================================================

#[tokio::test]
async fn update_profile_merges_patch_and_refreshes_timestamp() {
    let (storage, store) = dev_store().await;
    register_and_confirm(&store, "a@b.com").await;
    let user_id = store.ledger().confirmed().unwrap().id;
    let mut cached = placeholder_profile(&user_id, Some("a@b.com"));
    cached.updated_at = "2024-01-01T00:00:00Z".to_owned();
    save_json(storage.as_ref(), &profile_key(&user_id), &cached).unwrap();

    store.login("a@b.com", "pw").await.unwrap();
    let patch = ProfilePatch { first_name: Some("Jane".to_owned()), ..ProfilePatch::default() };
    let updated = store.update_profile(&patch).await.unwrap();

    assert_eq!(updated.first_name, "Jane");
    assert_ne!(updated.updated_at, cached.updated_at);
    let expected = UserProfile { first_name: "Jane".to_owned(), updated_at: updated.updated_at.clone(), ..cached };
    assert_eq!(updated, expected);
    assert_eq!(store.snapshot().profile, Some(updated.clone()));
    let stored: UserProfile = load_json(storage.as_ref(), &profile_key(&user_id)).unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_profile_requires_session() {
    let (_storage, store) = dev_store().await;
    let err = store.update_profile(&ProfilePatch::default()).await.unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[tokio::test]
async fn load_user_profile_does_not_publish() {
    let (_storage, _backend, store) = scripted_store(ScriptedBackend::default()).await;
    let profile = store.load_user_profile("u1", "tok").await.unwrap();
    assert_eq!(profile.id, "u1");
    assert!(store.snapshot().profile.is_none());
}

// =========================================================================
// loading flag + observer
// =========================================================================

#[tokio::test]
async fn observer_sees_loading_raised_then_lowered() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(Arc::new(DevMockBackend::new(storage.clone())), storage, ORIGIN).with_observer({
        let seen = seen.clone();
        move |state: &AuthState| seen.lock().unwrap().push(state.loading)
    });
    store.initialize().await;
    seen.lock().unwrap().clear();

    store.register("a@b.com", "pw", None).await.unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen.first(), Some(&true));
    assert_eq!(seen.last(), Some(&false));
}

#[tokio::test]
async fn loading_stays_raised_while_any_operation_is_in_flight() {
    let (_storage, store) = dev_store().await;
    let outer = LoadingGuard::enter(&store);
    {
        let _inner = LoadingGuard::enter(&store);
        assert!(store.snapshot().loading);
    }
    assert!(store.snapshot().loading);
    drop(outer);
    assert!(!store.snapshot().loading);
}

#[test]
fn confirmation_url_joins_origin_and_token() {
    assert_eq!(confirmation_url("https://fitwell.test/", "abc"), "https://fitwell.test/confirm-email/abc");
}

#[test]
fn backend_rejection_maps_to_rejected() {
    let err: AuthError = BackendError::Rejected("Login failed".to_owned()).into();
    assert!(matches!(&err, AuthError::Rejected(m) if m == "Login failed"));
    assert_eq!(err.code(), "E_REJECTED");
}
