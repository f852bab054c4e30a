//! Session store.
//!
//! Owns the client's belief about who is signed in. State transitions:
//! `loading -> {authenticated, unauthenticated}`; from either settled
//! state `logout` -> `unauthenticated`; the global unauthorized signal
//! forces any state -> `unauthenticated`.

use std::sync::Arc;

use taskdeck_core::error::Result;
use taskdeck_core::event::{AppEvent, EventBus};
use taskdeck_core::prefs::PreferenceStore;
use taskdeck_core::session::{AuthGateway, SessionSnapshot, UserIdentity};
use taskdeck_interaction::token::stored_identity;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// The client-side authentication state owner.
///
/// Observers subscribe to a watch channel; every authenticated view reads
/// the same snapshot, so an unauthorized signal settling the store to
/// unauthenticated redirects all of them at once.
pub struct SessionStore {
    state: watch::Sender<SessionSnapshot>,
    prefs: Arc<dyn PreferenceStore>,
    auth: Arc<dyn AuthGateway>,
}

impl SessionStore {
    /// Creates a store in the initial (loading) state.
    pub fn new(prefs: Arc<dyn PreferenceStore>, auth: Arc<dyn AuthGateway>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::initial());
        Self { state, prefs, auth }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Resolves the persisted credential into a settled state.
    ///
    /// Fails soft: a missing token, an undecodable token, or a storage
    /// error all settle to unauthenticated. Nothing propagates to the
    /// caller.
    pub fn check_status(&self) {
        let snapshot = self
            .prefs
            .access_token()
            .and_then(|token| stored_identity(&token))
            .map(SessionSnapshot::authenticated)
            .unwrap_or_else(SessionSnapshot::unauthenticated);
        self.state.send_replace(snapshot);
    }

    /// Adopts an already-verified identity.
    ///
    /// Credential verification happened at the auth endpoint; this only
    /// records the result.
    pub fn login(&self, user: UserIdentity) {
        self.state.send_replace(SessionSnapshot::authenticated(user));
    }

    /// Records a sign-in failure for inline display.
    pub fn login_failed(&self, error: impl Into<String>) {
        self.state.send_replace(SessionSnapshot::failed(error));
    }

    /// Signs out.
    ///
    /// Remote invalidation is best-effort; local state and the stored
    /// token are reset unconditionally, even when the remote call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            tracing::warn!("Remote logout failed: {}", e);
        }
        self.clear_local_session();
    }

    /// Forces the unauthenticated state without a remote call.
    ///
    /// This is the handler for the global unauthorized signal: the
    /// credential is already known to be dead, so there is nothing to
    /// invalidate remotely.
    pub fn force_unauthenticated(&self) {
        self.clear_local_session();
    }

    fn clear_local_session(&self) {
        if let Err(e) = self.clear_stored_token() {
            tracing::warn!("Failed to clear stored token: {}", e);
        }
        self.state.send_replace(SessionSnapshot::unauthenticated());
    }

    fn clear_stored_token(&self) -> Result<()> {
        self.prefs.clear_access_token()
    }

    /// Spawns the unauthorized-signal listener.
    ///
    /// The task ends when the bus is dropped; abort the handle to detach
    /// earlier.
    pub fn spawn_unauthorized_listener(self: Arc<Self>, events: &EventBus) -> JoinHandle<()> {
        let store = self;
        let mut events = events.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AppEvent::Unauthorized) => store.force_unauthenticated(),
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use taskdeck_core::TaskdeckError;
    use taskdeck_infrastructure::MemoryPreferenceStore;

    struct MockAuthGateway {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl MockAuthGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            let gateway = Self::new();
            gateway.fail.store(true, Ordering::SeqCst);
            gateway
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn logout(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(TaskdeckError::network("connection refused"))
            } else {
                Ok(())
            }
        }
    }

    fn identity() -> UserIdentity {
        UserIdentity {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn store_with(auth: MockAuthGateway) -> SessionStore {
        SessionStore::new(Arc::new(MemoryPreferenceStore::new()), Arc::new(auth))
    }

    #[tokio::test]
    async fn test_login_then_logout_matches_initial_but_settled() {
        let store = store_with(MockAuthGateway::new());
        let initial = store.snapshot();

        store.login(identity());
        store.logout().await;

        let settled = store.snapshot();
        assert_eq!(
            settled,
            SessionSnapshot {
                is_loading: false,
                ..initial
            }
        );
    }

    #[tokio::test]
    async fn test_logout_resets_even_when_remote_fails() {
        let prefs = Arc::new(MemoryPreferenceStore::with_access_token("token-1"));
        let store = SessionStore::new(prefs.clone(), Arc::new(MockAuthGateway::failing()));
        store.login(identity());

        store.logout().await;

        assert!(!store.snapshot().is_authenticated);
        assert!(prefs.access_token().is_none());
    }

    #[tokio::test]
    async fn test_logout_attempts_remote_invalidation() {
        let auth = Arc::new(MockAuthGateway::new());
        let store = SessionStore::new(Arc::new(MemoryPreferenceStore::new()), auth.clone());
        store.login(identity());

        store.logout().await;

        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_status_fails_soft_on_garbage_token() {
        let prefs = Arc::new(MemoryPreferenceStore::with_access_token("not-a-jwt"));
        let store = SessionStore::new(prefs, Arc::new(MockAuthGateway::new()));

        store.check_status();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_signal_forces_sign_out_from_any_state() {
        let events = EventBus::new();
        let store = Arc::new(store_with(MockAuthGateway::new()));
        let listener = store.clone().spawn_unauthorized_listener(&events);

        store.login(identity());
        let mut observer = store.subscribe();

        events.publish(AppEvent::Unauthorized);
        observer.changed().await.unwrap();

        assert!(!store.snapshot().is_authenticated);
        listener.abort();
    }

    #[tokio::test]
    async fn test_tasks_changed_signal_leaves_session_alone() {
        let events = EventBus::new();
        let store = Arc::new(store_with(MockAuthGateway::new()));
        let listener = store.clone().spawn_unauthorized_listener(&events);

        store.login(identity());
        events.publish(AppEvent::TasksChanged);
        tokio::task::yield_now().await;

        assert!(store.snapshot().is_authenticated);
        listener.abort();
    }
}
