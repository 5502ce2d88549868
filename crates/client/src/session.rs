//! Session controller.
//!
//! Resolves "who is the current user" through `GET /users/me` and publishes
//! the resulting [`AuthState`] on a watch channel. A controller starts in
//! `Loading` and leaves it after the first resolution settles. If every
//! pending resolution is dropped before settling, a controller still in
//! `Loading` moves to `Unauthenticated`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};
use vaultdash_core::routing::{GateState, Navigator, RouteGate};
use vaultdash_core::session::AuthState;
use vaultdash_shared::config::{SessionConfig, StaleResponsePolicy};

use crate::credentials::{CredentialError, CredentialStore};
use crate::gateway::{ApiRequest, RequestGateway};
use crate::models::{MeResponse, User};
use crate::transport::Transport;

/// Identity endpoint.
pub const ME_PATH: &str = "/users/me";

/// Owns the auth state and the resolved identity.
pub struct SessionController {
    gateway: RequestGateway<MeResponse>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    state: watch::Sender<AuthState>,
    user: Mutex<Option<User>>,
    resolving: AtomicUsize,
}

/// One pending identity resolution.
struct Resolution<'a> {
    controller: &'a SessionController,
    settled: bool,
}

impl<'a> Resolution<'a> {
    fn begin(controller: &'a SessionController) -> Self {
        controller.resolving.fetch_add(1, Ordering::SeqCst);
        Self {
            controller,
            settled: false,
        }
    }
}

impl Drop for Resolution<'_> {
    fn drop(&mut self) {
        let remaining = self
            .controller
            .resolving
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        if self.settled || remaining > 0 {
            return;
        }
        let abandoned = self.controller.state.send_if_modified(|state| {
            let loading = !state.is_resolved();
            if loading {
                *state = AuthState::Unauthenticated;
            }
            loading
        });
        if abandoned {
            warn!("identity resolution abandoned; treating session as signed out");
        }
    }
}

impl SessionController {
    /// Creates a controller in the `Loading` state.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        config: &SessionConfig,
        policy: StaleResponsePolicy,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Loading);
        Self {
            gateway: RequestGateway::with_policy(transport, Arc::clone(&credentials), policy),
            credentials,
            navigator,
            login_path: config.login_path.clone(),
            state,
            user: Mutex::new(None),
            resolving: AtomicUsize::new(0),
        }
    }

    fn user_slot(&self) -> MutexGuard<'_, Option<User>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Receives every published auth state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Current auth state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        *self.state.borrow()
    }

    /// True until the first resolution has settled.
    #[must_use]
    pub fn loading_auth(&self) -> bool {
        !self.auth_state().is_resolved()
    }

    /// Last resolved identity.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user_slot().clone()
    }

    /// Asks the server who the current user is and publishes the result.
    ///
    /// Only a 2xx response carrying a `user` counts as authenticated. A
    /// response superseded by a newer resolution is ignored.
    pub async fn resolve_identity(&self) -> AuthState {
        let mut resolution = Resolution::begin(self);
        let settled = self.gateway.dispatch(ApiRequest::get(ME_PATH)).await;
        resolution.settled = true;
        if !settled.is_current {
            debug!("identity resolution superseded");
            return self.auth_state();
        }

        let user = if settled.outcome.is_success() {
            settled.outcome.data.and_then(|me| me.user)
        } else {
            None
        };
        let next = AuthState::resolved(user.is_some());

        if let Some(user) = &user {
            debug!(user_id = %user.id, "identity resolved");
        }
        *self.user_slot() = user;

        let previous = self.state.send_replace(next);
        if previous != next {
            info!(from = %previous, to = %next, "auth state changed");
        }
        next
    }

    /// Re-resolves identity after a completed navigation.
    pub async fn on_route_change(&self, path: &str) -> AuthState {
        debug!(path, "route changed");
        self.resolve_identity().await
    }

    /// Runs `gate` against the current auth state.
    pub fn check(&self, gate: &mut RouteGate, path: &str) -> GateState {
        gate.check(path, self.auth_state(), self.navigator.as_ref()).clone()
    }

    /// Completes a navigation to `path`: re-resolves identity, then lets the
    /// gate decide with the fresh state.
    pub async fn navigate(&self, gate: &mut RouteGate, path: &str) -> GateState {
        self.on_route_change(path).await;
        self.check(gate, path)
    }

    /// Deletes the credential and reloads the login view from scratch.
    ///
    /// The reload discards this controller; its state is left untouched.
    pub fn logout(&self) -> Result<(), CredentialError> {
        self.credentials.clear()?;
        info!("signed out");
        self.navigator.reload(&self.login_path);
        Ok(())
    }
}
