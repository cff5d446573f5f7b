//! Auth session provider.
//!
//! [`AuthSession`] holds the currently signed-in user (or none) and fans
//! out [`AuthChange`] notifications over a `tokio::sync::broadcast`
//! channel. The wardrobe store subscribes to reload on sign-in and clear
//! on sign-out; the session itself performs no credential handling — the
//! external identity provider does, and hands over an opaque access
//! token.

use std::sync::RwLock;

use tokio::sync::broadcast;

use lookbook_core::types::UserId;

/// Buffer capacity for the change channel.
const CHANGE_CAPACITY: usize = 16;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Opaque bearer token for remote requests.
    pub access_token: String,
}

/// A sign-in or sign-out transition.
#[derive(Debug, Clone)]
pub enum AuthChange {
    SignedIn(AuthUser),
    SignedOut,
}

/// Shared session state with change broadcasting.
pub struct AuthSession {
    current: RwLock<Option<AuthUser>>,
    changes: broadcast::Sender<AuthChange>,
}

impl AuthSession {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            current: RwLock::new(None),
            changes,
        }
    }

    /// The currently signed-in user, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current
            .read()
            .expect("auth session lock poisoned")
            .clone()
    }

    /// Shorthand for the current user's id.
    pub fn user_id(&self) -> Option<UserId> {
        self.current_user().map(|u| u.user_id)
    }

    /// Record a sign-in and notify subscribers.
    ///
    /// Signing in while already signed in (e.g. a token refresh for the
    /// same user, or a user switch) still publishes `SignedIn`.
    pub fn sign_in(&self, user: AuthUser) {
        {
            let mut current = self.current.write().expect("auth session lock poisoned");
            *current = Some(user.clone());
        }
        tracing::info!(user_id = %user.user_id, "user signed in");
        // SendError only means there are zero subscribers.
        let _ = self.changes.send(AuthChange::SignedIn(user));
    }

    /// Clear the session and notify subscribers. No-op when already
    /// signed out.
    pub fn sign_out(&self) {
        let previous = {
            let mut current = self.current.write().expect("auth session lock poisoned");
            current.take()
        };
        let Some(user) = previous else { return };
        tracing::info!(user_id = %user.user_id, "user signed out");
        let _ = self.changes.send(AuthChange::SignedOut);
    }

    /// Subscribe to sign-in/sign-out transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}
