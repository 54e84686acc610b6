use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::api::Backend;
use crate::errors::AuthError;
use crate::models::{Credentials, Identity, Registration};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// The authenticated identity for this client, if any.
///
/// The server side of the session is the cookie held by the backend client; this
/// store only mirrors who the backend said we are. It is created once at startup
/// and shared with every view through `AppState`.
pub struct SessionStore {
    backend: Arc<dyn Backend>,
    user: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            user: RwLock::new(None),
        }
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Sends the credentials as typed; the backend decides what a valid login is.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let credentials = Credentials { username, password };
        let identity = self
            .backend
            .login(&credentials)
            .await
            .map_err(|e| AuthError::from_api(e, LOGIN_FAILED))?;

        info!("Logged in as {}", identity.username);
        self.set_user(Some(identity.clone()));
        Ok(identity)
    }

    /// Creates an account. The backend logs the new user in, so the store ends up
    /// exactly as after `login`.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let registration = Registration {
            username,
            email,
            password,
        };
        if !registration.is_complete() {
            return Err(AuthError::MissingFields);
        }

        let identity = self
            .backend
            .register(&registration)
            .await
            .map_err(|e| AuthError::from_api(e, REGISTRATION_FAILED))?;

        info!("Registered and logged in as {}", identity.username);
        self.set_user(Some(identity.clone()));
        Ok(identity)
    }

    /// Clears the local identity and asks the backend to drop the session.
    /// A backend failure is logged; the local teardown happens regardless.
    pub async fn logout(&self) {
        let previous = self.user.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Err(e) = self.backend.logout().await {
            warn!("Logout request failed: {e}");
        }
        if let Some(identity) = previous {
            info!("Logged out {}", identity.username);
        }
    }

    /// Forgets the identity after the backend reported the session gone.
    pub fn invalidate(&self) {
        if let Some(identity) = self.user.write().unwrap_or_else(PoisonError::into_inner).take() {
            info!("Session for {} is no longer valid", identity.username);
        }
    }

    fn set_user(&self, user: Option<Identity>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}
