use std::sync::Arc;

use crate::api::Backend;
use crate::session::SessionStore;

/// Shared client state injected into every view at construction.
#[derive(Clone)]
pub struct AppState {
    /// The only way out to the network.
    pub backend: Arc<dyn Backend>,
    /// Lives from process start until exit; logout empties it but never replaces it.
    pub session: Arc<SessionStore>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let session = Arc::new(SessionStore::new(backend.clone()));
        Self { backend, session }
    }
}
