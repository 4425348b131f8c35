// ── Session slice ──
//
// Holds the logged-in identity and mirrors it to a `KeyValueStore` under a
// single key. The stored record is the source of truth for the bearer
// token: `PersistedTokenSource` reads it on every request.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Identity, SessionRecord};
use crate::storage::KeyValueStore;

/// Snapshot of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub identity: Option<Arc<Identity>>,
    /// `true` while a login request is outstanding.
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Reactive session state backed by persistent storage.
pub struct SessionSlice {
    state: watch::Sender<Arc<SessionState>>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionSlice {
    /// Build the slice, hydrating the identity from `storage` synchronously.
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let identity = read_identity(storage.as_ref(), &key).map(Arc::new);
        let (state, _) = watch::channel(Arc::new(SessionState {
            identity,
            loading: false,
            error: None,
        }));
        Self {
            state,
            storage,
            key,
        }
    }

    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.state.subscribe()
    }

    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.state.borrow().identity.clone()
    }

    /// A token source reading the persisted record on each call.
    pub fn token_source(&self) -> PersistedTokenSource {
        PersistedTokenSource {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
        }
    }

    fn apply(&self, reduce: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(|current| {
            let mut next = SessionState::clone(current);
            reduce(&mut next);
            *current = Arc::new(next);
        });
    }

    // ── Login lifecycle ──────────────────────────────────────────────

    pub(crate) fn begin_login(&self) {
        self.apply(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// Persist the identity, then publish it. Requests read the bearer
    /// token from storage, so a record that cannot be written fails the
    /// login and leaves the state untouched.
    pub(crate) fn fulfil_login(&self, identity: Identity) -> Result<Arc<Identity>, CoreError> {
        let raw = serde_json::to_string(&identity.to_record()).map_err(|e| CoreError::Storage {
            message: format!("failed to encode session record: {e}"),
        })?;
        self.storage.set(&self.key, &raw)?;

        info!(role = %identity.role, user = identity.display_name(), "logged in");
        let identity = Arc::new(identity);
        self.apply(|s| {
            s.loading = false;
            s.identity = Some(Arc::clone(&identity));
        });
        Ok(identity)
    }

    /// Record a failed login. Any prior identity is kept.
    pub(crate) fn reject_login(&self, message: String) {
        self.apply(|s| {
            s.loading = false;
            s.error = Some(message);
        });
    }

    /// Clear the identity and the persisted record.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear(&self.key) {
            warn!(error = %e, "failed to clear persisted session");
        }
        self.apply(|s| {
            s.identity = None;
            s.loading = false;
            s.error = None;
        });
        info!("logged out");
    }
}

fn read_identity(storage: &dyn KeyValueStore, key: &str) -> Option<Identity> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "session record unreadable");
            return None;
        }
    };
    match serde_json::from_str::<SessionRecord>(&raw) {
        Ok(record) => {
            let identity = Identity::from_record(record);
            if identity.is_none() {
                warn!("session record missing token or role");
            }
            identity
        }
        Err(e) => {
            warn!(error = %e, "session record corrupt");
            None
        }
    }
}

// ── Token source ─────────────────────────────────────────────────────

/// Reads the bearer token from the persisted session record.
#[derive(Clone)]
pub struct PersistedTokenSource {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl shopdesk_api::TokenSource for PersistedTokenSource {
    fn token(&self) -> Option<SecretString> {
        read_identity(self.storage.as_ref(), &self.key).map(|identity| identity.token)
    }
}
