use super::auth::Viewer;
use crate::client::ApiClient;
use crate::workflow::notifications::Inbox;
use moka::future::Cache;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;
use uuid::Uuid;

/// Upper bound on concurrently signed-in browser sessions.
const MAX_SESSIONS: u64 = 50_000;

/// One signed-in browser: who it is and the remote API handle carrying its
/// bearer token.
pub struct Session {
    pub id: Uuid,
    pub viewer: Viewer,
    pub client: ApiClient,
    inbox: RwLock<Inbox>,
}

impl Session {
    pub fn new(viewer: Viewer, client: ApiClient) -> Self {
        Self {
            id: Uuid::new_v4(),
            viewer,
            client,
            inbox: RwLock::new(Inbox::default()),
        }
    }

    pub fn inbox(&self) -> RwLockWriteGuard<'_, Inbox> {
        self.inbox.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// False once the remote API rejected the token (401).
    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }
}

/// Server-side replacement for the browser's token storage.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    pub async fn insert(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions.insert(session.id, session.clone()).await;
        session
    }

    /// A live session; sessions whose remote token was cleared are dropped.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        let session = self.sessions.get(id).await?;
        if session.is_authenticated() {
            Some(session)
        } else {
            self.sessions.invalidate(id).await;
            None
        }
    }

    /// Whether `session` is still signed in, without counting as activity:
    /// background work must not keep an idle session alive.
    pub fn is_live(&self, session: &Session) -> bool {
        session.is_authenticated() && self.sessions.contains_key(&session.id)
    }

    pub async fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id).await;
    }
}
