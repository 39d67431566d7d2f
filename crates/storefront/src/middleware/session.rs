//! Session middleware configuration.
//!
//! The session only carries the visitor's cart, so an in-memory store is
//! enough: carts vanish on restart, like the browser-local carts they
//! replace. The store is a bounded moka cache, so abandoned sessions are
//! evicted after a week of inactivity or when the cache is full.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "jacobo_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound on live sessions; the least recently used go first.
pub const MAX_SESSIONS: u64 = 100_000;

// =============================================================================
// Store
// =============================================================================

/// In-memory session store with capacity and idle-time eviction.
#[derive(Debug, Clone)]
pub struct CartSessionStore {
    cache: Cache<Id, Record>,
}

impl CartSessionStore {
    /// Store holding at most `max_sessions`, each dropped after `idle`
    /// without being read or written.
    #[must_use]
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// Number of sessions currently held, after pending evictions ran.
    pub async fn session_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for CartSessionStore {
    fn default() -> Self {
        Self::new(
            MAX_SESSIONS,
            Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()),
        )
    }
}

#[async_trait]
impl SessionStore for CartSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self.cache.get(session_id).await {
            Some(record) if record.expiry_date > OffsetDateTime::now_utc() => Ok(Some(record)),
            Some(_) => {
                self.cache.invalidate(session_id).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer backed by a fresh [`CartSessionStore`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<CartSessionStore> {
    SessionManagerLayer::new(CartSessionStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record(expires_in: tower_sessions::cookie::time::Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_expired_record_is_evicted_on_load() {
        let store = CartSessionStore::default();
        let mut stale = record(tower_sessions::cookie::time::Duration::minutes(-1));
        store.create(&mut stale).await.unwrap();
        assert_eq!(store.session_count().await, 1);

        assert!(store.load(&stale.id).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_dropped() {
        let store = CartSessionStore::new(10, Duration::from_millis(50));
        let mut live = record(tower_sessions::cookie::time::Duration::days(1));
        store.create(&mut live).await.unwrap();
        assert!(store.load(&live.id).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.load(&live.id).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let store = CartSessionStore::new(5, Duration::from_secs(60));
        for _ in 0..50 {
            let mut session = record(tower_sessions::cookie::time::Duration::days(1));
            store.create(&mut session).await.unwrap();
        }
        assert!(store.session_count().await <= 5);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = CartSessionStore::default();
        let mut session = record(tower_sessions::cookie::time::Duration::days(1));
        store.create(&mut session).await.unwrap();
        store.delete(&session.id).await.unwrap();
        assert!(store.load(&session.id).await.unwrap().is_none());
    }
}
