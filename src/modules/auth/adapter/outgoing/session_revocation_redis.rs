use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::{RevocationError, SessionRevocationStore};

/// Revoked sessions in Redis.
///
/// ```text
/// auth:revoked:session:{session_key} -> "{user_id}"   (TTL = session expiry)
/// ```
///
/// A key that exists marks the session as revoked. Redis TTL does the cleanup.
#[derive(Clone)]
pub struct RedisSessionRevocationStore {
    pool: Arc<Pool>,
}

impl RedisSessionRevocationStore {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn key(session_key: &str) -> String {
        format!("auth:revoked:session:{session_key}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, RevocationError> {
        self.pool
            .get()
            .await
            .map_err(|e| RevocationError::DatabaseError(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl SessionRevocationStore for RedisSessionRevocationStore {
    /// `SET` + `EXPIRE` in one `MULTI/EXEC`, so a revocation never lingers without a TTL.
    async fn revoke(
        &self,
        session_key: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(RevocationError::AlreadyExpired);
        }

        let key = Self::key(&session_key);
        let mut conn = self.get_conn().await?;

        deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(user_id.to_string())
            .ignore()
            .cmd("EXPIRE")
            .arg(&key)
            .arg(ttl)
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| RevocationError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, session_key: &str) -> Result<bool, RevocationError> {
        let mut conn = self.get_conn().await?;

        conn.exists(Self::key(session_key))
            .await
            .map_err(|e| RevocationError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Once;

    static TLS_INIT: Once = Once::new();

    fn pool(url: &str) -> Arc<Pool> {
        TLS_INIT.call_once(|| {
            let _ = rustls::crypto::ring::default_provider().install_default();
        });

        Arc::new(
            deadpool_redis::Config::from_url(url)
                .create_pool(Some(deadpool_redis::Runtime::Tokio1))
                .expect("Failed to create Redis pool"),
        )
    }

    /// Live store, or `None` when no Redis is configured for the test run.
    fn live_store() -> Option<RedisSessionRevocationStore> {
        match std::env::var("REDIS_URL") {
            Ok(url) => Some(RedisSessionRevocationStore::new(pool(&url))),
            Err(_) => {
                eprintln!("REDIS_URL not set; skipping Redis integration test");
                None
            }
        }
    }

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(
            RedisSessionRevocationStore::key("abc"),
            "auth:revoked:session:abc"
        );
    }

    #[tokio::test]
    async fn expired_session_is_not_stored() {
        // Never connects: the TTL check runs first.
        let store = RedisSessionRevocationStore::new(pool("redis://127.0.0.1:1"));

        let result = store
            .revoke("sid".to_string(), Uuid::new_v4(), Utc::now() - Duration::seconds(5))
            .await;

        assert!(matches!(result, Err(RevocationError::AlreadyExpired)));
    }

    #[tokio::test]
    async fn revoked_session_is_reported() {
        let Some(store) = live_store() else { return };
        let session = Uuid::new_v4().to_string();

        assert!(!store.is_revoked(&session).await.unwrap());

        store
            .revoke(session.clone(), Uuid::new_v4(), Utc::now() + Duration::seconds(30))
            .await
            .unwrap();

        assert!(store.is_revoked(&session).await.unwrap());
    }

    #[tokio::test]
    async fn revocation_expires_with_the_session() {
        let Some(store) = live_store() else { return };
        let session = Uuid::new_v4().to_string();

        store
            .revoke(session.clone(), Uuid::new_v4(), Utc::now() + Duration::seconds(2))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(3)).await;

        assert!(!store.is_revoked(&session).await.unwrap());
    }
}
