use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::session_key;
use crate::cache::{CacheError, SessionStore};

/// 单次缓存操作的超时时间，超时按缓存不可用处理
const CACHE_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// 会话缓存操作（Redis 实现）
///
/// 值是签发时的客户端指纹原文，过期由 Redis 的键 TTL 负责。
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        with_timeout(self.redis.get_multiplexed_async_connection()).await
    }
}

async fn with_timeout<T, F>(fut: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, redis::RedisError>>,
{
    match tokio::time::timeout(CACHE_OP_TIMEOUT, fut).await {
        Ok(result) => result.map_err(CacheError::from),
        Err(_) => Err(CacheError("操作超时".to_string())),
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    /// 缓存会话
    async fn put(
        &self,
        identity: &str,
        session_id: &str,
        fingerprint: &str,
        ttl: u64,
    ) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let key = session_key(identity, session_id);
        let _: () = with_timeout(conn.set_ex(key, fingerprint, ttl)).await?;

        Ok(())
    }

    /// 获取会话绑定的指纹
    async fn get(&self, identity: &str, session_id: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;

        let key = session_key(identity, session_id);
        let result: Option<String> = with_timeout(conn.get(key)).await?;

        Ok(result)
    }

    /// 删除会话（删除不存在的键不是错误）
    async fn delete(&self, identity: &str, session_id: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let key = session_key(identity, session_id);
        let _: () = with_timeout(conn.del(key)).await?;

        Ok(())
    }
}
