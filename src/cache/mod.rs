// 缓存模块
// 会话缓存是唯一的持久状态，核心通过窄接口使用它

pub mod keys;
pub mod operations;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::AuthError;

// 重新导出常用类型，方便其他模块使用
pub use operations::session::RedisSessionStore;

/// 缓存传输层错误（连接失败、超时等）
///
/// 与认证拒绝严格分开：缓存故障对调用方呈现为可重试的
/// `CacheUnavailable`，绝不冒充“会话不存在”。
#[derive(Debug, Error)]
#[error("会话缓存错误: {0}")]
pub struct CacheError(pub String);

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError(err.to_string())
    }
}

impl From<CacheError> for AuthError {
    fn from(err: CacheError) -> Self {
        tracing::error!(error = %err, "会话缓存访问失败");
        AuthError::CacheUnavailable
    }
}

/// 会话缓存的窄接口
///
/// 键为 `(identity, session_id)`，值为签发时绑定的客户端指纹。
/// 同一存储上 `put` 之后的 `get` 必须能读到写入（登录后立即认证
/// 依赖这一点）；条目在 `ttl` 秒后自行过期，效果等同 `delete`。
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(
        &self,
        identity: &str,
        session_id: &str,
        fingerprint: &str,
        ttl: u64,
    ) -> Result<(), CacheError>;

    async fn get(&self, identity: &str, session_id: &str) -> Result<Option<String>, CacheError>;

    async fn delete(&self, identity: &str, session_id: &str) -> Result<(), CacheError>;
}
