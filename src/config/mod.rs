use std::env;
use std::time::Duration;

/// 认证配置
///
/// 进程启动时从环境变量加载一次，之后只读。签名密钥、令牌有效期等
/// 都通过引用传入各组件，不使用全局状态。
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub jwt_secret: String,
    /// Authorization 头的认证方案字面量（区分大小写）
    pub auth_scheme: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    /// 会话缓存键的过期时间
    pub session_ttl_secs: u64,
}

/// 访问令牌默认有效期：一天
const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let access_token_ttl_secs = env::var("ACCESS_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS);
        let mut refresh_token_ttl_secs = env::var("REFRESH_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(access_token_ttl_secs * 5);
        // 刷新令牌必须比访问令牌活得久，配置颠倒时回退到默认倍数
        if refresh_token_ttl_secs <= access_token_ttl_secs {
            tracing::warn!(
                refresh_token_ttl_secs,
                access_token_ttl_secs,
                "REFRESH_TOKEN_TTL 不大于 ACCESS_TOKEN_TTL，回退为访问令牌有效期的5倍"
            );
            refresh_token_ttl_secs = access_token_ttl_secs * 5;
        }

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            auth_scheme: env::var("AUTH_SCHEME").unwrap_or_else(|_| "Token".to_string()),
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            session_ttl_secs: env::var("REDIS_KEY_TTL")?
                .parse()
                .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS),
        })
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
