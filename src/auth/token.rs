use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AuthError;

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 载荷
///
/// 同一次登录签发的访问/刷新令牌共享 `sub` 和 `jti`，
/// 只有 `token_type` 和 `exp` 不同。令牌一经签发不可变，
/// 有效性由签名、过期时间和缓存查询共同决定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    /// 用户身份标识
    pub sub: String,
    /// 会话ID，同时是缓存键的一部分和吊销句柄
    pub jti: String,
    /// 签发时间（Unix 秒）
    pub iat: i64,
    /// 过期时间（Unix 秒）
    pub exp: i64,
}

/// 令牌编解码器
///
/// 持有由配置派生的对称签名密钥，无状态，可并发使用。
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 过期判定不留余量
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// 编码并签名载荷
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "JWT 编码失败");
            AuthError::TokenCreation
        })
    }

    /// 验证签名和过期时间并解出载荷
    ///
    /// 签名有效但已过期返回 `ExpiredToken`；签名无效或结构不可解析
    /// 返回 `MalformedToken`。
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::MalformedToken,
            })
    }
}
