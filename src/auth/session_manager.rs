use std::sync::Arc;

use serde::Serialize;

use crate::cache::SessionStore;
use crate::config::Config;
use crate::error::AuthError;

use super::authenticator::verify_session;
use super::claims;
use super::token::{TokenCodec, TokenType};

/// 登录/刷新返回的令牌对
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 会话管理器
///
/// 编排登录（签发并注册会话）、刷新（校验旧会话、轮换、重新签发）
/// 和注销（删除会话）。每个会话ID的状态只有两种：不存在 → 存活
/// （登录）→ 不存在（注销或刷新轮换），没有中间态。
#[derive(Clone)]
pub struct SessionManager {
    codec: TokenCodec,
    store: Arc<dyn SessionStore>,
    config: Config,
}

impl SessionManager {
    pub fn new(codec: TokenCodec, store: Arc<dyn SessionStore>, config: Config) -> Self {
        Self { codec, store, config }
    }

    /// 登录：签发令牌对并注册会话
    ///
    /// 会话记录写入缓存成功之后才返回令牌；写入失败则整个登录失败，
    /// 绝不把未注册会话的令牌交给调用方。这是创建会话记录的唯一路径。
    pub async fn login(&self, identity: &str, fingerprint: &str) -> Result<TokenPair, AuthError> {
        let base = claims::base_claims(identity);
        let access_token = self.codec.encode(&claims::access_claims(&base, &self.config))?;
        let refresh_token = self.codec.encode(&claims::refresh_claims(&base, &self.config))?;

        self.store
            .put(identity, &base.jti, fingerprint, self.config.session_ttl_secs)
            .await?;

        tracing::info!(identity, session_id = %base.jti, "会话已创建");
        Ok(TokenPair { access_token, refresh_token })
    }

    /// 刷新：轮换会话并签发新令牌对
    ///
    /// 对旧会话执行与请求认证相同的缓存校验和指纹比对，然后先删除
    /// 旧会话记录、再签发新令牌。顺序不可颠倒：即使后半段失败，
    /// 旧会话ID也已不可用，不会出现一次刷新两个存活会话。
    pub async fn refresh(
        &self,
        refresh_token: &str,
        user_agent: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        let fingerprint = match user_agent {
            Some(ua) if !ua.is_empty() => ua,
            _ => return Err(AuthError::MissingFingerprint),
        };

        let claims = self.codec.decode(refresh_token).map_err(|e| match e {
            AuthError::ExpiredToken => AuthError::ExpiredRefreshToken,
            _ => AuthError::InvalidRefreshToken,
        })?;
        if claims.token_type != TokenType::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }

        verify_session(self.store.as_ref(), &claims.sub, &claims.jti, fingerprint).await?;

        self.store.delete(&claims.sub, &claims.jti).await?;
        tracing::info!(identity = %claims.sub, session_id = %claims.jti, "会话已轮换");

        self.login(&claims.sub, fingerprint).await
    }

    /// 注销：删除会话记录（幂等，删除不存在的会话同样成功）
    pub async fn logout(&self, identity: &str, session_id: &str) -> Result<(), AuthError> {
        self.store.delete(identity, session_id).await?;

        tracing::info!(identity, session_id, "会话已注销");
        Ok(())
    }
}
