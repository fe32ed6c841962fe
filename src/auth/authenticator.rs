use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::SessionStore;
use crate::config::Config;
use crate::error::AuthError;

use super::token::{Claims, TokenCodec, TokenType};

/// 已认证的用户身份标识
pub type Identity = String;

/// 用户记录（由外部用户存储提供）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub identity: String,
    pub nickname: Option<String>,
}

/// 域用户查询接口（外部协作方）
///
/// 仅供 `authenticate_user` 这个便捷入口使用，核心认证流程不依赖它。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user_by_identity(&self, identity: &str) -> Option<AuthUser>;
}

/// 请求认证器
///
/// 校验请求携带的访问令牌：解码验签之后，还要求令牌内嵌的会话ID
/// 在缓存中存活、且缓存中绑定的客户端指纹与本次请求一致。
/// 除缓存往返外没有本地可变状态，可任意并发调用。
#[derive(Clone)]
pub struct Authenticator {
    codec: TokenCodec,
    store: Arc<dyn SessionStore>,
    scheme: String,
}

impl Authenticator {
    pub fn new(codec: TokenCodec, store: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            codec,
            store,
            scheme: config.auth_scheme.clone(),
        }
    }

    /// 认证请求，返回已认证的身份
    pub async fn authenticate(
        &self,
        auth_header: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Identity, AuthError> {
        self.authenticate_claims(auth_header, user_agent)
            .await
            .map(|claims| claims.sub)
    }

    /// 认证请求，返回完整载荷（中间件用它注入请求扩展）
    pub async fn authenticate_claims(
        &self,
        auth_header: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Claims, AuthError> {
        let token = extract_credential(auth_header, &self.scheme)?;
        let fingerprint = require_fingerprint(user_agent)?;

        let claims = self.codec.decode(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AuthError::MalformedToken);
        }

        verify_session(self.store.as_ref(), &claims.sub, &claims.jti, fingerprint).await?;

        Ok(claims)
    }

    /// 认证并加载用户记录
    ///
    /// 会话有效但身份已不存在于用户存储时同样拒绝，
    /// 不向调用方区分这两种情况。
    pub async fn authenticate_user(
        &self,
        users: &dyn UserDirectory,
        auth_header: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let identity = self.authenticate(auth_header, user_agent).await?;
        users
            .get_user_by_identity(&identity)
            .await
            .ok_or(AuthError::SessionNotFound)
    }
}

/// 从 Authorization 头中提取凭证
///
/// 要求严格的两段式 `"<方案> <令牌>"`，方案字面量区分大小写。
fn extract_credential<'a>(auth_header: Option<&'a str>, scheme: &str) -> Result<&'a str, AuthError> {
    let header = match auth_header {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::MissingCredential),
    };

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(token), None) if prefix == scheme => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}

/// 要求请求携带非空的客户端指纹（user-agent）
fn require_fingerprint(user_agent: Option<&str>) -> Result<&str, AuthError> {
    match user_agent {
        Some(ua) if !ua.is_empty() => Ok(ua),
        _ => Err(AuthError::MissingFingerprint),
    }
}

/// 会话校验：缓存中存在该会话且指纹一致，认证与刷新共用
///
/// 缓存未命中不区分“从未登录”和“已吊销/过期”；
/// 指纹逐字节比较，不做任何规范化。
pub(crate) async fn verify_session(
    store: &dyn SessionStore,
    identity: &str,
    session_id: &str,
    fingerprint: &str,
) -> Result<(), AuthError> {
    let cached = store
        .get(identity, session_id)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

    if cached != fingerprint {
        tracing::warn!(identity, session_id, "会话指纹与请求指纹不一致");
        return Err(AuthError::FingerprintMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_missing_credential() {
        assert!(matches!(
            extract_credential(None, "Token"),
            Err(AuthError::MissingCredential)
        ));
        // 空头与缺失等价
        assert!(matches!(
            extract_credential(Some(""), "Token"),
            Err(AuthError::MissingCredential)
        ));
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert!(matches!(
            extract_credential(Some("token abc"), "Token"),
            Err(AuthError::MalformedCredential)
        ));
        assert!(matches!(
            extract_credential(Some("TOKEN abc"), "Token"),
            Err(AuthError::MalformedCredential)
        ));
        assert_eq!(extract_credential(Some("Token abc"), "Token").unwrap(), "abc");
    }

    #[test]
    fn exactly_two_parts_required() {
        assert!(matches!(
            extract_credential(Some("Token"), "Token"),
            Err(AuthError::MalformedCredential)
        ));
        assert!(matches!(
            extract_credential(Some("Token a b"), "Token"),
            Err(AuthError::MalformedCredential)
        ));
        assert!(matches!(
            extract_credential(Some("Bearer abc"), "Token"),
            Err(AuthError::MalformedCredential)
        ));
    }

    #[test]
    fn empty_fingerprint_is_missing() {
        assert!(matches!(require_fingerprint(None), Err(AuthError::MissingFingerprint)));
        assert!(matches!(require_fingerprint(Some("")), Err(AuthError::MissingFingerprint)));
        assert_eq!(require_fingerprint(Some("Chrome/1")).unwrap(), "Chrome/1");
    }
}
