use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

/// 认证失败原因
///
/// 每个变体都在检测点立即抛出并原样传播到边界，不重试、不降级。
/// 只有 `CacheUnavailable` 是调用方可以合理重试的瞬时故障。
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("未提供认证令牌")]
    MissingCredential,
    #[error("认证令牌格式或方案无效")]
    MalformedCredential,
    #[error("未提供 user-agent 头")]
    MissingFingerprint,
    #[error("访问令牌已过期")]
    ExpiredToken,
    #[error("刷新令牌已过期，请重新登录")]
    ExpiredRefreshToken,
    #[error("无效的访问令牌")]
    MalformedToken,
    #[error("无效的刷新令牌")]
    InvalidRefreshToken,
    #[error("会话不存在")]
    SessionNotFound,
    #[error("会话指纹不匹配")]
    FingerprintMismatch,
    #[error("会话缓存不可用")]
    CacheUnavailable,
    #[error("生成令牌失败")]
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match self {
            AuthError::MissingCredential => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, "未提供认证令牌")
            }
            AuthError::MalformedCredential => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, "认证令牌格式无效")
            }
            AuthError::MissingFingerprint => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, "未提供 user-agent 头")
            }
            AuthError::ExpiredToken => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, "访问令牌已过期")
            }
            AuthError::ExpiredRefreshToken => (
                StatusCode::FORBIDDEN,
                error_codes::PERMISSION_DENIED,
                "刷新令牌已过期，请重新登录",
            ),
            AuthError::MalformedToken => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, "无效的访问令牌")
            }
            AuthError::InvalidRefreshToken => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, "无效的刷新令牌")
            }
            // 对外不区分“会话不存在”和“指纹不匹配”
            AuthError::SessionNotFound | AuthError::FingerprintMismatch => (
                StatusCode::FORBIDDEN,
                error_codes::PERMISSION_DENIED,
                "会话无效，请重新登录",
            ),
            AuthError::CacheUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::CACHE_UNAVAILABLE,
                "会话缓存暂时不可用，请稍后重试",
            ),
            AuthError::TokenCreation => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, "生成令牌失败")
            }
        };

        (status, error_to_api_response::<()>(code, msg.to_string())).into_response()
    }
}
