use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::{TypedHeader, headers::UserAgent};

use crate::{
    AppState,
    api::schema::common::EmptyResponse,
    auth::Claims,
    error::AuthError,
    utils::success_to_api_response,
};

use super::model::{CheckTokenResponse, RefreshTokenRequest, RefreshTokenResponse};

/// 用刷新令牌换取新的令牌对，旧会话随之轮换
#[axum::debug_handler]
pub async fn refresh_token(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    let ua = user_agent.as_ref().map(|TypedHeader(ua)| ua.to_string());

    let pair = state.sessions.refresh(&req.refresh_token, ua.as_deref()).await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(RefreshTokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    ))
}

/// 注销当前会话
#[axum::debug_handler]
pub async fn logout(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AuthError> {
    state.sessions.logout(&claims.sub, &claims.jti).await?;

    Ok((StatusCode::OK, success_to_api_response(EmptyResponse {})))
}

/// 检查token是否有效，如果有效返回成功，否则返回失败
#[axum::debug_handler]
pub async fn check_token(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    // 认证中间件已验证token和会话，直接返回身份
    (
        StatusCode::OK,
        success_to_api_response(CheckTokenResponse { identity: claims.sub }),
    )
}
