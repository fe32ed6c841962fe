use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::AuthError};

/// 认证中间件
///
/// 校验请求的访问令牌和会话，通过后把解出的载荷注入请求扩展，
/// 供下游 handler 以 `Extension<Claims>` 读取；失败则直接以
/// 对应的拒绝响应短路。
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let claims = state.auth.authenticate_claims(auth_header, user_agent).await?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
